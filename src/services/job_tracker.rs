use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Latest job id per logical channel.
///
/// A channel is whatever the caller uses to group requests that supersede
/// each other, e.g. one preview pane. A response is only worth delivering
/// while its job is still the most recent one issued on its channel.
///
/// A channel is forgotten once every job issued on it has completed.
pub struct JobTracker {
    channels: Arc<RwLock<HashMap<String, ChannelState>>>,
}

#[derive(Debug, Clone, Copy)]
struct ChannelState {
    latest: u64,
    in_flight: usize,
}

impl JobTracker {
    pub fn new() -> Self {
        Self {
            channels: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Record `job_id` as the most recent job on `channel`.
    ///
    /// Job ids are expected to grow per channel; an id older than the one
    /// already recorded is refused and `false` returned.
    pub async fn issue(&self, channel: &str, job_id: u64) -> bool {
        let mut channels = self.channels.write().await;
        let state = channels.entry(channel.to_string()).or_insert(ChannelState {
            latest: job_id,
            in_flight: 0,
        });
        if state.latest > job_id {
            return false;
        }
        state.latest = job_id;
        state.in_flight += 1;
        true
    }

    /// Whether `job_id` is still the latest job on `channel`.
    ///
    /// Channels nobody issued on are always current.
    pub async fn is_current(&self, channel: &str, job_id: u64) -> bool {
        let channels = self.channels.read().await;
        channels
            .get(channel)
            .map_or(true, |state| state.latest == job_id)
    }

    /// Mark one job issued on `channel` as finished, current or not.
    ///
    /// Drops the channel when nothing issued on it is still running.
    pub async fn complete(&self, channel: &str) {
        let mut channels = self.channels.write().await;
        if let Some(state) = channels.get_mut(channel) {
            state.in_flight = state.in_flight.saturating_sub(1);
            if state.in_flight == 0 {
                channels.remove(channel);
            }
        }
    }

    /// Number of channels with jobs still running
    pub async fn channel_count(&self) -> usize {
        self.channels.read().await.len()
    }
}

impl Default for JobTracker {
    fn default() -> Self {
        Self::new()
    }
}
