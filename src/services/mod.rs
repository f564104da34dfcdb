pub mod job_tracker;
pub mod worker;

pub use job_tracker::JobTracker;
pub use worker::{AutoPalette, TransformWorker};
