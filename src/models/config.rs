use dither_core::{DitherMethod, DitherSpec, ExtractionMethod};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory when `CONFIG_FILE` is unset.
pub const DEFAULT_CONFIG_FILE: &str = "ditherkit.yaml";

/// Application configuration loaded from ditherkit.yaml
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct AppConfig {
    /// Listener and request body settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Per-request and concurrency limits
    #[serde(default)]
    pub limits: LimitsConfig,

    /// Transform settings used when a request leaves them out
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ServerConfig {
    /// Address the HTTP server binds to (overridden by `BIND_ADDR`)
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Largest accepted request body in bytes
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

fn default_bind() -> String {
    "0.0.0.0:3000".to_string()
}

fn default_max_body_bytes() -> usize {
    64 * 1024 * 1024
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct LimitsConfig {
    #[serde(default = "default_max_dimension")]
    pub max_width: u32,

    #[serde(default = "default_max_dimension")]
    pub max_height: u32,

    /// Transforms allowed to run on the blocking pool at once
    #[serde(default = "default_max_concurrent_jobs")]
    pub max_concurrent_jobs: usize,
}

fn default_max_dimension() -> u32 {
    4096
}

fn default_max_concurrent_jobs() -> usize {
    4
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_width: default_max_dimension(),
            max_height: default_max_dimension(),
            max_concurrent_jobs: default_max_concurrent_jobs(),
        }
    }
}

impl LimitsConfig {
    /// Whether an image of this size may be processed.
    pub fn admits(&self, width: u32, height: u32) -> bool {
        width <= self.max_width && height <= self.max_height
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct DefaultsConfig {
    #[serde(default = "default_dither_method")]
    pub dither_method: String,

    #[serde(default = "default_threshold")]
    pub threshold: u8,

    /// Error/noise strength multiplier
    #[serde(default = "default_factor")]
    pub factor: f32,

    /// Contrast stretch amount in percent
    #[serde(default = "default_stretch")]
    pub stretch: f32,

    #[serde(default = "default_extraction_method")]
    pub extraction_method: String,

    #[serde(default = "default_palette_size")]
    pub palette_size: usize,

    /// Opaque pixels sampled for palette extraction
    #[serde(default = "default_sample_cap")]
    pub sample_cap: usize,
}

fn default_dither_method() -> String {
    "floyd-steinberg".to_string()
}

fn default_threshold() -> u8 {
    dither_core::dither::DEFAULT_THRESHOLD
}

fn default_factor() -> f32 {
    dither_core::dither::DEFAULT_FACTOR
}

fn default_stretch() -> f32 {
    25.0
}

fn default_extraction_method() -> String {
    ExtractionMethod::default().name().to_string()
}

fn default_palette_size() -> usize {
    dither_core::extract::DEFAULT_PALETTE_SIZE
}

fn default_sample_cap() -> usize {
    dither_core::extract::DEFAULT_SAMPLE_CAP
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            dither_method: default_dither_method(),
            threshold: default_threshold(),
            factor: default_factor(),
            stretch: default_stretch(),
            extraction_method: default_extraction_method(),
            palette_size: default_palette_size(),
            sample_cap: default_sample_cap(),
        }
    }
}

impl DefaultsConfig {
    /// Resolve a dither spec, filling unset fields from these defaults.
    pub fn dither_spec(
        &self,
        method: Option<&str>,
        threshold: Option<u8>,
        factor: Option<f32>,
        stretch: Option<f32>,
        seed: Option<u64>,
    ) -> DitherSpec {
        let method = DitherMethod::from_name(
            method.unwrap_or(&self.dither_method),
            factor.unwrap_or(self.factor),
            stretch.unwrap_or(self.stretch),
        );
        DitherSpec::new(method)
            .threshold(threshold.unwrap_or(self.threshold))
            .seed(seed)
    }

    pub fn extraction(&self, method: Option<&str>) -> ExtractionMethod {
        ExtractionMethod::from_name(method.unwrap_or(&self.extraction_method))
    }
}

/// Where the active configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Defaults,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::File(path) => write!(f, "{}", path.display()),
            ConfigSource::Defaults => f.write_str("built-in defaults"),
        }
    }
}

impl AppConfig {
    /// Config file to read: `CONFIG_FILE`, else `./ditherkit.yaml` if present.
    pub fn config_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("CONFIG_FILE") {
            return Some(PathBuf::from(path));
        }
        let local = PathBuf::from(DEFAULT_CONFIG_FILE);
        local.exists().then_some(local)
    }

    /// Load configuration from the default location.
    pub fn load() -> (Self, ConfigSource) {
        match Self::config_path() {
            Some(path) => {
                let config = Self::load_from_path(&path);
                (config, ConfigSource::File(path))
            }
            None => {
                tracing::info!("No config file found, using defaults");
                (Self::default(), ConfigSource::Defaults)
            }
        }
    }

    /// Load configuration from a YAML file, falling back to defaults on error.
    pub fn load_from_path(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    let config: Self = config;
                    tracing::info!(
                        path = %path.display(),
                        max_width = config.limits.max_width,
                        max_height = config.limits.max_height,
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(
                        %e,
                        path = %path.display(),
                        "Failed to parse config, using defaults"
                    );
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, path = %path.display(), "Failed to read config, using defaults");
                Self::default()
            }
        }
    }
}
