pub mod config;

pub use config::{AppConfig, ConfigSource, DefaultsConfig, LimitsConfig, ServerConfig};
