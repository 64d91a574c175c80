use serde::Deserialize;
use std::env;
use std::time::Duration;

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub logging: LoggingConfig,
    #[serde(default)]
    pub explore: ExploreConfig,
}

#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    pub log_dir: String,
    pub stdout_level: String,
    pub file_level: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExploreConfig {
    /// Deadline applied to every explore request, covering all of its sub-queries.
    /// No deadline when unset.
    pub request_timeout_ms: Option<u64>,
}

impl ExploreConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_ms.map(Duration::from_millis)
    }
}

pub fn load_settings() -> Result<Settings, config::ConfigError> {
    let config_path =
        env::var("EXPLORE_GATEWAY_CONFIG").unwrap_or_else(|_| "config".to_string());
    load_settings_from(&config_path)
}

pub fn load_settings_from(config_path: &str) -> Result<Settings, config::ConfigError> {
    let settings: Settings = config::Config::builder()
        .add_source(config::File::with_name(config_path))
        .build()?
        .try_deserialize()?;

    Ok(settings)
}
