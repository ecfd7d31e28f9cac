use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub overpass: OverpassConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OverpassConfig {
    /// Interpreter URL the query text is POSTed to.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
    /// Whole-request timeout enforced by the HTTP client, not by the pipeline.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for OverpassConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            connect_timeout_ms: default_connect_timeout_ms(),
            request_timeout_ms: default_request_timeout_ms(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_endpoint() -> String {
    "https://overpass-api.de/api/interpreter".to_string()
}

fn default_connect_timeout_ms() -> u64 {
    5_000
}

fn default_request_timeout_ms() -> u64 {
    // Overpass allows queries up to 180s by default
    180_000
}

fn default_user_agent() -> String {
    format!("overpass-worker/{}", env!("CARGO_PKG_VERSION"))
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_dir")]
    pub log_dir: String,
    #[serde(default = "default_level")]
    pub stdout_level: String,
    #[serde(default = "default_level")]
    pub file_level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_dir: default_log_dir(),
            stdout_level: default_level(),
            file_level: default_level(),
        }
    }
}

fn default_log_dir() -> String {
    "logs".to_string()
}

fn default_level() -> String {
    "info".to_string()
}

use std::env;

pub fn load_settings() -> Result<Settings, config::ConfigError> {
    let config_path =
        env::var("OVERPASS_WORKER_CONFIG").unwrap_or_else(|_| "config/overpass".to_string());
    load_settings_from(&config_path)
}

/// Loads settings from `path` (extension optional), then applies
/// `OVERPASS_WORKER__SECTION__KEY` environment overrides.
pub fn load_settings_from(path: &str) -> Result<Settings, config::ConfigError> {
    let settings: Settings = config::Config::builder()
        .add_source(config::File::with_name(path).required(false))
        .add_source(
            config::Environment::with_prefix("OVERPASS_WORKER")
                .separator("__")
                .try_parsing(true),
        )
        .build()?
        .try_deserialize()?;

    Ok(settings)
}
