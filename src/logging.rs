use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::LoggingError;

/// Where and how much to log. The terminal belongs to the UI, so logs go to a file.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub enabled: bool,
    pub file: PathBuf,
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            enabled: true,
            file: PathBuf::from("power_connect_four.log"),
            level: "info".to_string(),
        }
    }
}

/// Parse a filter directive such as `info` or `power_connect_four=debug`.
pub fn parse_filter(directive: &str) -> Result<EnvFilter, LoggingError> {
    EnvFilter::try_new(directive).map_err(|e| LoggingError::Filter {
        filter: directive.to_string(),
        reason: e.to_string(),
    })
}

/// Install the global subscriber. `RUST_LOG` takes precedence over the
/// configured level.
pub fn init(config: &LoggingConfig) -> Result<(), LoggingError> {
    if !config.enabled {
        return Ok(());
    }

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => parse_filter(&config.level)?,
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.file)
        .map_err(|source| LoggingError::FileOpen {
            path: config.file.clone(),
            source,
        })?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| LoggingError::Init(e.to_string()))
}
