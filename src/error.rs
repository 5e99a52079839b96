use std::path::PathBuf;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

/// Errors that can occur while setting up logging.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("failed to open log file {path}: {source}")]
    FileOpen {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid log filter '{filter}': {reason}")]
    Filter { filter: String, reason: String },

    #[error("failed to install log subscriber: {0}")]
    Init(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Validation("ui.poll_interval_ms must be > 0".to_string());
        assert_eq!(
            err.to_string(),
            "config validation error: ui.poll_interval_ms must be > 0"
        );
    }

    #[test]
    fn test_logging_error_display() {
        let err = LoggingError::Filter {
            filter: "game=loud".to_string(),
            reason: "invalid level".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid log filter 'game=loud': invalid level"
        );
    }
}
