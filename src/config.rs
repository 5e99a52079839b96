use std::path::Path;

use crate::error::ConfigError;
use crate::game::{RuleConfig, COLS};
use crate::logging::{self, LoggingConfig};
use crate::ui::UiConfig;

/// Longest post-round pause accepted from a config file.
const MAX_WIN_PAUSE_MS: u64 = 60_000;

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub ui: UiConfig,
    pub rules: RuleConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ui.poll_interval_ms == 0 {
            return Err(ConfigError::Validation(
                "ui.poll_interval_ms must be > 0".into(),
            ));
        }
        if self.ui.win_pause_ms > MAX_WIN_PAUSE_MS {
            return Err(ConfigError::Validation(format!(
                "ui.win_pause_ms must be <= {MAX_WIN_PAUSE_MS}"
            )));
        }
        if self.ui.start_column >= COLS {
            return Err(ConfigError::Validation(format!(
                "ui.start_column must be < {COLS}"
            )));
        }

        if self.logging.enabled && self.logging.file.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "logging.file must be set when logging is enabled".into(),
            ));
        }
        if let Err(e) = logging::parse_filter(&self.logging.level) {
            return Err(ConfigError::Validation(format!("logging.level: {e}")));
        }

        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).expect("default config serializes")
    }
}
