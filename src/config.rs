//! Configuration System
//!
//! Layered configuration for services embedding the response core.
//! Sources, lowest to highest precedence: builder defaults, an optional
//! TOML config file, and `CIRRUS_`-prefixed environment variables.

use crate::alarms::AlarmConfig;
use crate::error::BrokerError;
use crate::logging::LoggingConfig;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BrokerConfig {
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Alarm manager behavior
    #[serde(default)]
    pub alarms: AlarmConfig,
}

/// Path to the user-level config file:
/// $HOME/.config/cirrus/config.toml
pub fn default_config_path() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(|home| {
        PathBuf::from(home)
            .join(".config")
            .join("cirrus")
            .join("config.toml")
    })
}

impl BrokerConfig {
    /// Load configuration.
    ///
    /// With an explicit `path` the file must exist and parse. Without one,
    /// the user-level config file is merged when present. Environment
    /// variables override either: `CIRRUS_LOGGING__LEVEL=debug`,
    /// `CIRRUS_ALARMS__RELOG_REPEATS=true`.
    pub fn load(path: Option<&Path>) -> Result<Self, BrokerError> {
        let mut builder = Config::builder()
            .set_default("logging.level", "info")
            .map_err(|e| BrokerError::ConfigError(e.to_string()))?
            .set_default("alarms.relog_repeats", false)
            .map_err(|e| BrokerError::ConfigError(e.to_string()))?;

        match path {
            Some(path) => {
                builder = builder.add_source(File::from(path).required(true));
            }
            None => {
                if let Some(user_path) = default_config_path() {
                    if user_path.exists() {
                        builder = builder.add_source(File::from(user_path).required(false));
                    }
                }
            }
        }

        builder = builder.add_source(
            Environment::with_prefix("CIRRUS")
                .prefix_separator("_")
                .separator("__"),
        );

        builder
            .build()
            .and_then(Config::try_deserialize)
            .map_err(|e| BrokerError::ConfigError(e.to_string()))
    }
}
