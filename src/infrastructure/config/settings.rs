//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all settings.
//! Configuration is read from a TOML file; every section is optional, and
//! `ODDSBOARD_DATABASE` overrides the database path.
//!
//! # Example
//!
//! ```no_run
//! use oddsboard::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging(false);
//!     Ok(())
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::database::{DatabaseConfig, DATABASE_ENV};
use super::listing::ListingConfig;
use super::logging::{LoggingConfig, LOG_FORMATS};
use crate::error::{ConfigError, Result};

/// Main application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Logging and tracing configuration.
    pub logging: LoggingConfig,

    /// SQLite location and pool settings.
    pub database: DatabaseConfig,

    /// Listing limits.
    pub listing: ListingConfig,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the TOML is malformed,
    /// or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Load `path` if it exists, otherwise start from defaults.
    ///
    /// # Errors
    ///
    /// Same as [`Config::load`] for an existing file.
    #[allow(clippy::result_large_err)]
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            return Self::load(path);
        }
        let mut config = Self::default();
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    /// Initialize tracing from the `[logging]` section.
    pub fn init_logging(&self, verbose: bool) {
        self.logging.init(verbose);
    }

    /// Render as TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| crate::error::Error::Parse(e.to_string()))
    }

    fn apply_env(&mut self) {
        if let Ok(path) = std::env::var(DATABASE_ENV) {
            if !path.trim().is_empty() {
                self.database.path = path;
            }
        }
    }

    /// Validate configuration values.
    #[allow(clippy::result_large_err)]
    fn validate(&self) -> Result<()> {
        if !LOG_FORMATS.contains(&self.logging.format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "format",
                reason: format!("must be one of {}", LOG_FORMATS.join(", ")),
            }
            .into());
        }
        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "level" }.into());
        }
        if self.database.path.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "path",
                reason: "must not be empty".to_string(),
            }
            .into());
        }
        if self.database.pool_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "pool_size",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.listing.max_page_size < 1 {
            return Err(ConfigError::InvalidValue {
                field: "max_page_size",
                reason: "must be at least 1".to_string(),
            }
            .into());
        }
        Ok(())
    }
}
