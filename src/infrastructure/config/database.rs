//! Database configuration.

use serde::{Deserialize, Serialize};

use crate::adapter::outbound::sqlite::database::connection::{
    ConnectionOptions, DEFAULT_BUSY_TIMEOUT_MS,
};

/// Environment variable overriding [`DatabaseConfig::path`].
pub const DATABASE_ENV: &str = "ODDSBOARD_DATABASE";

/// SQLite database settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Path to the SQLite file, or `:memory:`.
    pub path: String,
    /// Maximum pooled connections.
    pub pool_size: u32,
    /// Milliseconds a writer waits for the database lock.
    pub busy_timeout_ms: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: "oddsboard.db".into(),
            pool_size: 5,
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
        }
    }
}

impl DatabaseConfig {
    /// Pragmas for each pooled connection.
    #[must_use]
    pub fn connection_options(&self) -> ConnectionOptions {
        ConnectionOptions {
            busy_timeout_ms: self.busy_timeout_ms,
            wal: true,
        }
    }
}
