//! Canonical test configurations.
//!
//! One place for the settings tests open stores with, so each test does
//! not invent its own pool size or timeout.

use std::path::Path;

use crate::infrastructure::config::database::DatabaseConfig;
use crate::infrastructure::config::settings::Config;

/// Database settings for a file at `path`, with a small pool.
pub fn database_at(path: &Path) -> DatabaseConfig {
    DatabaseConfig {
        path: path.to_string_lossy().into_owned(),
        pool_size: 4,
        busy_timeout_ms: 30_000,
    }
}

/// Full configuration storing its database at `path`; logging stays quiet.
pub fn with_database(path: &Path) -> Config {
    let mut config = Config {
        database: database_at(path),
        ..Config::default()
    };
    config.logging.level = "warn".into();
    config
}

/// Configuration backed by a private in-memory database.
pub fn in_memory() -> Config {
    with_database(Path::new(":memory:"))
}
