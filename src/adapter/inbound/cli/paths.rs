//! Path utilities for oddsboard.
//!
//! All data lives under `~/.oddsboard/`:
//! - `~/.oddsboard/config.toml` - main configuration

use std::path::PathBuf;

/// Returns the oddsboard home directory (`~/.oddsboard/`).
pub fn home_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".oddsboard")
}

/// Returns the default config file path (`~/.oddsboard/config.toml`).
pub fn default_config() -> PathBuf {
    home_dir().join("config.toml")
}
