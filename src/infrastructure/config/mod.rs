//! Infrastructure configuration modules.

pub mod database;
pub mod listing;
pub mod logging;
pub mod settings;

pub use settings::Config;
