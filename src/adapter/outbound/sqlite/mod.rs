//! SQLite persistence adapter.
//!
//! Diesel over an r2d2 pool, with migrations embedded in the binary.

pub mod database;
pub mod store;

pub use store::SqliteEntityStore;
