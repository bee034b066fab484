//! Ordered-collection position management.
//!
//! Keeps the `order` of every entity in a collection equal to a dense
//! `1..=N` permutation across inserts, deletes and moves.

pub mod manager;

pub use manager::PositionManager;
