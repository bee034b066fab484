//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`domain`] - Builders for offers, odds and their inputs.
//! - [`store`] - Ready-made stores and ranking inspection.
//! - [`config`] - Canonical test configurations.

pub mod config;
pub mod domain;
pub mod store;
