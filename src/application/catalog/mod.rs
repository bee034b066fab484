//! Catalog use cases: listing, CRUD and pruning over both collections.

mod service;

pub use service::{CatalogConfig, CatalogService};
