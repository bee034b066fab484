//! Oddsboard - ranked bookie offers and best available odds.
//!
//! Two independently ranked collections, offers and odds, each kept in a
//! dense `1..=N` order that users rearrange by hand. Odds records carry
//! per-bookie prices and a cached best price per outcome.
//!
//! # Modules
//!
//! - [`domain`] - Entities, best-odds aggregation and order arithmetic
//! - [`port`] - Catalog (inbound) and entity store (outbound) traits
//! - [`application`] - Position manager and catalog service
//! - [`adapter`] - SQLite and in-memory stores, the CLI
//! - [`infrastructure`] - Configuration, logging and wiring
//! - [`error`] - Error types for the crate
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use oddsboard::adapter::outbound::memory::MemoryStore;
//! use oddsboard::application::catalog::{CatalogConfig, CatalogService};
//! use oddsboard::domain::{Collection, EntityInput};
//! use oddsboard::port::Catalog;
//!
//! # async fn demo() -> oddsboard::error::Result<()> {
//! let catalog = CatalogService::new(Arc::new(MemoryStore::new()), CatalogConfig::default());
//! let body = r#"{"name":"acme","enabled":true,"playLink":"https://acme.example","promoInfo":"Free bet"}"#;
//! let offer = catalog.create(EntityInput::from_json(Collection::Offers, body)?).await?;
//! assert_eq!(offer.order(), 1);
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
