//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! ```text
//!   CLI ──► Catalog (inbound) ──► application ──► EntityStore (outbound)
//!                                                   ├─ SQLite
//!                                                   └─ memory
//! ```

pub mod inbound;
pub mod outbound;

pub use inbound::catalog::Catalog;
pub use outbound::store::{EntityStore, StoreTransaction};
