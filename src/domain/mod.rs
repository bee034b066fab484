//! Store-agnostic domain types and pure logic.
//!
//! - [`offer`] / [`odd`] - the two ordered entity kinds and their inputs
//! - [`bookie`] - per-bookie price submissions
//! - [`best_odds`] - best price per outcome across bookies
//! - [`order`] - shift planning for the dense `1..=N` ordering
//! - [`page`] - listing requests and results

pub mod best_odds;
pub mod bookie;
pub mod collection;
pub mod entity;
pub mod error;
pub mod id;
pub mod odd;
pub mod offer;
pub mod order;
pub mod page;

pub use best_odds::{BestCalculatedOdds, BestPrice};
pub use bookie::{BookieOdds, BookieSubmission, Outcome, PriceSet};
pub use collection::Collection;
pub use entity::{Entity, EntityInput};
pub use error::DomainError;
pub use id::EntityId;
pub use odd::{Odd, OddDetails, OddInput};
pub use offer::{ImageRef, Offer, OfferDetails, OfferInput};
pub use page::{Page, PageRequest, Visibility};
