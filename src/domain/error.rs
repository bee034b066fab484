//! Domain validation errors for catalog entities.
//!
//! These errors are raised before anything is written: malformed input,
//! bookie submissions without prices, and order values outside the
//! collection's range.
//!
//! # Examples
//!
//! ```
//! use oddsboard::domain::best_odds::best_odds;
//! use oddsboard::domain::bookie::{BookieOdds, BookieSubmission};
//! use oddsboard::domain::error::DomainError;
//!
//! let mut odds = BookieOdds::new();
//! odds.insert("acme".to_string(), BookieSubmission::without_prices());
//!
//! assert!(matches!(
//!     best_odds(&odds),
//!     Err(DomainError::MalformedSubmission { .. })
//! ));
//! ```

use thiserror::Error;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Required input missing or out of range.
    #[error("invalid {field}: {reason}")]
    Validation {
        /// Offending field, using its wire name.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// A bookie entry lacks the `oneX` price block.
    #[error("oneX not provided for bookie {bookie}")]
    MalformedSubmission {
        /// Key of the offending submission.
        bookie: String,
    },

    /// Target order outside `1..=max`.
    #[error("order {requested} is outside 1..={max}")]
    InvalidOrder {
        /// Order the caller asked for.
        requested: i64,
        /// Largest order currently valid.
        max: i64,
    },
}

impl DomainError {
    pub(crate) fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }
}
