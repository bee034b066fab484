//! The independently ordered entity sets.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the two collections whose `order` values form their own
/// `1..=N` namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Offers,
    Odds,
}

impl Collection {
    /// Plural name, also the table name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Collection::Offers => "offers",
            Collection::Odds => "odds",
        }
    }

    /// Name of a single member, used in messages.
    #[must_use]
    pub const fn singular(self) -> &'static str {
        match self {
            Collection::Offers => "offer",
            Collection::Odds => "odd",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
