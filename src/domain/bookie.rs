//! Per-bookie price submissions attached to an odds record.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Bookie name to submission.
///
/// A `BTreeMap` so iteration is lexicographic by bookie name; the
/// aggregator's tie-break relies on it.
pub type BookieOdds = BTreeMap<String, BookieSubmission>;

/// The three 1X2 outcomes being priced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Outcome {
    HomeWin,
    Draw,
    AwayWin,
}

impl Outcome {
    pub const ALL: [Outcome; 3] = [Outcome::HomeWin, Outcome::Draw, Outcome::AwayWin];
}

/// Decimal prices for the three outcomes. Absent prices read as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceSet {
    #[serde(default, with = "rust_decimal::serde::float")]
    pub home_win: Decimal,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub draw: Decimal,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub away_win: Decimal,
}

impl PriceSet {
    #[must_use]
    pub const fn new(home_win: Decimal, draw: Decimal, away_win: Decimal) -> Self {
        Self {
            home_win,
            draw,
            away_win,
        }
    }

    #[must_use]
    pub fn price(&self, outcome: Outcome) -> Decimal {
        match outcome {
            Outcome::HomeWin => self.home_win,
            Outcome::Draw => self.draw,
            Outcome::AwayWin => self.away_win,
        }
    }
}

/// One bookie's entry in an odds record.
///
/// `one_x` is optional on the wire so a submission without prices can be
/// detected and rejected rather than failing deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookieSubmission {
    #[serde(rename = "oneX", default, skip_serializing_if = "Option::is_none")]
    pub one_x: Option<PriceSet>,
    #[serde(default)]
    pub suspended: bool,
}

impl BookieSubmission {
    /// An active submission with the given prices.
    #[must_use]
    pub fn active(prices: PriceSet) -> Self {
        Self {
            one_x: Some(prices),
            suspended: false,
        }
    }

    /// A suspended submission; kept on record but ignored for best odds.
    #[must_use]
    pub fn suspended(prices: PriceSet) -> Self {
        Self {
            one_x: Some(prices),
            suspended: true,
        }
    }

    /// A malformed submission carrying no price block.
    #[must_use]
    pub fn without_prices() -> Self {
        Self::default()
    }
}
