//! Best available price per outcome across bookie submissions.
//!
//! The result is derived data: it is recomputed from the full bookie
//! mapping on every write that touches it and never edited directly.
//!
//! Bookies are visited in lexicographic order of their names and a price
//! only replaces the current best when strictly greater, so on a tie the
//! alphabetically first bookie keeps the outcome.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::bookie::{BookieOdds, Outcome, PriceSet};
use super::error::DomainError;

/// Winning price for one outcome and the bookie offering it.
///
/// The sentinel `{ value: 0, bookie: "" }` means no eligible submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestPrice {
    #[serde(with = "rust_decimal::serde::float")]
    pub value: Decimal,
    pub bookie: String,
}

impl BestPrice {
    #[must_use]
    pub fn new(value: Decimal, bookie: impl Into<String>) -> Self {
        Self {
            value,
            bookie: bookie.into(),
        }
    }

    /// True when no bookie contributed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bookie.is_empty()
    }
}

/// Best price per outcome for one odds record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BestCalculatedOdds {
    pub home_win: BestPrice,
    pub draw: BestPrice,
    pub away_win: BestPrice,
}

impl BestCalculatedOdds {
    #[must_use]
    pub fn get(&self, outcome: Outcome) -> &BestPrice {
        match outcome {
            Outcome::HomeWin => &self.home_win,
            Outcome::Draw => &self.draw,
            Outcome::AwayWin => &self.away_win,
        }
    }

    fn get_mut(&mut self, outcome: Outcome) -> &mut BestPrice {
        match outcome {
            Outcome::HomeWin => &mut self.home_win,
            Outcome::Draw => &mut self.draw,
            Outcome::AwayWin => &mut self.away_win,
        }
    }

    fn offer(&mut self, bookie: &str, prices: &PriceSet) {
        for outcome in Outcome::ALL {
            let price = prices.price(outcome);
            let best = self.get_mut(outcome);
            if price > best.value {
                best.value = price;
                best.bookie.clear();
                best.bookie.push_str(bookie);
            }
        }
    }
}

/// Compute the best price per outcome, skipping suspended bookies.
///
/// # Errors
///
/// Returns [`DomainError::MalformedSubmission`] naming the first bookie
/// (in name order) whose entry has no `oneX` block. Suspended entries are
/// checked too: the whole mapping is rejected, never partially used.
pub fn best_odds(odds: &BookieOdds) -> Result<BestCalculatedOdds, DomainError> {
    let mut best = BestCalculatedOdds::default();

    for (bookie, submission) in odds {
        let Some(prices) = submission.one_x.as_ref() else {
            return Err(DomainError::MalformedSubmission {
                bookie: bookie.clone(),
            });
        };
        if submission.suspended {
            continue;
        }
        best.offer(bookie, prices);
    }

    Ok(best)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::bookie::BookieSubmission;
    use rust_decimal_macros::dec;

    fn prices(home: Decimal, draw: Decimal, away: Decimal) -> PriceSet {
        PriceSet::new(home, draw, away)
    }

    #[test]
    fn suspended_bookie_is_excluded_even_with_higher_prices() {
        let mut odds = BookieOdds::new();
        odds.insert(
            "A".into(),
            BookieSubmission::active(prices(dec!(2.1), dec!(3.0), dec!(3.5))),
        );
        odds.insert(
            "B".into(),
            BookieSubmission::suspended(prices(dec!(2.3), dec!(2.9), dec!(3.6))),
        );

        let best = best_odds(&odds).unwrap();

        assert_eq!(best.home_win, BestPrice::new(dec!(2.1), "A"));
        assert_eq!(best.draw, BestPrice::new(dec!(3.0), "A"));
        assert_eq!(best.away_win, BestPrice::new(dec!(3.5), "A"));
    }

    #[test]
    fn picks_maximum_per_outcome_independently() {
        let mut odds = BookieOdds::new();
        odds.insert(
            "acme".into(),
            BookieSubmission::active(prices(dec!(2.5), dec!(3.1), dec!(2.8))),
        );
        odds.insert(
            "bolt".into(),
            BookieSubmission::active(prices(dec!(2.2), dec!(3.4), dec!(2.9))),
        );

        let best = best_odds(&odds).unwrap();

        assert_eq!(best.home_win.bookie, "acme");
        assert_eq!(best.draw.bookie, "bolt");
        assert_eq!(best.away_win, BestPrice::new(dec!(2.9), "bolt"));
    }

    #[test]
    fn ties_go_to_alphabetically_first_bookie() {
        let mut odds = BookieOdds::new();
        odds.insert(
            "zulu".into(),
            BookieSubmission::active(prices(dec!(2.0), dec!(3.0), dec!(4.0))),
        );
        odds.insert(
            "alpha".into(),
            BookieSubmission::active(prices(dec!(2.0), dec!(3.0), dec!(4.0))),
        );

        let best = best_odds(&odds).unwrap();
        for outcome in Outcome::ALL {
            assert_eq!(best.get(outcome).bookie, "alpha");
        }
    }

    #[test]
    fn missing_price_block_fails_whole_aggregation() {
        let mut odds = BookieOdds::new();
        odds.insert(
            "acme".into(),
            BookieSubmission::active(prices(dec!(2.0), dec!(3.0), dec!(4.0))),
        );
        odds.insert("broken".into(), BookieSubmission::without_prices());

        assert_eq!(
            best_odds(&odds),
            Err(DomainError::MalformedSubmission {
                bookie: "broken".into()
            })
        );
    }

    #[test]
    fn suspended_entry_without_prices_is_still_malformed() {
        let mut odds = BookieOdds::new();
        odds.insert(
            "acme".into(),
            BookieSubmission {
                one_x: None,
                suspended: true,
            },
        );
        assert!(best_odds(&odds).is_err());
    }

    #[test]
    fn all_suspended_or_zero_yields_sentinel() {
        let mut odds = BookieOdds::new();
        odds.insert(
            "acme".into(),
            BookieSubmission::suspended(prices(dec!(2.0), dec!(3.0), dec!(4.0))),
        );
        odds.insert("bolt".into(), BookieSubmission::active(PriceSet::default()));

        let best = best_odds(&odds).unwrap();
        assert_eq!(best, BestCalculatedOdds::default());
        assert!(best.home_win.is_empty());
        assert_eq!(best.draw.value, Decimal::ZERO);
    }

    #[test]
    fn empty_mapping_yields_sentinel() {
        assert_eq!(
            best_odds(&BookieOdds::new()).unwrap(),
            BestCalculatedOdds::default()
        );
    }

    #[test]
    fn serializes_with_wire_names() {
        let best = BestCalculatedOdds {
            home_win: BestPrice::new(dec!(2.5), "acme"),
            ..Default::default()
        };
        let json = serde_json::to_value(&best).unwrap();
        assert_eq!(json["homeWin"]["bookie"], "acme");
        assert_eq!(json["homeWin"]["value"], 2.5);
        assert_eq!(json["awayWin"]["bookie"], "");
    }
}
