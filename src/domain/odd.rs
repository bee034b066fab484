//! Fixture odds records priced by several bookies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::best_odds::{best_odds, BestCalculatedOdds};
use super::bookie::BookieOdds;
use super::error::DomainError;
use super::id::EntityId;
use super::offer::{non_empty, required_text};

/// A stored odds record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Odd {
    pub id: EntityId,
    pub order: i64,
    #[serde(flatten)]
    pub details: OddDetails,
    pub best_calculated_odds: BestCalculatedOdds,
}

/// Fixture fields and the raw bookie mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OddDetails {
    pub event_date_time: DateTime<Utc>,
    pub league: String,
    pub home_team: String,
    pub away_team: String,
    #[serde(default)]
    pub suspend_all: bool,
    #[serde(default)]
    pub odds: BookieOdds,
}

impl OddDetails {
    /// Derive the best prices for these details.
    ///
    /// # Errors
    ///
    /// [`DomainError::MalformedSubmission`] if any bookie lacks prices.
    pub fn best_odds(&self) -> Result<BestCalculatedOdds, DomainError> {
        best_odds(&self.odds)
    }
}

impl Odd {
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.details.suspend_all
    }

    /// Drop a bookie's submission and recompute best prices.
    ///
    /// Returns `Ok(false)` without touching anything if the bookie had no
    /// entry.
    ///
    /// # Errors
    ///
    /// [`DomainError::MalformedSubmission`] if a remaining bookie lacks
    /// prices; the record is left unchanged.
    pub fn remove_bookie(&mut self, bookie: &str) -> Result<bool, DomainError> {
        if !self.details.odds.contains_key(bookie) {
            return Ok(false);
        }
        let mut odds = self.details.odds.clone();
        odds.remove(bookie);
        let best = best_odds(&odds)?;
        self.details.odds = odds;
        self.best_calculated_odds = best;
        Ok(true)
    }

    /// True when the fixture started strictly before `now`.
    #[must_use]
    pub fn is_outdated(&self, now: DateTime<Utc>) -> bool {
        self.details.event_date_time < now
    }
}

/// Caller-supplied odds fields, used for both create and partial update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct OddInput {
    pub event_date_time: Option<String>,
    pub league: Option<String>,
    pub home_team: Option<String>,
    pub away_team: Option<String>,
    pub suspend_all: Option<bool>,
    pub odds: Option<BookieOdds>,
    /// Explicit slot on create. Rejected on update.
    pub order: Option<i64>,
}

impl OddInput {
    /// Parse a JSON request body.
    ///
    /// # Errors
    ///
    /// [`DomainError::Validation`] on malformed JSON or unknown fields.
    pub fn from_json(body: &str) -> Result<Self, DomainError> {
        serde_json::from_str(body).map_err(|e| DomainError::validation("body", e.to_string()))
    }

    /// Build the details of a new odds record.
    ///
    /// # Errors
    ///
    /// [`DomainError::Validation`] naming the first missing or invalid field.
    pub fn into_details(self) -> Result<OddDetails, DomainError> {
        let event_date_time = self
            .event_date_time
            .ok_or_else(|| DomainError::validation("eventDateTime", "is required"))
            .and_then(|raw| parse_event_time(&raw))?;

        Ok(OddDetails {
            event_date_time,
            league: required_text("league", self.league)?,
            home_team: required_text("homeTeam", self.home_team)?,
            away_team: required_text("awayTeam", self.away_team)?,
            suspend_all: self.suspend_all.unwrap_or(false),
            odds: self.odds.unwrap_or_default(),
        })
    }

    /// Overwrite the fields present in this input.
    ///
    /// Returns whether the bookie mapping was replaced.
    ///
    /// # Errors
    ///
    /// [`DomainError::Validation`] if a present field is invalid or the
    /// input carries an `order`.
    pub fn apply_to(self, details: &mut OddDetails) -> Result<bool, DomainError> {
        if self.order.is_some() {
            return Err(DomainError::validation(
                "order",
                "cannot be set on update; use reorder",
            ));
        }
        if let Some(raw) = self.event_date_time {
            details.event_date_time = parse_event_time(&raw)?;
        }
        if let Some(league) = self.league {
            details.league = non_empty("league", league)?;
        }
        if let Some(home) = self.home_team {
            details.home_team = non_empty("homeTeam", home)?;
        }
        if let Some(away) = self.away_team {
            details.away_team = non_empty("awayTeam", away)?;
        }
        if let Some(suspend_all) = self.suspend_all {
            details.suspend_all = suspend_all;
        }
        let replaced = self.odds.is_some();
        if let Some(odds) = self.odds {
            details.odds = odds;
        }
        Ok(replaced)
    }
}

fn parse_event_time(raw: &str) -> Result<DateTime<Utc>, DomainError> {
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| DomainError::validation("eventDateTime", format!("not RFC 3339: {e}")))
}
