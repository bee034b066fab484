//! Database model types for Diesel ORM.
//!
//! Scalar columns carry what queries filter or sort on; the remaining
//! entity fields travel as JSON text.

use diesel::prelude::*;

use super::schema::{odds, offers};

/// Database row for an offer.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = offers)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct OfferRow {
    pub id: String,
    pub sort_order: i64,
    pub name: String,
    pub enabled: bool,
    pub details_json: String,
}

/// Every offer column except identity and order.
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = offers)]
pub struct OfferChangeset {
    pub name: String,
    pub enabled: bool,
    pub details_json: String,
}

impl From<&OfferRow> for OfferChangeset {
    fn from(row: &OfferRow) -> Self {
        Self {
            name: row.name.clone(),
            enabled: row.enabled,
            details_json: row.details_json.clone(),
        }
    }
}

/// Database row for an odds record.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = odds)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct OddRow {
    pub id: String,
    pub sort_order: i64,
    pub event_date_time: String,
    pub suspend_all: bool,
    pub details_json: String,
    pub best_odds_json: String,
}

/// Every odds column except identity and order.
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = odds)]
pub struct OddChangeset {
    pub event_date_time: String,
    pub suspend_all: bool,
    pub details_json: String,
    pub best_odds_json: String,
}

impl From<&OddRow> for OddChangeset {
    fn from(row: &OddRow) -> Self {
        Self {
            event_date_time: row.event_date_time.clone(),
            suspend_all: row.suspend_all,
            details_json: row.details_json.clone(),
            best_odds_json: row.best_odds_json.clone(),
        }
    }
}
