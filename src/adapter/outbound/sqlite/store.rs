//! SQLite entity store implementation.
//!
//! Write transactions open with `BEGIN IMMEDIATE`, which takes the database
//! write lock up front. Two reorders therefore never interleave their
//! read-then-shift steps, whichever pooled connection they run on.

use chrono::{DateTime, SecondsFormat, Utc};
use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::warn;

use crate::adapter::outbound::sqlite::database::connection::DbPool;
use crate::adapter::outbound::sqlite::database::model::{
    OddChangeset, OddRow, OfferChangeset, OfferRow,
};
use crate::adapter::outbound::sqlite::database::schema::{odds, offers};
use crate::domain::order::OrderSpan;
use crate::domain::{
    BestCalculatedOdds, Collection, Entity, EntityId, Odd, OddDetails, Offer, OfferDetails,
    Visibility,
};
use crate::error::{Error, Result};
use crate::port::outbound::store::{EntityStore, StoreTransaction};

/// SQLite-backed entity store.
///
/// Implements the [`EntityStore`] trait over a Diesel connection pool.
#[derive(Clone)]
pub struct SqliteEntityStore {
    /// Database connection pool.
    pool: DbPool,
}

impl SqliteEntityStore {
    /// Create a new SQLite entity store with the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn connection(
        &self,
    ) -> Result<diesel::r2d2::PooledConnection<diesel::r2d2::ConnectionManager<SqliteConnection>>>
    {
        self.pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))
    }
}

/// Store failures inside a transaction abort it; report them as such.
fn abort_reason(err: Error) -> Error {
    match err {
        Error::Database(reason) => Error::TransactionFailure(reason),
        other => other,
    }
}

impl EntityStore for SqliteEntityStore {
    async fn transaction<T, F>(&self, work: F) -> Result<T>
    where
        T: Send,
        F: FnOnce(&mut dyn StoreTransaction) -> Result<T> + Send,
    {
        let mut conn = self.connection()?;
        conn.immediate_transaction(|conn| work(&mut SqliteTransaction { conn }))
            .map_err(|e| {
                if !e.is_rejection() {
                    warn!(error = %e, "Entity transaction rolled back");
                }
                abort_reason(e)
            })
    }

    async fn snapshot<T, F>(&self, work: F) -> Result<T>
    where
        T: Send,
        F: FnOnce(&mut dyn StoreTransaction) -> Result<T> + Send,
    {
        let mut conn = self.connection()?;
        conn.transaction(|conn| work(&mut SqliteTransaction { conn }))
    }
}

/// [`StoreTransaction`] over a connection that is inside a transaction.
struct SqliteTransaction<'c> {
    conn: &'c mut SqliteConnection,
}

fn offer_to_row(offer: &Offer) -> Result<OfferRow> {
    Ok(OfferRow {
        id: offer.id.to_string(),
        sort_order: offer.order,
        name: offer.details.name.clone(),
        enabled: offer.details.enabled,
        details_json: serde_json::to_string(&offer.details)?,
    })
}

fn offer_from_row(row: OfferRow) -> Result<Offer> {
    let details: OfferDetails =
        serde_json::from_str(&row.details_json).map_err(|e| Error::Parse(e.to_string()))?;
    Ok(Offer {
        id: EntityId::from(row.id),
        order: row.sort_order,
        details,
    })
}

/// Fixed-width UTC text, so string order in SQLite is time order.
fn event_column(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

fn odd_to_row(odd: &Odd) -> Result<OddRow> {
    Ok(OddRow {
        id: odd.id.to_string(),
        sort_order: odd.order,
        event_date_time: event_column(odd.details.event_date_time),
        suspend_all: odd.details.suspend_all,
        details_json: serde_json::to_string(&odd.details)?,
        best_odds_json: serde_json::to_string(&odd.best_calculated_odds)?,
    })
}

fn odd_from_row(row: OddRow) -> Result<Odd> {
    let details: OddDetails =
        serde_json::from_str(&row.details_json).map_err(|e| Error::Parse(e.to_string()))?;
    let best_calculated_odds: BestCalculatedOdds =
        serde_json::from_str(&row.best_odds_json).map_err(|e| Error::Parse(e.to_string()))?;
    Ok(Odd {
        id: EntityId::from(row.id),
        order: row.sort_order,
        details,
        best_calculated_odds,
    })
}

impl StoreTransaction for SqliteTransaction<'_> {
    fn count(&mut self, collection: Collection, visibility: Visibility) -> Result<i64> {
        let count = match (collection, visibility) {
            (Collection::Offers, Visibility::All) => offers::table.count().get_result(self.conn)?,
            (Collection::Offers, Visibility::ActiveOnly) => offers::table
                .filter(offers::enabled.eq(true))
                .count()
                .get_result(self.conn)?,
            (Collection::Odds, Visibility::All) => odds::table.count().get_result(self.conn)?,
            (Collection::Odds, Visibility::ActiveOnly) => odds::table
                .filter(odds::suspend_all.eq(false))
                .count()
                .get_result(self.conn)?,
        };
        Ok(count)
    }

    fn find_sorted(
        &mut self,
        collection: Collection,
        visibility: Visibility,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Entity>> {
        match collection {
            Collection::Offers => {
                let mut query = offers::table
                    .select(OfferRow::as_select())
                    .order(offers::sort_order.asc())
                    .then_order_by(offers::id.asc())
                    .limit(limit)
                    .offset(offset)
                    .into_boxed();
                if visibility == Visibility::ActiveOnly {
                    query = query.filter(offers::enabled.eq(true));
                }
                let rows: Vec<OfferRow> = query.load(self.conn)?;
                rows.into_iter()
                    .map(|row| offer_from_row(row).map(Entity::Offer))
                    .collect()
            }
            Collection::Odds => {
                let mut query = odds::table
                    .select(OddRow::as_select())
                    .order(odds::sort_order.asc())
                    .then_order_by(odds::id.asc())
                    .limit(limit)
                    .offset(offset)
                    .into_boxed();
                if visibility == Visibility::ActiveOnly {
                    query = query.filter(odds::suspend_all.eq(false));
                }
                let rows: Vec<OddRow> = query.load(self.conn)?;
                rows.into_iter()
                    .map(|row| odd_from_row(row).map(Entity::Odd))
                    .collect()
            }
        }
    }

    fn find_odds_started_before(&mut self, before: DateTime<Utc>) -> Result<Vec<EntityId>> {
        let ids: Vec<String> = odds::table
            .filter(odds::event_date_time.lt(event_column(before)))
            .select(odds::id)
            .order(odds::sort_order.asc())
            .then_order_by(odds::id.asc())
            .load(self.conn)?;
        Ok(ids.into_iter().map(EntityId::from).collect())
    }

    fn find_by_id(&mut self, collection: Collection, id: &EntityId) -> Result<Option<Entity>> {
        match collection {
            Collection::Offers => {
                let row: Option<OfferRow> = offers::table
                    .find(id.as_str())
                    .select(OfferRow::as_select())
                    .first(self.conn)
                    .optional()?;
                row.map(|r| offer_from_row(r).map(Entity::Offer)).transpose()
            }
            Collection::Odds => {
                let row: Option<OddRow> = odds::table
                    .find(id.as_str())
                    .select(OddRow::as_select())
                    .first(self.conn)
                    .optional()?;
                row.map(|r| odd_from_row(r).map(Entity::Odd)).transpose()
            }
        }
    }

    fn insert(&mut self, entity: &Entity) -> Result<()> {
        match entity {
            Entity::Offer(offer) => {
                diesel::insert_into(offers::table)
                    .values(&offer_to_row(offer)?)
                    .execute(self.conn)?;
            }
            Entity::Odd(odd) => {
                diesel::insert_into(odds::table)
                    .values(&odd_to_row(odd)?)
                    .execute(self.conn)?;
            }
        }
        Ok(())
    }

    fn update(&mut self, entity: &Entity) -> Result<bool> {
        let updated = match entity {
            Entity::Offer(offer) => {
                let row = offer_to_row(offer)?;
                diesel::update(offers::table.find(row.id.as_str()))
                    .set(OfferChangeset::from(&row))
                    .execute(self.conn)?
            }
            Entity::Odd(odd) => {
                let row = odd_to_row(odd)?;
                diesel::update(odds::table.find(row.id.as_str()))
                    .set(OddChangeset::from(&row))
                    .execute(self.conn)?
            }
        };
        Ok(updated > 0)
    }

    fn set_order(&mut self, collection: Collection, id: &EntityId, order: i64) -> Result<bool> {
        let updated = match collection {
            Collection::Offers => diesel::update(offers::table.find(id.as_str()))
                .set(offers::sort_order.eq(order))
                .execute(self.conn)?,
            Collection::Odds => diesel::update(odds::table.find(id.as_str()))
                .set(odds::sort_order.eq(order))
                .execute(self.conn)?,
        };
        Ok(updated > 0)
    }

    fn shift_orders(
        &mut self,
        collection: Collection,
        span: OrderSpan,
        delta: i64,
    ) -> Result<usize> {
        let upper = span.to.unwrap_or(i64::MAX);
        let shifted = match collection {
            Collection::Offers => diesel::update(
                offers::table
                    .filter(offers::sort_order.ge(span.from))
                    .filter(offers::sort_order.le(upper)),
            )
            .set(offers::sort_order.eq(offers::sort_order + delta))
            .execute(self.conn)?,
            Collection::Odds => diesel::update(
                odds::table
                    .filter(odds::sort_order.ge(span.from))
                    .filter(odds::sort_order.le(upper)),
            )
            .set(odds::sort_order.eq(odds::sort_order + delta))
            .execute(self.conn)?,
        };
        Ok(shifted)
    }

    fn delete(&mut self, collection: Collection, id: &EntityId) -> Result<bool> {
        let deleted = match collection {
            Collection::Offers => {
                diesel::delete(offers::table.find(id.as_str())).execute(self.conn)?
            }
            Collection::Odds => diesel::delete(odds::table.find(id.as_str())).execute(self.conn)?,
        };
        Ok(deleted > 0)
    }
}
