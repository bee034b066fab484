//! Persistence port for ordered offers and odds.
//!
//! The store knows nothing about ordering rules. It offers point lookup,
//! order-sorted range reads, counts and a bulk "shift every order in a
//! span" update, and it guarantees that everything done inside one
//! [`EntityStore::transaction`] call commits or rolls back together.
//!
//! # Implementation Notes
//!
//! - Transactions on the same store must be serialized against each other
//!   (SQLite: `BEGIN IMMEDIATE`; memory: one mutex).
//! - Work passed to a transaction is synchronous; it must not block on
//!   anything but the store itself.
//! - `update` never writes `order`; only `set_order` and `shift_orders` do.

use std::future::Future;

use chrono::{DateTime, Utc};

use crate::domain::order::OrderSpan;
use crate::domain::{Collection, Entity, EntityId, Visibility};
use crate::error::Result;

/// Operations valid inside one atomic unit of work.
pub trait StoreTransaction {
    /// Number of entities in `collection` admitted by `visibility`.
    fn count(&mut self, collection: Collection, visibility: Visibility) -> Result<i64>;

    /// Entities sorted ascending by order, skipping `offset`, at most `limit`.
    fn find_sorted(
        &mut self,
        collection: Collection,
        visibility: Visibility,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Entity>>;

    /// Every entity in `collection`, sorted by order.
    fn find_all(&mut self, collection: Collection) -> Result<Vec<Entity>> {
        self.find_sorted(collection, Visibility::All, i64::MAX, 0)
    }

    /// Ids of odds whose event starts strictly before `before`, sorted by order.
    fn find_odds_started_before(&mut self, before: DateTime<Utc>) -> Result<Vec<EntityId>>;

    /// Point lookup.
    fn find_by_id(&mut self, collection: Collection, id: &EntityId) -> Result<Option<Entity>>;

    /// Persist a new entity with the id and order it carries.
    fn insert(&mut self, entity: &Entity) -> Result<()>;

    /// Overwrite every field except `order`. Returns false if absent.
    fn update(&mut self, entity: &Entity) -> Result<bool>;

    /// Set one entity's order. Returns false if absent.
    fn set_order(&mut self, collection: Collection, id: &EntityId, order: i64) -> Result<bool>;

    /// Add `delta` to the order of every entity whose order lies in `span`.
    /// Returns the number of entities changed.
    fn shift_orders(&mut self, collection: Collection, span: OrderSpan, delta: i64)
        -> Result<usize>;

    /// Remove an entity. Returns false if absent.
    fn delete(&mut self, collection: Collection, id: &EntityId) -> Result<bool>;
}

/// A persistent entity store with transactional scopes.
pub trait EntityStore: Send + Sync {
    /// Run `work` as one write transaction.
    ///
    /// If `work` returns an error, or committing fails, nothing it wrote is
    /// kept. Store-level failures surface as
    /// [`Error::TransactionFailure`](crate::error::Error::TransactionFailure);
    /// errors raised by `work` itself are returned unchanged.
    fn transaction<T, F>(&self, work: F) -> impl Future<Output = Result<T>> + Send
    where
        T: Send,
        F: FnOnce(&mut dyn StoreTransaction) -> Result<T> + Send;

    /// Run read-only `work` against a consistent snapshot.
    fn snapshot<T, F>(&self, work: F) -> impl Future<Output = Result<T>> + Send
    where
        T: Send,
        F: FnOnce(&mut dyn StoreTransaction) -> Result<T> + Send;
}
