//! Insert, delete-with-compaction and move-to-position.
//!
//! Every operation reads the state it depends on, plans the shift and
//! applies it inside one store transaction. The `*_in` functions take an
//! open transaction so callers can fold several position changes into a
//! single atomic unit.

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::order::{self, InsertPlan, MovePlan, Shift};
use crate::domain::{Collection, Entity, EntityId, Visibility};
use crate::error::{Error, Result};
use crate::port::outbound::store::{EntityStore, StoreTransaction};

/// Sole writer of the `order` field.
pub struct PositionManager<S> {
    store: Arc<S>,
}

impl<S> Clone for PositionManager<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: EntityStore> PositionManager<S> {
    /// Create a manager over `store`.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// The underlying store.
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Append `entity`, or place it at `explicit` when given.
    ///
    /// # Errors
    ///
    /// `InvalidOrder` if `explicit` is outside `1..=N + 1`.
    pub async fn insert(&self, entity: Entity, explicit: Option<i64>) -> Result<Entity> {
        self.store
            .transaction(move |tx| insert_in(tx, entity, explicit))
            .await
    }

    /// Remove an entity and close the gap it leaves.
    ///
    /// # Errors
    ///
    /// `NotFound` if `id` does not resolve.
    pub async fn delete(&self, collection: Collection, id: &EntityId) -> Result<Entity> {
        self.store
            .transaction(|tx| delete_in(tx, collection, id))
            .await
    }

    /// Move an entity to `target`, shifting everything in between by one.
    ///
    /// # Errors
    ///
    /// `NotFound` if `id` does not resolve, `InvalidOrder` if `target` is
    /// outside `1..=N`.
    pub async fn move_to(
        &self,
        collection: Collection,
        id: &EntityId,
        target: i64,
    ) -> Result<Entity> {
        self.store
            .transaction(|tx| move_in(tx, collection, id, target))
            .await
    }
}

fn apply_shift(tx: &mut dyn StoreTransaction, collection: Collection, shift: Shift) -> Result<()> {
    let shifted = tx.shift_orders(collection, shift.span, shift.delta)?;
    debug!(
        collection = %collection,
        from = shift.span.from,
        to = ?shift.span.to,
        delta = shift.delta,
        shifted,
        "Shifted orders"
    );
    Ok(())
}

/// Insert inside an open transaction. The entity's own `order` is ignored.
///
/// # Errors
///
/// `InvalidOrder` if `explicit` is outside `1..=N + 1`.
pub fn insert_in(
    tx: &mut dyn StoreTransaction,
    mut entity: Entity,
    explicit: Option<i64>,
) -> Result<Entity> {
    let collection = entity.collection();
    let len = tx.count(collection, Visibility::All)?;
    let plan = order::plan_insert(explicit, len)?;

    let append = match plan {
        InsertPlan::Append(append) | InsertPlan::AppendThenMove { append, .. } => append,
    };
    entity.set_order(append);
    tx.insert(&entity)?;

    if let InsertPlan::AppendThenMove { target, .. } = plan {
        let id = entity.id().clone();
        entity = move_in(tx, collection, &id, target)?;
    }

    info!(
        collection = %collection,
        id = %entity.id(),
        order = entity.order(),
        "Inserted entity"
    );
    Ok(entity)
}

/// Delete inside an open transaction. Returns the removed entity.
///
/// # Errors
///
/// `NotFound` if `id` does not resolve.
pub fn delete_in(
    tx: &mut dyn StoreTransaction,
    collection: Collection,
    id: &EntityId,
) -> Result<Entity> {
    let entity = tx
        .find_by_id(collection, id)?
        .ok_or_else(|| Error::not_found(collection, id))?;

    if !tx.delete(collection, id)? {
        return Err(Error::not_found(collection, id));
    }
    apply_shift(tx, collection, order::plan_delete(entity.order()))?;

    info!(
        collection = %collection,
        id = %id,
        order = entity.order(),
        "Deleted entity"
    );
    Ok(entity)
}

/// Move inside an open transaction. Returns the entity at its new order.
///
/// # Errors
///
/// `NotFound` if `id` does not resolve, `InvalidOrder` if `target` is
/// outside `1..=N`.
pub fn move_in(
    tx: &mut dyn StoreTransaction,
    collection: Collection,
    id: &EntityId,
    target: i64,
) -> Result<Entity> {
    let mut entity = tx
        .find_by_id(collection, id)?
        .ok_or_else(|| Error::not_found(collection, id))?;
    let len = tx.count(collection, Visibility::All)?;

    match order::plan_move(entity.order(), target, len)? {
        MovePlan::Unchanged => {
            debug!(collection = %collection, id = %id, order = target, "Move is a no-op");
        }
        MovePlan::Relocate { shift, target } => {
            apply_shift(tx, collection, shift)?;
            tx.set_order(collection, id, target)?;
            info!(
                collection = %collection,
                id = %id,
                from = entity.order(),
                to = target,
                "Moved entity"
            );
            entity.set_order(target);
        }
    }
    Ok(entity)
}
