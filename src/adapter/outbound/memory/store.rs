//! In-memory entity store.
//!
//! One mutex guards both collections. A transaction works on a copy of the
//! tables and swaps it in only when the work succeeds, so a failed unit of
//! work leaves nothing behind.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use tracing::warn;

use crate::domain::order::OrderSpan;
use crate::domain::{Collection, Entity, EntityId, Visibility};
use crate::error::{Error, Result};
use crate::port::outbound::store::{EntityStore, StoreTransaction};

#[derive(Debug, Clone, Default)]
struct Tables {
    offers: HashMap<EntityId, Entity>,
    odds: HashMap<EntityId, Entity>,
}

impl Tables {
    fn table(&self, collection: Collection) -> &HashMap<EntityId, Entity> {
        match collection {
            Collection::Offers => &self.offers,
            Collection::Odds => &self.odds,
        }
    }

    fn table_mut(&mut self, collection: Collection) -> &mut HashMap<EntityId, Entity> {
        match collection {
            Collection::Offers => &mut self.offers,
            Collection::Odds => &mut self.odds,
        }
    }
}

/// In-memory store for tests and embedders.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    /// Writes the next transactions may perform before failing.
    write_budget: Mutex<Option<usize>>,
}

impl MemoryStore {
    /// Create a new empty memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the store fail the write after the next `writes` successful ones.
    ///
    /// The failure surfaces like a storage error, so the enclosing
    /// transaction rolls back.
    pub fn inject_write_failure(&self, writes: usize) {
        *self.write_budget.lock() = Some(writes);
    }
}

impl EntityStore for MemoryStore {
    async fn transaction<T, F>(&self, work: F) -> Result<T>
    where
        T: Send,
        F: FnOnce(&mut dyn StoreTransaction) -> Result<T> + Send,
    {
        let mut tables = self.tables.lock();
        let mut working = tables.clone();
        let result = work(&mut MemoryTransaction {
            tables: &mut working,
            write_budget: &self.write_budget,
        });
        match result {
            Ok(value) => {
                *tables = working;
                Ok(value)
            }
            Err(Error::Database(reason)) => {
                warn!(error = %reason, "Entity transaction rolled back");
                Err(Error::TransactionFailure(reason))
            }
            Err(e) => Err(e),
        }
    }

    async fn snapshot<T, F>(&self, work: F) -> Result<T>
    where
        T: Send,
        F: FnOnce(&mut dyn StoreTransaction) -> Result<T> + Send,
    {
        let mut copy = self.tables.lock().clone();
        let no_faults = Mutex::new(None);
        work(&mut MemoryTransaction {
            tables: &mut copy,
            write_budget: &no_faults,
        })
    }
}

struct MemoryTransaction<'a> {
    tables: &'a mut Tables,
    write_budget: &'a Mutex<Option<usize>>,
}

impl MemoryTransaction<'_> {
    fn charge_write(&self) -> Result<()> {
        let mut budget = self.write_budget.lock();
        match budget.as_mut() {
            Some(0) => {
                *budget = None;
                Err(Error::Database("injected write failure".into()))
            }
            Some(remaining) => {
                *remaining -= 1;
                Ok(())
            }
            None => Ok(()),
        }
    }

    fn sorted(&self, collection: Collection, visibility: Visibility) -> Vec<&Entity> {
        let mut entities: Vec<&Entity> = self
            .tables
            .table(collection)
            .values()
            .filter(|e| visibility.admits(e.is_disabled()))
            .collect();
        entities.sort_by(|a, b| a.order().cmp(&b.order()).then_with(|| a.id().cmp(b.id())));
        entities
    }
}

impl StoreTransaction for MemoryTransaction<'_> {
    fn count(&mut self, collection: Collection, visibility: Visibility) -> Result<i64> {
        let count = self
            .tables
            .table(collection)
            .values()
            .filter(|e| visibility.admits(e.is_disabled()))
            .count();
        Ok(count as i64)
    }

    fn find_sorted(
        &mut self,
        collection: Collection,
        visibility: Visibility,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Entity>> {
        let skip = usize::try_from(offset.max(0)).unwrap_or(usize::MAX);
        let take = usize::try_from(limit.max(0)).unwrap_or(usize::MAX);
        Ok(self
            .sorted(collection, visibility)
            .into_iter()
            .skip(skip)
            .take(take)
            .cloned()
            .collect())
    }

    fn find_odds_started_before(&mut self, before: DateTime<Utc>) -> Result<Vec<EntityId>> {
        Ok(self
            .sorted(Collection::Odds, Visibility::All)
            .into_iter()
            .filter_map(|e| match e {
                Entity::Odd(odd) if odd.is_outdated(before) => Some(odd.id.clone()),
                _ => None,
            })
            .collect())
    }

    fn find_by_id(&mut self, collection: Collection, id: &EntityId) -> Result<Option<Entity>> {
        Ok(self.tables.table(collection).get(id).cloned())
    }

    fn insert(&mut self, entity: &Entity) -> Result<()> {
        self.charge_write()?;
        let table = self.tables.table_mut(entity.collection());
        if table.contains_key(entity.id()) {
            return Err(Error::Database(format!(
                "duplicate {} id {}",
                entity.collection().singular(),
                entity.id()
            )));
        }
        table.insert(entity.id().clone(), entity.clone());
        Ok(())
    }

    fn update(&mut self, entity: &Entity) -> Result<bool> {
        self.charge_write()?;
        let table = self.tables.table_mut(entity.collection());
        match table.get_mut(entity.id()) {
            Some(stored) => {
                let order = stored.order();
                *stored = entity.clone();
                stored.set_order(order);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn set_order(&mut self, collection: Collection, id: &EntityId, order: i64) -> Result<bool> {
        self.charge_write()?;
        match self.tables.table_mut(collection).get_mut(id) {
            Some(stored) => {
                stored.set_order(order);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn shift_orders(
        &mut self,
        collection: Collection,
        span: OrderSpan,
        delta: i64,
    ) -> Result<usize> {
        self.charge_write()?;
        let mut shifted = 0;
        for entity in self.tables.table_mut(collection).values_mut() {
            let order = entity.order();
            if span.contains(order) {
                entity.set_order(order + delta);
                shifted += 1;
            }
        }
        Ok(shifted)
    }

    fn delete(&mut self, collection: Collection, id: &EntityId) -> Result<bool> {
        self.charge_write()?;
        Ok(self.tables.table_mut(collection).remove(id).is_some())
    }
}
