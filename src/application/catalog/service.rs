//! Catalog service.
//!
//! Composes the position manager with the best-odds aggregator. Input is
//! validated and best prices are computed before a transaction opens, so
//! a rejected request writes nothing.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::application::position::manager::{delete_in, PositionManager};
use crate::domain::{Collection, Entity, EntityId, EntityInput, Odd, Offer, Page, PageRequest};
use crate::error::{Error, Result};
use crate::port::inbound::catalog::Catalog;
use crate::port::outbound::store::{EntityStore, StoreTransaction};

/// Tunables for the catalog service.
#[derive(Debug, Clone, Copy)]
pub struct CatalogConfig {
    /// Largest accepted `pageSize`.
    pub max_page_size: i64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self { max_page_size: 100 }
    }
}

/// [`Catalog`] implementation over any [`EntityStore`].
pub struct CatalogService<S> {
    config: CatalogConfig,
    positions: PositionManager<S>,
}

impl<S: EntityStore> CatalogService<S> {
    pub fn new(store: Arc<S>, config: CatalogConfig) -> Self {
        Self {
            config,
            positions: PositionManager::new(store),
        }
    }

    fn store(&self) -> &S {
        self.positions.store()
    }
}

/// Build a new, unranked entity from create input.
fn new_entity(input: EntityInput) -> Result<(Entity, Option<i64>)> {
    let order = input.order();
    let entity = match input {
        EntityInput::Offer(input) => Entity::Offer(Offer {
            id: EntityId::generate(),
            order: 0,
            details: input.into_details()?,
        }),
        EntityInput::Odd(input) => {
            let details = input.into_details()?;
            let best_calculated_odds = details.best_odds()?;
            Entity::Odd(Odd {
                id: EntityId::generate(),
                order: 0,
                details,
                best_calculated_odds,
            })
        }
    };
    Ok((entity, order))
}

/// Apply `input` to the stored entity it names.
fn patch_in(tx: &mut dyn StoreTransaction, id: &EntityId, input: EntityInput) -> Result<Entity> {
    let collection = input.collection();
    let current = tx
        .find_by_id(collection, id)?
        .ok_or_else(|| Error::not_found(collection, id))?;

    let patched = match (current, input) {
        (Entity::Offer(mut offer), EntityInput::Offer(input)) => {
            input.apply_to(&mut offer.details)?;
            Entity::Offer(offer)
        }
        (Entity::Odd(mut odd), EntityInput::Odd(input)) => {
            let replaced = input.apply_to(&mut odd.details)?;
            odd.best_calculated_odds = odd.details.best_odds()?;
            debug!(id = %id, odds_replaced = replaced, "Recomputed best odds");
            Entity::Odd(odd)
        }
        _ => return Err(Error::not_found(collection, id)),
    };

    if !tx.update(&patched)? {
        return Err(Error::not_found(collection, id));
    }
    Ok(patched)
}

/// Drop `bookie` from every odds record that prices it.
fn remove_bookie_in(tx: &mut dyn StoreTransaction, bookie: &str) -> Result<usize> {
    let mut touched = 0;
    for entity in tx.find_all(Collection::Odds)? {
        let Entity::Odd(mut odd) = entity else {
            continue;
        };
        if odd.remove_bookie(bookie)? {
            let id = odd.id.clone();
            if !tx.update(&Entity::Odd(odd))? {
                return Err(Error::not_found(Collection::Odds, &id));
            }
            touched += 1;
        }
    }
    Ok(touched)
}

#[async_trait]
impl<S: EntityStore + 'static> Catalog for CatalogService<S> {
    async fn list_page(&self, collection: Collection, request: PageRequest) -> Result<Page<Entity>> {
        let request = request.capped(self.config.max_page_size)?;
        self.store()
            .snapshot(|tx| {
                let total = tx.count(collection, request.visibility())?;
                let items = tx.find_sorted(
                    collection,
                    request.visibility(),
                    request.page_size(),
                    request.offset(),
                )?;
                Ok(Page::new(&request, items, total))
            })
            .await
    }

    async fn get(&self, collection: Collection, id: &EntityId) -> Result<Entity> {
        self.store()
            .snapshot(|tx| tx.find_by_id(collection, id))
            .await?
            .ok_or_else(|| Error::not_found(collection, id))
    }

    async fn create(&self, input: EntityInput) -> Result<Entity> {
        let (entity, order) = new_entity(input)?;
        self.positions.insert(entity, order).await
    }

    async fn update(&self, id: &EntityId, input: EntityInput) -> Result<Entity> {
        let collection = input.collection();
        let updated = self
            .store()
            .transaction(|tx| patch_in(tx, id, input))
            .await?;
        info!(collection = %collection, id = %id, "Updated entity");
        Ok(updated)
    }

    async fn delete(&self, collection: Collection, id: &EntityId) -> Result<Entity> {
        self.store()
            .transaction(|tx| {
                let removed = delete_in(tx, collection, id)?;
                if let Entity::Offer(offer) = &removed {
                    let touched = remove_bookie_in(tx, &offer.details.name)?;
                    if touched > 0 {
                        info!(bookie = %offer.details.name, odds = touched, "Removed bookie from odds");
                    }
                }
                Ok(removed)
            })
            .await
    }

    async fn reorder(&self, collection: Collection, id: &EntityId, order: i64) -> Result<Entity> {
        self.positions.move_to(collection, id, order).await
    }

    async fn prune_outdated(&self, now: DateTime<Utc>) -> Result<usize> {
        let pruned = self
            .store()
            .transaction(|tx| {
                let outdated = tx.find_odds_started_before(now)?;
                for id in &outdated {
                    delete_in(tx, Collection::Odds, id)?;
                }
                Ok(outdated.len())
            })
            .await?;
        info!(pruned, before = %now, "Pruned outdated odds");
        Ok(pruned)
    }
}
