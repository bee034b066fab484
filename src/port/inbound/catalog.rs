//! Catalog port: the operations inbound adapters drive.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Collection, Entity, EntityId, EntityInput, Page, PageRequest};
use crate::error::Result;

/// Ranked listing and maintenance of offers and odds.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// One page of `collection`, sorted by order.
    async fn list_page(&self, collection: Collection, request: PageRequest) -> Result<Page<Entity>>;

    /// Point lookup.
    async fn get(&self, collection: Collection, id: &EntityId) -> Result<Entity>;

    /// Validate and store a new entity. Odds get their best prices computed.
    async fn create(&self, input: EntityInput) -> Result<Entity>;

    /// Overwrite the fields present in `input`. Never touches order.
    async fn update(&self, id: &EntityId, input: EntityInput) -> Result<Entity>;

    /// Remove an entity and compact the orders behind it.
    async fn delete(&self, collection: Collection, id: &EntityId) -> Result<Entity>;

    /// Move an entity to `order`.
    async fn reorder(&self, collection: Collection, id: &EntityId, order: i64) -> Result<Entity>;

    /// Delete every odds record whose event started before `now`.
    async fn prune_outdated(&self, now: DateTime<Utc>) -> Result<usize>;
}
