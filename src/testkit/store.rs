//! Ready-made stores for tests.

use std::sync::Arc;

use crate::adapter::outbound::memory::MemoryStore;
use crate::adapter::outbound::sqlite::database::connection::{create_pool, run_migrations};
use crate::adapter::outbound::sqlite::SqliteEntityStore;
use crate::application::catalog::{CatalogConfig, CatalogService};
use crate::domain::{Collection, Entity};
use crate::error::Result;
use crate::port::outbound::store::EntityStore;

/// Migrated SQLite store backed by a private in-memory database.
///
/// # Errors
///
/// Fails if the pool cannot be opened or migrations fail.
pub fn sqlite_memory_store() -> Result<SqliteEntityStore> {
    let pool = create_pool(":memory:", 1)?;
    run_migrations(&pool)?;
    Ok(SqliteEntityStore::new(pool))
}

/// Catalog over a fresh memory store, plus the store for inspection.
pub fn memory_catalog() -> (Arc<MemoryStore>, CatalogService<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let catalog = CatalogService::new(Arc::clone(&store), CatalogConfig::default());
    (store, catalog)
}

/// Every entity in `collection`, sorted by order.
///
/// # Errors
///
/// Propagates store failures.
pub async fn all_entities<S: EntityStore>(store: &S, collection: Collection) -> Result<Vec<Entity>> {
    store.snapshot(|tx| tx.find_all(collection)).await
}

/// `(id, order)` pairs of `collection`, sorted by order.
///
/// # Errors
///
/// Propagates store failures.
pub async fn ranking<S: EntityStore>(store: &S, collection: Collection) -> Result<Vec<(String, i64)>> {
    Ok(all_entities(store, collection)
        .await?
        .into_iter()
        .map(|e| (e.id().to_string(), e.order()))
        .collect())
}
