//! Infrastructure bootstrap helpers for wiring the catalog.

use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::adapter::outbound::sqlite::database::connection::{
    create_pool_with_options, run_migrations,
};
use crate::adapter::outbound::sqlite::SqliteEntityStore;
use crate::application::catalog::CatalogService;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;

/// Open (creating if needed) and migrate the configured database.
///
/// # Errors
///
/// Fails if the parent directory cannot be created, the pool cannot be
/// opened, or migrations fail.
pub fn init_store(config: &Config) -> Result<SqliteEntityStore> {
    let db = &config.database;
    if let Some(parent) = Path::new(&db.path).parent() {
        if !parent.as_os_str().is_empty() && !db.path.contains(":memory:") {
            std::fs::create_dir_all(parent)?;
        }
    }

    let pool = create_pool_with_options(&db.path, db.pool_size, db.connection_options())?;
    run_migrations(&pool)?;
    info!(path = %db.path, pool_size = db.pool_size, "Database ready");
    Ok(SqliteEntityStore::new(pool))
}

/// Build the catalog service over the configured SQLite store.
///
/// # Errors
///
/// See [`init_store`].
pub fn build_catalog(config: &Config) -> Result<CatalogService<SqliteEntityStore>> {
    let store = init_store(config)?;
    Ok(CatalogService::new(Arc::new(store), config.listing.into()))
}
