use std::path::{Path, PathBuf};
use std::sync::Arc;

use oddsboard::adapter::outbound::sqlite::database::connection::{
    create_pool_with_options, run_migrations, DbPool,
};
use oddsboard::adapter::outbound::sqlite::SqliteEntityStore;
use oddsboard::testkit;
use tempfile::TempDir;

/// Temporary file-backed SQLite database for integration tests.
///
/// The directory, WAL and shared-memory files included, is removed on drop.
pub struct TempDb {
    _dir: TempDir,
    path: PathBuf,
    pool: DbPool,
}

impl TempDb {
    pub fn create(name: &str, pool_size: u32) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join(format!("oddsboard-{name}.db"));

        let mut db = testkit::config::database_at(&path);
        db.pool_size = pool_size;
        let pool = create_pool_with_options(&db.path, db.pool_size, db.connection_options())
            .expect("create sqlite pool");
        run_migrations(&pool).expect("run migrations");

        Self {
            _dir: dir,
            path,
            pool,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn store(&self) -> Arc<SqliteEntityStore> {
        Arc::new(SqliteEntityStore::new(self.pool.clone()))
    }
}
