//! Database connection management using Diesel ORM.
//!
//! Provides connection pooling, migration support, and per-connection
//! pragmas for SQLite databases.

use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool};
use diesel::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

use crate::error::{Error, Result};

/// Embedded database migrations compiled from the migrations/ directory.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Type alias for a SQLite connection pool.
pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;

/// Default time a writer waits for the database lock.
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5000;

/// Pragmas applied to every pooled connection when it is opened.
#[derive(Debug, Clone, Copy)]
pub struct ConnectionOptions {
    /// Milliseconds to wait on a locked database before failing.
    pub busy_timeout_ms: u64,
    /// Switch file databases to write-ahead logging.
    pub wal: bool,
}

impl Default for ConnectionOptions {
    fn default() -> Self {
        Self {
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
            wal: true,
        }
    }
}

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionOptions {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> std::result::Result<(), diesel::r2d2::Error> {
        diesel::sql_query(format!("PRAGMA busy_timeout={}", self.busy_timeout_ms))
            .execute(conn)
            .map_err(diesel::r2d2::Error::QueryError)?;
        if self.wal {
            diesel::sql_query("PRAGMA journal_mode=WAL")
                .execute(conn)
                .map_err(diesel::r2d2::Error::QueryError)?;
        }
        Ok(())
    }
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

/// Create a connection pool for the given database URL.
///
/// In-memory databases are private to a connection, so their pool is
/// capped at one connection.
///
/// # Errors
/// Returns an error if the pool cannot be created.
pub fn create_pool(database_url: &str, max_size: u32) -> Result<DbPool> {
    create_pool_with_options(database_url, max_size, ConnectionOptions::default())
}

/// Create a connection pool with explicit connection pragmas.
///
/// # Errors
/// Returns an error if the pool cannot be created.
pub fn create_pool_with_options(
    database_url: &str,
    max_size: u32,
    mut options: ConnectionOptions,
) -> Result<DbPool> {
    let in_memory = is_in_memory(database_url);
    if in_memory {
        options.wal = false;
    }
    let max_size = if in_memory { 1 } else { max_size.max(1) };

    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    Pool::builder()
        .max_size(max_size)
        .connection_customizer(Box::new(options))
        .build(manager)
        .map_err(|e| Error::Connection(e.to_string()))
}

/// Run all pending database migrations.
///
/// # Errors
/// Returns an error if migrations fail.
pub fn run_migrations(pool: &DbPool) -> Result<()> {
    let mut conn = pool.get().map_err(|e| Error::Connection(e.to_string()))?;
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| Error::Connection(e.to_string()))?;
    Ok(())
}
