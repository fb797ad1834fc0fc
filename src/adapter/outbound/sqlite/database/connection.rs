//! Database connection management using Diesel ORM.
//!
//! Provides connection pooling and migration support for SQLite databases.

use diesel::r2d2::{ConnectionManager, Pool};
use diesel::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

use crate::error::StoreError;

/// Embedded database migrations compiled from the migrations/ directory.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Type alias for a SQLite connection pool.
pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;

const MAX_POOL_SIZE: u32 = 5;

/// Create a connection pool for the given database URL.
///
/// An in-memory database exists per connection, so `:memory:` pools are
/// capped at a single connection.
///
/// # Errors
/// Returns an error if the pool cannot be created.
pub fn create_pool(database_url: &str) -> Result<DbPool, StoreError> {
    let max_size = if database_url == ":memory:" {
        1
    } else {
        MAX_POOL_SIZE
    };
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    Pool::builder()
        .max_size(max_size)
        .build(manager)
        .map_err(|e| StoreError::Connection(e.to_string()))
}

/// Run all pending database migrations.
///
/// # Errors
/// Returns an error if migrations fail.
pub fn run_migrations(pool: &DbPool) -> Result<(), StoreError> {
    let mut conn = pool
        .get()
        .map_err(|e| StoreError::Connection(e.to_string()))?;
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| StoreError::Database(e.to_string()))?;
    Ok(())
}

/// Create a pool and bring the schema up to date.
///
/// # Errors
/// Returns an error if the database cannot be opened or migrated.
pub fn open(database_url: &str) -> Result<DbPool, StoreError> {
    let pool = create_pool(database_url)?;
    run_migrations(&pool)?;
    Ok(pool)
}
