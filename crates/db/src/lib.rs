//! Project store for the atelier platform.
//!
//! One entity (`Project`) behind one trait (`ProjectStore`) with two
//! interchangeable backends: an in-process map and a single-table SQLite
//! database. Handler code only ever sees the trait object.

pub mod models;
pub mod store;

pub use store::{MemoryStore, ProjectStore, SqliteStore, StoreError};

pub type DbPool = sqlx::SqlitePool;

/// Create a connection pool from a database URL
/// (e.g. `sqlite://atelier.db` or `sqlite::memory:`).
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    use std::str::FromStr;

    let options = sqlx::sqlite::SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true);

    sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
}

/// Apply embedded migrations.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
