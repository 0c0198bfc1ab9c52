//! Relational data layer for the research board.
//!
//! - [`models`]: row structs and input DTOs, one module per entity
//! - [`repositories`]: zero-sized structs with async SQL per table
//! - [`board`]: validated operations returning [`sirn_core::error::CoreError`]
//!
//! Every function takes the pool (or an open transaction) explicitly. The
//! caller owns the pool's lifecycle.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;

pub mod board;
pub mod error;
pub mod models;
pub mod repositories;

pub type DbPool = sqlx::PgPool;

/// Default upper bound on pooled connections.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 20;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await
}

/// Run a trivial query to confirm the store is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply all pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
