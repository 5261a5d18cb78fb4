//! Storage layer for projects and tasks.
//!
//! [`repositories`] hold the SQL, [`store`] exposes the backend-agnostic
//! [`store::TodoStore`] trait that HTTP handlers depend on.

pub mod config;
pub mod models;
pub mod repositories;
pub mod store;

use sqlx::postgres::PgPoolOptions;
use todo_core::retry::RetryPolicy;

use crate::config::DbConfig;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool, opening one connection eagerly so an
/// unreachable server surfaces here rather than on the first request.
pub async fn create_pool(config: &DbConfig) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(config.connect_options()?)
        .await
}

/// Create a connection pool, retrying according to `policy`.
pub async fn connect_with_retry(
    config: &DbConfig,
    policy: &RetryPolicy,
) -> Result<DbPool, sqlx::Error> {
    policy
        .run("Database connection", |attempt| {
            tracing::info!(attempt, target = %config.describe(), "Trying connection to the database");
            create_pool(config)
        })
        .await
}

/// Round-trip a trivial query to verify the pool can reach the server.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply the embedded migrations in `crates/db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
