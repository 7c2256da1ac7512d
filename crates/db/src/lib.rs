//! Database layer: connection pool, migrations, row models and repositories.

use serde::Serialize;
use sqlx::postgres::PgPoolOptions;

pub mod models;
pub mod repositories;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Reachability, schema and pool state reported by `/health`.
#[derive(Debug, Clone, Serialize)]
pub struct DbStatus {
    pub healthy: bool,
    /// Latest successfully applied migration; `None` before the first run.
    pub schema_version: Option<i64>,
    pub pool_size: u32,
    pub pool_idle: usize,
}

/// Probe the database. Never fails: an unreachable database is reported
/// as `healthy: false`.
pub async fn status(pool: &DbPool) -> DbStatus {
    let healthy = health_check(pool).await.is_ok();
    let schema_version = if healthy {
        sqlx::query_scalar::<_, Option<i64>>(
            "SELECT MAX(version) FROM _sqlx_migrations WHERE success",
        )
        .fetch_one(pool)
        .await
        .unwrap_or_else(|err| {
            tracing::warn!(error = %err, "Could not read migration history");
            None
        })
    } else {
        None
    };

    DbStatus {
        healthy,
        schema_version,
        pool_size: pool.size(),
        pool_idle: pool.num_idle(),
    }
}

/// Apply any pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
