use axum::extract::State;
use axum::{routing::get, Json, Router};
use catalog_db::DbStatus;
use serde::Serialize;

use crate::state::AppState;

/// Body of `GET /health`.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok` once the database answers and the catalog schema is migrated.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    pub schema_version: Option<i64>,
    pub pool: PoolStats,
}

#[derive(Serialize)]
pub struct PoolStats {
    pub size: u32,
    pub idle: usize,
}

impl From<DbStatus> for HealthResponse {
    fn from(db: DbStatus) -> Self {
        let ready = db.healthy && db.schema_version.is_some();
        Self {
            status: if ready { "ok" } else { "degraded" },
            version: env!("CARGO_PKG_VERSION"),
            db_healthy: db.healthy,
            schema_version: db.schema_version,
            pool: PoolStats {
                size: db.pool_size,
                idle: db.pool_idle,
            },
        }
    }
}

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db = catalog_db::status(&state.pool).await;
    if !db.healthy {
        tracing::warn!("Health check could not reach the database");
    }
    Json(HealthResponse::from(db))
}

/// `/health`, mounted beside `/api` rather than under it.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn db(healthy: bool, schema_version: Option<i64>) -> DbStatus {
        DbStatus {
            healthy,
            schema_version,
            pool_size: 2,
            pool_idle: 1,
        }
    }

    #[test]
    fn migrated_database_is_ok() {
        let health = HealthResponse::from(db(true, Some(20250101000002)));
        assert_eq!(health.status, "ok");
        assert_eq!(health.pool.size, 2);
    }

    #[test]
    fn unmigrated_or_unreachable_database_is_degraded() {
        assert_eq!(HealthResponse::from(db(true, None)).status, "degraded");
        assert_eq!(HealthResponse::from(db(false, None)).status, "degraded");
    }
}
