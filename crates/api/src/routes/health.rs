//! Health check endpoint handlers.

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use sqlx::PgPool;
use std::time::Instant;

use crate::app::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub storage: StorageHealth,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct StorageHealth {
    /// `postgres` or `in-memory`.
    pub backend: &'static str,
    pub connected: bool,
    pub latency_ms: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: String,
}

async fn probe(pool: Option<&PgPool>) -> StorageHealth {
    let Some(pool) = pool else {
        return StorageHealth {
            backend: "in-memory",
            connected: true,
            latency_ms: None,
        };
    };

    let start = Instant::now();
    let connected = sqlx::query("SELECT 1").execute(pool).await.is_ok();
    StorageHealth {
        backend: "postgres",
        connected,
        latency_ms: connected.then(|| start.elapsed().as_millis() as u64),
    }
}

/// Full health check including document store connectivity.
pub async fn health_check(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, StatusCode> {
    let storage = probe(state.pool.as_ref()).await;
    if !storage.connected {
        tracing::warn!("Health check failed: database unreachable");
        return Err(StatusCode::SERVICE_UNAVAILABLE);
    }

    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        storage,
    }))
}

pub async fn live() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "alive".to_string(),
    })
}

/// Ready once the document store answers.
pub async fn ready(State(state): State<AppState>) -> Result<Json<StatusResponse>, StatusCode> {
    if probe(state.pool.as_ref()).await.connected {
        Ok(Json(StatusResponse {
            status: "ready".to_string(),
        }))
    } else {
        Err(StatusCode::SERVICE_UNAVAILABLE)
    }
}
