//! Prometheus metrics.
//!
//! HTTP request counters and latency histograms, plus business counters
//! recorded by the route handlers.

use axum::{
    body::Body,
    extract::{MatchedPath, State},
    http::{header, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use domain::models::Tier;
use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;
use std::time::Instant;

use crate::app::AppState;

static PROMETHEUS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

const LATENCY_BUCKETS: &[f64] = &[0.001, 0.005, 0.01, 0.05, 0.1, 0.2, 0.5, 1.0, 2.0, 5.0];

/// Installs the global Prometheus recorder. Safe to call more than once.
pub fn init_metrics() -> Result<(), BuildError> {
    if PROMETHEUS_HANDLE.get().is_some() {
        return Ok(());
    }
    let handle = PrometheusBuilder::new()
        .set_buckets(LATENCY_BUCKETS)?
        .install_recorder()?;
    let _ = PROMETHEUS_HANDLE.set(handle);
    Ok(())
}

/// Records `http_requests_total` and `http_request_duration_seconds` by
/// matched route.
pub async fn metrics_middleware(req: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().as_str().to_string();
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());

    let response = next.run(req).await;
    let status = response.status().as_u16().to_string();

    counter!(
        "http_requests_total",
        "method" => method.clone(),
        "path" => path.clone(),
        "status" => status
    )
    .increment(1);
    histogram!(
        "http_request_duration_seconds",
        "method" => method,
        "path" => path
    )
    .record(start.elapsed().as_secs_f64());

    response
}

pub fn record_sign_up(provider: &'static str) {
    counter!("sign_ups_total", "provider" => provider).increment(1);
}

pub fn record_pet_created() {
    counter!("pets_created_total").increment(1);
}

pub fn record_device_paired(tier: Tier) {
    counter!("devices_paired_total", "tier" => tier.as_str()).increment(1);
}

/// `GET /metrics` in Prometheus text format.
pub async fn metrics_handler(State(state): State<AppState>) -> Response {
    if let Some(pool) = &state.pool {
        persistence::metrics::record_pool_metrics(pool);
    }

    match PROMETHEUS_HANDLE.get() {
        Some(handle) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            handle.render(),
        )
            .into_response(),
        None => (
            StatusCode::SERVICE_UNAVAILABLE,
            [(header::CONTENT_TYPE, "text/plain")],
            "Metrics not initialized",
        )
            .into_response(),
    }
}
