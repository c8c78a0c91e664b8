//! Per-client rate limiting for the auth routes.

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{header, HeaderValue, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use governor::{
    clock::{Clock, DefaultClock},
    DefaultKeyedRateLimiter, Quota, RateLimiter,
};
use std::{net::SocketAddr, num::NonZeroU32};

use crate::app::AppState;
use crate::error::ApiError;

/// Keyed limiter shared by every auth route.
pub struct RateLimiterState {
    limiter: DefaultKeyedRateLimiter<String>,
    clock: DefaultClock,
    per_minute: u32,
}

impl RateLimiterState {
    /// `None` when `per_minute` is 0, which disables limiting.
    pub fn new(per_minute: u32) -> Option<Self> {
        let quota = Quota::per_minute(NonZeroU32::new(per_minute)?);
        Some(Self {
            limiter: RateLimiter::keyed(quota),
            clock: DefaultClock::default(),
            per_minute,
        })
    }

    /// `Err` carries the seconds until the client may retry.
    pub fn check(&self, client: &str) -> Result<(), u64> {
        let result = self
            .limiter
            .check_key(&client.to_string())
            .map_err(|not_until| not_until.wait_time_from(self.clock.now()).as_secs().max(1));

        if self.limiter.len() > 10_000 {
            self.limiter.retain_recent();
        }
        result
    }

    pub fn per_minute(&self) -> u32 {
        self.per_minute
    }
}

impl std::fmt::Debug for RateLimiterState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiterState")
            .field("per_minute", &self.per_minute)
            .field("tracked_clients", &self.limiter.len())
            .finish()
    }
}

/// Peer address when known, else the first `X-Forwarded-For` hop.
fn client_key(req: &Request<Body>) -> String {
    if let Some(ConnectInfo(addr)) = req.extensions().get::<ConnectInfo<SocketAddr>>() {
        return addr.ip().to_string();
    }
    req.headers()
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}

pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let Some(limiter) = state.auth_rate_limiter.as_ref() else {
        return next.run(req).await;
    };

    let client = client_key(&req);
    if let Err(retry_after) = limiter.check(&client) {
        tracing::warn!(client = %client, retry_after, "Auth rate limit exceeded");
        let mut response = ApiError::RateLimited.into_response();
        if let Ok(value) = HeaderValue::from_str(&retry_after.to_string()) {
            response.headers_mut().insert(header::RETRY_AFTER, value);
        }
        return response;
    }

    next.run(req).await
}
