//! Per-client request throttling
//!
//! Requests are counted in fixed one-second windows keyed by client address.
//! Requests without a known peer address share a single bucket.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use axum::extract::{ConnectInfo, Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

/// Body of every throttled response
pub const LIMIT_MESSAGE: &str = "Reached maximum request limit.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RateLimitDecision {
    Allowed,
    Limited,
}

pub trait RateLimiter: Send + Sync {
    fn check(&self, client: Option<&str>) -> RateLimitDecision;
}

#[derive(Clone, Debug)]
pub struct NoopRateLimiter;

impl RateLimiter for NoopRateLimiter {
    fn check(&self, _client: Option<&str>) -> RateLimitDecision {
        RateLimitDecision::Allowed
    }
}

const ANONYMOUS: &str = "anonymous";

/// Client count above which expired windows are swept
const SWEEP_THRESHOLD: usize = 1024;

/// At most `limit` requests per client per window
#[derive(Debug)]
pub struct FixedWindowLimiter {
    limit: u32,
    window: Duration,
    clients: Mutex<HashMap<String, (Instant, u32)>>,
}

impl FixedWindowLimiter {
    pub fn new(limit: u32, window: Duration) -> Self {
        Self {
            limit,
            window,
            clients: Mutex::new(HashMap::new()),
        }
    }

    pub fn per_second(limit: u32) -> Self {
        Self::new(limit, Duration::from_secs(1))
    }

    fn check_at(&self, client: Option<&str>, now: Instant) -> RateLimitDecision {
        let mut clients = self.clients.lock().unwrap_or_else(PoisonError::into_inner);
        if clients.len() >= SWEEP_THRESHOLD {
            clients.retain(|_, (start, _)| now.duration_since(*start) < self.window);
        }
        let entry = clients
            .entry(client.unwrap_or(ANONYMOUS).to_string())
            .or_insert((now, 0));

        if now.duration_since(entry.0) >= self.window {
            *entry = (now, 0);
        }
        if entry.1 >= self.limit {
            return RateLimitDecision::Limited;
        }
        entry.1 += 1;
        RateLimitDecision::Allowed
    }

    #[cfg(test)]
    fn tracked_clients(&self) -> usize {
        self.clients
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl RateLimiter for FixedWindowLimiter {
    fn check(&self, client: Option<&str>) -> RateLimitDecision {
        self.check_at(client, Instant::now())
    }
}

/// Limiter for a configured requests-per-second value; 0 disables throttling
pub fn limiter_for(requests_per_second: u32) -> Arc<dyn RateLimiter> {
    if requests_per_second == 0 {
        Arc::new(NoopRateLimiter)
    } else {
        Arc::new(FixedWindowLimiter::per_second(requests_per_second))
    }
}

/// Middleware rejecting throttled requests with 429
pub async fn throttle(
    State(limiter): State<Arc<dyn RateLimiter>>,
    request: Request,
    next: Next,
) -> Response {
    let client = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string());

    match limiter.check(client.as_deref()) {
        RateLimitDecision::Allowed => next.run(request).await,
        RateLimitDecision::Limited => {
            tracing::warn!(client = client.as_deref().unwrap_or(ANONYMOUS), "Request throttled");
            (StatusCode::TOO_MANY_REQUESTS, LIMIT_MESSAGE).into_response()
        }
    }
}
