#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use gbserver_api::rate_limit::{NoopRateLimiter, RateLimiter};
use gbserver_core::ops::DEFAULT_BASE_URL;
use gbserver_core::seed::load_default_seed;
use gbserver_engine::GbService;

/// Router over the default fixture, without throttling
#[allow(dead_code)]
pub fn seeded_app() -> Router {
    seeded_app_with_limiter(Arc::new(NoopRateLimiter))
}

#[allow(dead_code)]
pub fn seeded_app_with_limiter(limiter: Arc<dyn RateLimiter>) -> Router {
    let service = GbService::from_store(load_default_seed(DEFAULT_BASE_URL).unwrap());
    gbserver_api::router(service, limiter)
}

#[allow(dead_code)]
pub fn request(method: Method, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder().method(method).uri(uri);
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Send one request and decode the body as JSON (`Null` when empty)
#[allow(dead_code)]
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    if bytes.is_empty() {
        return (status, Value::Null);
    }
    let body = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
    (status, body)
}
