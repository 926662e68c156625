//! gbserver API - HTTP surface over the domain service
//!
//! Routes translate path parameters and JSON bodies into `GbService` calls
//! and map `GbError` kinds onto status codes. Every request gets an
//! `x-request-id` (generated when absent) that is echoed on the response and
//! recorded on the request span.

pub mod config;
pub mod error;
pub mod handlers;
pub mod rate_limit;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::body::Body;
use axum::http::{HeaderName, HeaderValue, Request};
use axum::routing::{delete, get, patch, post};
use axum::{middleware, Router};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::request_id::PropagateRequestIdLayer;
use tower_http::set_header::SetRequestHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug_span, info, Span};
use uuid::Uuid;

use gbserver_core::seed::{build_store, load_default_seed, parse_seed_file};
use gbserver_engine::GbService;

use crate::config::ServerArgs;
use crate::handlers::{branches, health, pulls, repos};
use crate::rate_limit::{limiter_for, RateLimiter};

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Shared handler state
#[derive(Clone, Debug)]
pub struct AppState {
    pub service: GbService,
}

/// Build the full application router
pub fn router(service: GbService, limiter: Arc<dyn RateLimiter>) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    Router::new()
        .route("/health", get(health::health))
        .route("/orgs/:org/:owner/repos", get(repos::list).post(repos::create))
        .route("/repos/:org/:owner/:repo", delete(repos::delete))
        .route("/repos/:org/:owner/:repo/branches", get(branches::list))
        .route("/repos/:org/:owner/:repo/git/refs", post(branches::create))
        .route(
            "/repos/:org/:owner/:repo/git/refs/:branch",
            delete(branches::delete),
        )
        .route(
            "/repos/:org/:owner/:repo/pulls",
            get(pulls::list).post(pulls::create),
        )
        .route(
            "/repos/:org/:owner/:repo/pulls/:pull_id",
            patch(pulls::update),
        )
        .layer(middleware::from_fn_with_state(limiter, rate_limit::throttle))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestHeaderLayer::if_not_present(
                    request_id.clone(),
                    |_req: &Request<Body>| HeaderValue::from_str(&Uuid::now_v7().to_string()).ok(),
                ))
                .layer(PropagateRequestIdLayer::new(request_id))
                .layer(TraceLayer::new_for_http().make_span_with(make_span)),
        )
        .with_state(AppState { service })
}

fn make_span(request: &Request<Body>) -> Span {
    let path = request.uri().path();
    let method = request.method().as_str();
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|val| val.to_str().ok())
        .unwrap_or("none");

    debug_span!("http-request", method, path, request_id)
}

/// Build the service from the configured seed, or the built-in fixture
///
/// # Errors
///
/// Returns an error if the seed file cannot be read, parsed or imported.
pub fn build_service(args: &ServerArgs) -> Result<GbService> {
    let store = match &args.seed {
        Some(path) => {
            let seed = parse_seed_file(path)
                .with_context(|| format!("Failed to load seed file {}", path.display()))?;
            build_store(&args.base_url, &seed)?
        }
        None => load_default_seed(&args.base_url).context("Failed to load built-in seed")?,
    };
    info!(
        repositories = store.repository_count(),
        branches = store.branch_count(),
        pull_requests = store.pull_request_count(),
        "Store seeded"
    );
    Ok(GbService::from_store(store))
}

/// Serve until SIGINT or SIGTERM
///
/// # Errors
///
/// Returns an error if seeding fails or the listener cannot be bound.
pub async fn serve(args: &ServerArgs) -> Result<()> {
    let service = build_service(args)?;
    let app = router(service, limiter_for(args.rate_limit));

    let listener = TcpListener::bind(format!("::0:{}", args.port))
        .await
        .with_context(|| format!("Failed to bind port {}", args.port))?;
    info!("Listening on [::]:{}", args.port);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for ctrl-c: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    info!("Gracefully shutdown");
}
