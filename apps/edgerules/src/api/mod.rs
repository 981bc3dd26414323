//! # edgerules HTTP API Module
//!
//! Read-only query surface over a validated `RuleSet`, for pipeline
//! schedulers that run out of process.
//!
//! ## Endpoints
//!
//! - `GET /health` - Health check
//! - `GET /rules` - All validated rules
//! - `GET /rules/{source}` - Rules of one source, highest precedence first
//! - `POST /check` - Which candidate targets are reachable from a source
//!
//! ## Configuration (Environment Variables)
//!
//! - `EDGERULES_CORS_ORIGINS`: Comma-separated list of allowed origins, or "*" for all (default: localhost only)

mod handlers;
mod types;

pub use handlers::{check_handler, health_handler, rules_handler, run_check, source_rules_handler};
pub use types::{
    CheckRequest, CheckResponse, HealthResponse, MatchedTarget, RuleJson, RulesResponse,
};

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use edgerules_core::{RuleSet, TransformError};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Maximum request body size. Check requests are a handful of type names.
const MAX_BODY_BYTES: usize = 64 * 1024;

// =============================================================================
// SERVER STATE
// =============================================================================

/// Shared server state.
///
/// The rule set is immutable, so handlers share it without a lock.
#[derive(Clone)]
pub struct AppState {
    pub rules: Arc<RuleSet>,
}

impl AppState {
    #[must_use]
    pub fn new(rules: RuleSet) -> Self {
        Self {
            rules: Arc::new(rules),
        }
    }
}

// =============================================================================
// CORS CONFIGURATION
// =============================================================================

/// Build CORS layer from `EDGERULES_CORS_ORIGINS`.
///
/// - "*": allows all origins
/// - unset: localhost only
/// - otherwise: comma-separated list of allowed origins
fn build_cors_layer() -> CorsLayer {
    let origins_env = std::env::var("EDGERULES_CORS_ORIGINS").ok();

    match origins_env.as_deref() {
        Some("*") => {
            tracing::warn!("CORS: Allowing ALL origins (EDGERULES_CORS_ORIGINS=*)");
            CorsLayer::permissive()
        }
        Some(origins) => {
            let allowed_origins: Vec<HeaderValue> = origins
                .split(',')
                .filter_map(|s| {
                    let trimmed = s.trim();
                    match trimmed.parse::<HeaderValue>() {
                        Ok(hv) => Some(hv),
                        Err(e) => {
                            tracing::warn!("CORS: Invalid origin '{}': {}", trimmed, e);
                            None
                        }
                    }
                })
                .collect();

            if allowed_origins.is_empty() {
                tracing::warn!(
                    "CORS: No valid origins in EDGERULES_CORS_ORIGINS, defaulting to localhost only"
                );
                build_localhost_cors()
            } else {
                cors_for(allowed_origins)
            }
        }
        None => build_localhost_cors(),
    }
}

fn build_localhost_cors() -> CorsLayer {
    let origins = [
        "http://localhost",
        "http://127.0.0.1",
        "http://localhost:8080",
        "http://127.0.0.1:8080",
    ]
    .into_iter()
    .map(HeaderValue::from_static)
    .collect::<Vec<_>>();
    cors_for(origins)
}

fn cors_for(origins: Vec<HeaderValue>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

// =============================================================================
// ROUTER CREATION
// =============================================================================

/// Create the axum router with all endpoints and middleware.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_handler))
        .route("/rules", get(handlers::rules_handler))
        .route("/rules/{source}", get(handlers::source_rules_handler))
        .route("/check", post(handlers::check_handler))
        .layer(axum::extract::DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(build_cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// =============================================================================
// SERVER STARTUP
// =============================================================================

/// Start the HTTP server and run until Ctrl+C.
pub async fn run_server(addr: &str, rules: RuleSet) -> Result<(), TransformError> {
    let router = create_router(AppState::new(rules));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| TransformError::Io(format!("Bind failed: {}", e)))?;

    tracing::info!("edgerules HTTP server listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| TransformError::Io(format!("Server error: {}", e)))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        // Without a signal handler, run until the process is killed.
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
