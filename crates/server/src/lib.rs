//! Seva commerce HTTP API.
//!
//! # Architecture
//!
//! - Axum web framework serving a JSON API
//! - In-memory stores: OTP ledger (volatile by design), user directory,
//!   seva catalog seeded from bundled JSON, static pincode table
//! - No database: the user store models the external document store
//!   collaborator; orders are transient receipts and never persisted
//!
//! The library surface exists so that tests can drive the full router
//! in-process without binding a socket.

#![cfg_attr(not(test), forbid(unsafe_code))]

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Router, routing::get};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod store;

pub use config::ServerConfig;
pub use state::AppState;

/// Build the application router over the given state.
#[must_use]
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .merge(routes::routes())
        .layer(TraceLayer::new_for_http())
        // The browser client is served from a different origin.
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable until the catalog is loaded and
/// non-empty.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    if state.catalog().is_empty() {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::OK
    }
}
