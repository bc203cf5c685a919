//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                          - Liveness check
//! GET  /health/ready                    - Readiness check (catalog loaded)
//!
//! # Catalog
//! GET  /sevas                           - List offerings
//! GET  /sevas/{code}                    - Single offering by code
//!
//! # Identity & OTP
//! GET  /users/identity-exist?contact=X  - Does an account exist?
//! GET  /users/{id}                      - Full user record
//! POST /users/otp                       - Issue a one-time code
//! POST /users/otp-verify                - Verify (and consume) a code
//! POST /users                           - Create an account
//!
//! # Checkout
//! GET  /address-by-pincode/{pincode}    - City/state lookup
//! POST /order                           - Submit an order, returns receipt
//! ```

pub mod address;
pub mod order;
pub mod sevas;
pub mod users;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the user and OTP routes router.
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(users::create_user))
        .route("/identity-exist", get(users::identity_exist))
        .route("/otp", post(users::request_otp))
        .route("/otp-verify", post(users::verify_otp))
        .route("/{id}", get(users::get_user))
}

/// Create the full application router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/sevas", get(sevas::list))
        .route("/sevas/{code}", get(sevas::show))
        .nest("/users", user_routes())
        .route("/address-by-pincode/{pincode}", get(address::by_pincode))
        .route("/order", post(order::submit))
}
