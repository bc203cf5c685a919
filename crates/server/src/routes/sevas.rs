//! Catalog route handlers.

use axum::{
    Json,
    extract::{Path, State},
};

use seva_core::Seva;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// List all offerings.
///
/// GET /sevas
pub async fn list(State(state): State<AppState>) -> Json<Vec<Seva>> {
    Json(state.catalog().list().to_vec())
}

/// Fetch a single offering by its unique code.
///
/// GET /sevas/{code}
///
/// # Errors
///
/// Returns 404 if no seva has the given code.
pub async fn show(State(state): State<AppState>, Path(code): Path<String>) -> Result<Json<Seva>> {
    state
        .catalog()
        .get(&code)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Seva not found".to_owned()))
}
