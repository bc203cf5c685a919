//! Pincode lookup route handler.

use axum::{
    Json,
    extract::{Path, State},
};

use seva_core::Pincode;

use crate::error::{AppError, Result};
use crate::state::AppState;
use crate::store::pincode::PincodeRecord;

/// Resolve a pincode to its city and state.
///
/// GET /address-by-pincode/{pincode}
///
/// # Errors
///
/// Returns 404 if the pincode is malformed or not in the table.
pub async fn by_pincode(
    State(state): State<AppState>,
    Path(pincode): Path<String>,
) -> Result<Json<&'static PincodeRecord>> {
    Pincode::parse(&pincode)
        .ok()
        .and_then(|pincode| state.pincodes().lookup(&pincode))
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Pincode not found".to_owned()))
}
