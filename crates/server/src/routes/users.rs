//! Identity and OTP route handlers.
//!
//! The OTP endpoints are the network face of the ledger: `otp` issues a
//! fresh code (overwriting any pending one), `otp-verify` checks the
//! submitted code and, on success, consumes the entry - so over the wire a
//! code is one-shot even though ledger-level verification is non-consuming.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use seva_core::{Contact, OtpCode, User, UserId};

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Query parameters for the identity existence check.
#[derive(Debug, Deserialize)]
pub struct IdentityQuery {
    pub contact: String,
}

/// Minimal identity returned by the existence check.
#[derive(Debug, Serialize)]
pub struct IdentityRef {
    pub id: UserId,
}

/// Response for the identity existence check.
#[derive(Debug, Serialize)]
pub struct IdentityExistResponse {
    pub exists: bool,
    pub user: Option<IdentityRef>,
}

/// Does an account exist for this contact?
///
/// GET /users/identity-exist?contact=X
///
/// A malformed contact cannot have an account, so it simply answers
/// `exists: false` rather than erroring.
pub async fn identity_exist(
    State(state): State<AppState>,
    Query(query): Query<IdentityQuery>,
) -> Json<IdentityExistResponse> {
    let id = Contact::parse(&query.contact)
        .ok()
        .and_then(|contact| state.users().exists(&contact));

    Json(IdentityExistResponse {
        exists: id.is_some(),
        user: id.map(|id| IdentityRef { id }),
    })
}

/// Fetch a full user record by id.
///
/// GET /users/{id}
///
/// # Errors
///
/// Returns 400 if the id does not parse as an integer, 404 if no user has
/// that id.
pub async fn get_user(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<User>> {
    let id: i32 = id
        .parse()
        .map_err(|_| AppError::BadRequest("Invalid user ID".to_owned()))?;

    state
        .users()
        .get(UserId::new(id))
        .map(Json)
        .ok_or_else(|| AppError::NotFound("User not found".to_owned()))
}

/// Request body for OTP issuance.
#[derive(Debug, Deserialize)]
pub struct OtpRequest {
    pub contact: String,
}

/// Response for OTP issuance.
///
/// The code is echoed in-band: there is no SMS gateway in this system, so
/// the issuance response is the sanctioned sandbox delivery channel. A
/// production deployment must deliver out-of-band instead.
#[derive(Debug, Serialize)]
pub struct OtpResponse {
    pub message: String,
    pub otp: OtpCode,
}

/// Issue a one-time code for a contact.
///
/// POST /users/otp
///
/// Issues unconditionally - no existence pre-check - so the endpoint does
/// not leak whether a contact is registered.
///
/// # Errors
///
/// Returns 400 if the contact is malformed.
pub async fn request_otp(
    State(state): State<AppState>,
    Json(body): Json<OtpRequest>,
) -> Result<Json<OtpResponse>> {
    let contact = Contact::parse(&body.contact).map_err(|e| AppError::BadRequest(e.to_string()))?;

    let otp = state.otp().issue(&contact);
    tracing::debug!(contact = %contact, otp = %otp, "OTP issued");

    Ok(Json(OtpResponse {
        message: "OTP sent successfully".to_owned(),
        otp,
    }))
}

/// Request body for OTP verification.
#[derive(Debug, Deserialize)]
pub struct OtpVerifyRequest {
    pub contact: String,
    pub otp: String,
}

/// Plain message response.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Verify a submitted code and consume it on success.
///
/// POST /users/otp-verify
///
/// # Errors
///
/// Fails closed with 400 "Invalid OTP" on a malformed contact or code, a
/// missing or expired entry, or a mismatch.
pub async fn verify_otp(
    State(state): State<AppState>,
    Json(body): Json<OtpVerifyRequest>,
) -> Result<Json<MessageResponse>> {
    let invalid = || AppError::BadRequest("Invalid OTP".to_owned());

    let contact = Contact::parse(&body.contact).map_err(|_| invalid())?;
    let otp = OtpCode::parse(&body.otp).map_err(|_| invalid())?;

    if !state.otp().verify(&contact, &otp) {
        return Err(invalid());
    }

    // Explicit consumption: the verified code must not be replayable.
    state.otp().delete(&contact);

    Ok(Json(MessageResponse {
        message: "OTP verified successfully".to_owned(),
    }))
}

/// Request body for account creation.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub contact: String,
    #[serde(default)]
    pub name: String,
}

/// Create an account for a contact.
///
/// POST /users
///
/// # Errors
///
/// Returns 400 on a malformed contact or if the contact is already
/// registered.
pub async fn create_user(
    State(state): State<AppState>,
    Json(body): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<User>)> {
    let contact = Contact::parse(&body.contact).map_err(|e| AppError::BadRequest(e.to_string()))?;

    let user = state.users().create(contact, body.name)?;
    tracing::info!(user_id = %user.id, "user created");

    Ok((StatusCode::CREATED, Json(user)))
}
