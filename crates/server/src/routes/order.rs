//! Order submission route handler.

use axum::{Json, extract::State};
use rand::Rng;
use serde::{Deserialize, Serialize};

use seva_core::{Address, CartItem, Price};

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Request body for order submission.
///
/// Both fields default so that an absent or partial address reaches the
/// handler's own validation instead of failing JSON extraction.
#[derive(Debug, Deserialize)]
pub struct OrderRequest {
    #[serde(default)]
    pub items: Vec<CartItem>,
    #[serde(default)]
    pub address: Address,
}

/// The order receipt.
///
/// `order_id` and `payment_id` are independent random display identifiers
/// with no collision avoidance against prior orders - they are not durable
/// primary keys. Nothing is persisted server-side; the client owns the
/// follow-up side effects (clearing its cart, recording history).
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub order_id: u64,
    pub payment_id: u64,
    pub amount_to_pay: Price,
}

/// Submit an order and receive a receipt.
///
/// POST /order
///
/// # Errors
///
/// Returns 400 if the item list is empty or the address has no pincode.
pub async fn submit(
    State(_state): State<AppState>,
    Json(body): Json<OrderRequest>,
) -> Result<Json<OrderResponse>> {
    if body.items.is_empty() {
        return Err(AppError::BadRequest(
            "Items array is required and cannot be empty".to_owned(),
        ));
    }

    if body.address.pincode.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Valid address with pincode is required".to_owned(),
        ));
    }

    let amount_to_pay: Price = body.items.iter().map(|item| item.discounted_price).sum();

    let mut rng = rand::rng();
    let response = OrderResponse {
        order_id: rng.random_range(100_000..=999_999),
        payment_id: rng.random_range(1_000_000_000..=9_999_999_999),
        amount_to_pay,
    };

    tracing::info!(
        order_id = response.order_id,
        item_count = body.items.len(),
        amount = amount_to_pay.rupees(),
        city = %body.address.city,
        "order processed"
    );

    Ok(Json(response))
}
