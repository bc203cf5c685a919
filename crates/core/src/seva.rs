//! Catalog offering records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{Price, SevaId};

/// A purchasable/sponsorable offering shown in the catalog.
///
/// `id` is the business-unique numeric identifier, `code` the unique string
/// key used in catalog URLs. Wire names are camelCase to match the JSON
/// contract.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Seva {
    pub id: SevaId,
    pub code: String,
    pub title: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub description: String,
    pub market_price: Price,
    pub discounted_price: Price,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    #[serde(default)]
    pub amount_raised: Price,
    pub target_amount: Price,
    pub media: String,
}
