//! User account records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{Contact, UserId};

/// A registered buyer.
///
/// Created exactly once per contact; `id` is sequentially assigned by the
/// user directory and immutable afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub contact: Contact,
    pub name: String,
    pub created_at: DateTime<Utc>,
}
