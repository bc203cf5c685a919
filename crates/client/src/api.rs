//! The service contract the client programs against.
//!
//! [`SevaApi`] is the boundary trait: the flow controller and checkout
//! driver only ever see this interface, so tests can drive them against an
//! in-memory fake while production uses the reqwest-backed [`HttpApi`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use seva_core::{Address, CartItem, Contact, OtpCode, Price, Seva, User, UserId};

/// Errors from API calls.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The server answered with an error status and message.
    #[error("{message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// The server's `message` field.
        message: String,
    },

    /// The request never completed (network/server failure). Safe to retry
    /// for all read operations.
    #[error("Server error. Please try again.")]
    Transport(#[source] reqwest::Error),
}

impl ApiError {
    /// Whether this is the server-reported error with the given status.
    #[must_use]
    pub const fn is_status(&self, status: u16) -> bool {
        matches!(self, Self::Api { status: s, .. } if *s == status)
    }
}

/// Result of the identity existence check.
///
/// `user` carries only the minimal reference needed to branch the auth
/// flow; `id` stays optional so a partial answer is representable (and can
/// be rejected explicitly rather than silently degraded).
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityCheck {
    pub exists: bool,
    pub user: Option<IdentityRef>,
}

/// Minimal identity reference.
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityRef {
    pub id: Option<UserId>,
}

/// Response from OTP issuance: the code rides in-band (sandbox delivery).
#[derive(Debug, Clone, Deserialize)]
pub struct OtpIssued {
    pub message: String,
    pub otp: OtpCode,
}

/// City and state resolved from a pincode.
#[derive(Debug, Clone, Deserialize)]
pub struct PincodeInfo {
    pub city: String,
    pub state: String,
}

/// The order receipt returned by submission.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderReceipt {
    pub order_id: u64,
    pub payment_id: u64,
    pub amount_to_pay: Price,
}

/// The commerce API surface, one method per wire operation.
#[async_trait]
pub trait SevaApi: Send + Sync {
    /// `GET /sevas`
    async fn list_sevas(&self) -> Result<Vec<Seva>, ApiError>;

    /// `GET /users/identity-exist?contact=X`
    async fn identity_exists(&self, contact: &Contact) -> Result<IdentityCheck, ApiError>;

    /// `GET /users/{id}`
    async fn get_user(&self, id: UserId) -> Result<User, ApiError>;

    /// `POST /users/otp`
    async fn request_otp(&self, contact: &Contact) -> Result<OtpIssued, ApiError>;

    /// `POST /users/otp-verify`. `Ok(false)` means the server rejected the
    /// code; `Err` means the request itself failed.
    async fn verify_otp(&self, contact: &Contact, otp: &str) -> Result<bool, ApiError>;

    /// `POST /users`
    async fn create_user(&self, contact: &Contact, name: &str) -> Result<User, ApiError>;

    /// `GET /address-by-pincode/{pincode}`
    async fn lookup_pincode(&self, pincode: &str) -> Result<Option<PincodeInfo>, ApiError>;

    /// `POST /order`
    async fn place_order(
        &self,
        items: &[CartItem],
        address: &Address,
    ) -> Result<OrderReceipt, ApiError>;
}

/// Shape of a server error body.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

/// reqwest-backed [`SevaApi`] implementation.
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpApi {
    /// Create a client for the API at `base_url` (no trailing slash).
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Turn a non-2xx response into `ApiError::Api`, decoding the
    /// `{"message"}` body when present.
    async fn check(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .json::<ErrorBody>()
            .await
            .map(|body| body.message)
            .unwrap_or_default();

        Err(ApiError::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(ApiError::Transport)?;
        Self::check(response)
            .await?
            .json()
            .await
            .map_err(ApiError::Transport)
    }

    async fn post_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<T, ApiError> {
        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(ApiError::Transport)?;
        Self::check(response)
            .await?
            .json()
            .await
            .map_err(ApiError::Transport)
    }
}

#[async_trait]
impl SevaApi for HttpApi {
    async fn list_sevas(&self) -> Result<Vec<Seva>, ApiError> {
        self.get_json("/sevas").await
    }

    async fn identity_exists(&self, contact: &Contact) -> Result<IdentityCheck, ApiError> {
        self.get_json(&format!("/users/identity-exist?contact={contact}"))
            .await
    }

    async fn get_user(&self, id: UserId) -> Result<User, ApiError> {
        self.get_json(&format!("/users/{id}")).await
    }

    async fn request_otp(&self, contact: &Contact) -> Result<OtpIssued, ApiError> {
        self.post_json(
            "/users/otp",
            &serde_json::json!({ "contact": contact.as_str() }),
        )
        .await
    }

    async fn verify_otp(&self, contact: &Contact, otp: &str) -> Result<bool, ApiError> {
        let response = self
            .client
            .post(self.url("/users/otp-verify"))
            .json(&serde_json::json!({ "contact": contact.as_str(), "otp": otp }))
            .send()
            .await
            .map_err(ApiError::Transport)?;

        match Self::check(response).await {
            Ok(_) => Ok(true),
            // 400 is the server's "Invalid OTP" verdict, not a failure of
            // the request itself.
            Err(err) if err.is_status(400) => Ok(false),
            Err(err) => Err(err),
        }
    }

    async fn create_user(&self, contact: &Contact, name: &str) -> Result<User, ApiError> {
        self.post_json(
            "/users",
            &serde_json::json!({ "contact": contact.as_str(), "name": name }),
        )
        .await
    }

    async fn lookup_pincode(&self, pincode: &str) -> Result<Option<PincodeInfo>, ApiError> {
        match self
            .get_json(&format!("/address-by-pincode/{pincode}"))
            .await
        {
            Ok(info) => Ok(Some(info)),
            Err(err) if err.is_status(404) => Ok(None),
            Err(err) => Err(err),
        }
    }

    async fn place_order(
        &self,
        items: &[CartItem],
        address: &Address,
    ) -> Result<OrderReceipt, ApiError> {
        self.post_json(
            "/order",
            &serde_json::json!({ "items": items, "address": address }),
        )
        .await
    }
}
