//! The contact-verification and session-establishment state machine.
//!
//! ```text
//! EnteringContact --submit_contact--> AwaitingOtp
//! AwaitingOtp     --submit_otp-----> Authenticated   (known contact)
//! AwaitingOtp     --submit_otp-----> EnteringName    (unknown contact)
//! EnteringName    --submit_name----> AwaitingOtp     (fresh code confirms
//!                                                     the new account)
//! ```
//!
//! Validation failures and rejected codes hold the machine in place and
//! surface an error; only confirmed progress moves it forward. Every API
//! call is keyed on the contact captured when the state was entered, never
//! on "current input", so a stale in-flight completion cannot target a
//! different contact. There is no logout state: dropping the flow (or the
//! authenticated user it yields) returns the app to anonymous.

use std::time::{Duration, Instant};

use seva_core::{Contact, ContactError, User};

use crate::api::{ApiError, SevaApi};

/// Advisory gap between OTP issuance requests for the same contact. The
/// ledger does not enforce this; it only throttles the resend button.
pub const RESEND_COOLDOWN: Duration = Duration::from_secs(30);

/// Minimum trimmed display-name length.
const MIN_NAME_LEN: usize = 2;

/// Errors surfaced by flow transitions. The machine stays in its current
/// state for every variant.
#[derive(Debug, thiserror::Error)]
pub enum FlowError {
    /// The contact input failed validation.
    #[error("Enter a valid 10-digit mobile number starting with 6-9")]
    InvalidContact(#[source] ContactError),

    /// The server rejected the submitted code.
    #[error("Invalid OTP")]
    InvalidOtp,

    /// The display name is too short.
    #[error("Name must be at least 2 characters")]
    NameTooShort,

    /// The resolver reported an account with no usable id. Authenticating
    /// with a partial identity is never acceptable, so this is surfaced
    /// instead of degraded.
    #[error("account record is incomplete; cannot sign in")]
    IncompleteIdentity,

    /// Resend requested before the cooldown elapsed.
    #[error("please wait before requesting another code")]
    ResendCooldown {
        /// Time left until resend is allowed.
        remaining: Duration,
    },

    /// The operation is not valid in the current state.
    #[error("operation not valid in this state")]
    WrongState,

    /// An API call failed.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Externally visible stage of the flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStage {
    EnteringContact,
    AwaitingOtp,
    EnteringName,
    Authenticated,
}

#[derive(Debug)]
enum State {
    EnteringContact,
    AwaitingOtp {
        contact: Contact,
        last_issued: Instant,
    },
    EnteringName {
        contact: Contact,
    },
    Authenticated {
        user: User,
    },
}

/// The auth flow controller.
///
/// Generic over [`SevaApi`] at each call rather than owning a client, so a
/// single flow can be driven by tests and production transports alike.
#[derive(Debug)]
pub struct AuthFlow {
    state: State,
}

impl Default for AuthFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthFlow {
    /// Start a new flow at the contact prompt.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: State::EnteringContact,
        }
    }

    /// Current stage.
    #[must_use]
    pub const fn stage(&self) -> AuthStage {
        match self.state {
            State::EnteringContact => AuthStage::EnteringContact,
            State::AwaitingOtp { .. } => AuthStage::AwaitingOtp,
            State::EnteringName { .. } => AuthStage::EnteringName,
            State::Authenticated { .. } => AuthStage::Authenticated,
        }
    }

    /// The contact being verified, once one has been accepted.
    #[must_use]
    pub const fn contact(&self) -> Option<&Contact> {
        match &self.state {
            State::AwaitingOtp { contact, .. } | State::EnteringName { contact } => Some(contact),
            State::Authenticated { user } => Some(&user.contact),
            State::EnteringContact => None,
        }
    }

    /// The authenticated user, in the terminal state.
    #[must_use]
    pub const fn user(&self) -> Option<&User> {
        match &self.state {
            State::Authenticated { user } => Some(user),
            _ => None,
        }
    }

    /// Submit the contact input. On success an OTP is issued -
    /// unconditionally, with no existence pre-check - and the flow moves
    /// to `AwaitingOtp`.
    ///
    /// # Errors
    ///
    /// `InvalidContact` holds the flow in place; `Api` errors likewise.
    pub async fn submit_contact<A: SevaApi + ?Sized>(
        &mut self,
        api: &A,
        input: &str,
    ) -> Result<(), FlowError> {
        if !matches!(self.state, State::EnteringContact) {
            return Err(FlowError::WrongState);
        }

        let contact = Contact::parse(input).map_err(FlowError::InvalidContact)?;

        api.request_otp(&contact).await?;
        tracing::debug!(contact = %contact, "OTP requested");

        self.state = State::AwaitingOtp {
            contact,
            last_issued: Instant::now(),
        };
        Ok(())
    }

    /// Submit the code the buyer received. On success the code is
    /// consumed and identity resolution decides the next state: an
    /// existing account authenticates, an unknown contact moves on to the
    /// name prompt.
    ///
    /// # Errors
    ///
    /// `InvalidOtp` (rejected code) and `IncompleteIdentity` (account
    /// without an id) hold the flow in `AwaitingOtp`.
    pub async fn submit_otp<A: SevaApi + ?Sized>(
        &mut self,
        api: &A,
        code: &str,
    ) -> Result<(), FlowError> {
        // Key everything on the contact captured at issuance time.
        let State::AwaitingOtp { contact, .. } = &self.state else {
            return Err(FlowError::WrongState);
        };
        let contact = contact.clone();

        if !api.verify_otp(&contact, code.trim()).await? {
            return Err(FlowError::InvalidOtp);
        }

        let check = api.identity_exists(&contact).await?;
        if !check.exists {
            self.state = State::EnteringName { contact };
            return Ok(());
        }

        // Never authenticate with a partial identity.
        let Some(id) = check.user.and_then(|user| user.id) else {
            return Err(FlowError::IncompleteIdentity);
        };

        let user = api.get_user(id).await?;
        tracing::info!(user_id = %user.id, "authenticated");
        self.state = State::Authenticated { user };
        Ok(())
    }

    /// Submit the display name for a new account. Creation is followed by
    /// a fresh OTP issuance: the new account must also confirm a code
    /// before the session is established, mirroring the existing-user
    /// path.
    ///
    /// # Errors
    ///
    /// `NameTooShort` and create conflicts hold the flow in
    /// `EnteringName`.
    pub async fn submit_name<A: SevaApi + ?Sized>(
        &mut self,
        api: &A,
        name: &str,
    ) -> Result<(), FlowError> {
        let State::EnteringName { contact } = &self.state else {
            return Err(FlowError::WrongState);
        };
        let contact = contact.clone();

        let name = name.trim();
        if name.chars().count() < MIN_NAME_LEN {
            return Err(FlowError::NameTooShort);
        }

        let user = api.create_user(&contact, name).await?;
        tracing::info!(user_id = %user.id, "account created, confirming via OTP");

        api.request_otp(&contact).await?;
        self.state = State::AwaitingOtp {
            contact,
            last_issued: Instant::now(),
        };
        Ok(())
    }

    /// Request a fresh code for the contact being verified.
    ///
    /// # Errors
    ///
    /// `ResendCooldown` while the advisory 30-second window is still
    /// open.
    pub async fn resend_otp<A: SevaApi + ?Sized>(&mut self, api: &A) -> Result<(), FlowError> {
        let State::AwaitingOtp { contact, .. } = &self.state else {
            return Err(FlowError::WrongState);
        };
        let contact = contact.clone();

        if let Some(remaining) = self.resend_available_in(Instant::now()) {
            return Err(FlowError::ResendCooldown { remaining });
        }

        api.request_otp(&contact).await?;
        self.state = State::AwaitingOtp {
            contact,
            last_issued: Instant::now(),
        };
        Ok(())
    }

    /// Time left until resend is allowed at `now`, or `None` if it is
    /// available (or the flow is not awaiting a code).
    #[must_use]
    pub fn resend_available_in(&self, now: Instant) -> Option<Duration> {
        let State::AwaitingOtp { last_issued, .. } = &self.state else {
            return None;
        };
        let elapsed = now.saturating_duration_since(*last_issued);
        RESEND_COOLDOWN.checked_sub(elapsed).filter(|d| !d.is_zero())
    }
}
