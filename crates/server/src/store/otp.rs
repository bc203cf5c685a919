//! The OTP ledger: pending one-time codes keyed by contact.
//!
//! A process-wide map shared by every session. Exactly one entry may exist
//! per contact: issuing while a code is pending overwrites it immediately,
//! so only the latest code is ever valid (two browser tabs for the same
//! contact will interfere - accepted behavior).
//!
//! Expiry is lazy: an expired entry is removed when verification touches
//! it, not by a background sweep. Verification itself is non-consuming;
//! [`OtpLedger::delete`] is the explicit consumption step invoked by the
//! caller once it has finished using a successful verification.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Duration, Utc};
use rand::Rng;

use seva_core::{Contact, OtpCode};

/// How long an issued code stays valid.
const OTP_TTL_MINUTES: i64 = 10;

/// A pending code and its absolute expiry.
#[derive(Debug, Clone)]
struct OtpEntry {
    code: OtpCode,
    expires_at: DateTime<Utc>,
}

/// In-memory store of pending one-time codes.
#[derive(Debug, Default)]
pub struct OtpLedger {
    entries: Mutex<HashMap<Contact, OtpEntry>>,
}

impl OtpLedger {
    /// Create an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate and store a fresh 6-digit code for `contact`, valid for
    /// ten minutes. Any previously pending code for the same contact is
    /// invalidated with no grace period.
    ///
    /// The code is returned to the caller, which owns delivery.
    pub fn issue(&self, contact: &Contact) -> OtpCode {
        let code = OtpCode::from_number(rand::rng().random_range(0..=999_999));
        self.issue_with_expiry(contact, code.clone(), Utc::now() + Duration::minutes(OTP_TTL_MINUTES));
        code
    }

    /// Check `submitted` against the pending code for `contact`.
    ///
    /// Fails closed: `false` when no entry exists, when the entry has
    /// expired (the entry is deleted as a side effect), or when the codes
    /// mismatch. A `true` result leaves the entry in place so the caller
    /// may re-check before consuming it.
    pub fn verify(&self, contact: &Contact, submitted: &OtpCode) -> bool {
        self.verify_at(contact, submitted, Utc::now())
    }

    /// Explicitly consume the pending entry for `contact`, if any.
    pub fn delete(&self, contact: &Contact) {
        self.lock().remove(contact);
    }

    fn issue_with_expiry(&self, contact: &Contact, code: OtpCode, expires_at: DateTime<Utc>) {
        self.lock()
            .insert(contact.clone(), OtpEntry { code, expires_at });
    }

    fn verify_at(&self, contact: &Contact, submitted: &OtpCode, now: DateTime<Utc>) -> bool {
        let mut entries = self.lock();

        let Some(entry) = entries.get(contact) else {
            return false;
        };

        if now > entry.expires_at {
            entries.remove(contact);
            return false;
        }

        entry.code == *submitted
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<Contact, OtpEntry>> {
        // A poisoned lock only means another thread panicked mid-mutation;
        // the map itself is always in a consistent state.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
