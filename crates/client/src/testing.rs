//! In-memory [`SevaApi`] fake for driving the flow and checkout tests.
//!
//! Mirrors the server's wire behavior: issuance overwrites the pending
//! code, a successful verify consumes the entry, duplicate contacts
//! conflict with status 400. Codes and display ids are deterministic
//! counters so tests can assert ordering.

#![allow(clippy::unwrap_used)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;

use seva_core::{Address, CartItem, Contact, OtpCode, Seva, User, UserId};

use crate::api::{
    ApiError, IdentityCheck, IdentityRef, OrderReceipt, OtpIssued, PincodeInfo, SevaApi,
};

#[derive(Default)]
struct FakeState {
    codes: HashMap<String, OtpCode>,
    users: HashMap<String, User>,
    next_user_id: i32,
}

pub struct FakeApi {
    state: Mutex<FakeState>,
    issued: AtomicUsize,
    orders: AtomicUsize,
    corrupt_identity: AtomicBool,
    fail_orders: AtomicBool,
}

impl FakeApi {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(FakeState::default()),
            issued: AtomicUsize::new(0),
            orders: AtomicUsize::new(0),
            corrupt_identity: AtomicBool::new(false),
            fail_orders: AtomicBool::new(false),
        }
    }

    /// Register an account directly, bypassing the flow.
    pub fn seed_user(&self, contact: &str, name: &str) -> User {
        let mut state = self.state.lock().unwrap();
        state.next_user_id += 1;
        let user = User {
            id: UserId::new(state.next_user_id),
            contact: Contact::parse(contact).unwrap(),
            name: name.to_owned(),
            created_at: Utc::now(),
        };
        state.users.insert(contact.to_owned(), user.clone());
        user
    }

    /// The latest pending code for a contact.
    pub fn last_code(&self, contact: &str) -> Option<OtpCode> {
        self.state.lock().unwrap().codes.get(contact).cloned()
    }

    /// How many issuance calls have been made.
    pub fn issued_count(&self) -> usize {
        self.issued.load(Ordering::SeqCst)
    }

    /// How many order submissions have been made.
    pub fn order_calls(&self) -> usize {
        self.orders.load(Ordering::SeqCst)
    }

    /// Make identity checks answer exists-without-id.
    pub fn corrupt_identity(&self, on: bool) {
        self.corrupt_identity.store(on, Ordering::SeqCst);
    }

    /// Make order submissions fail with a server error.
    pub fn fail_orders(&self, on: bool) {
        self.fail_orders.store(on, Ordering::SeqCst);
    }

    fn server_error() -> ApiError {
        ApiError::Api {
            status: 500,
            message: "Internal server error".to_owned(),
        }
    }
}

#[async_trait]
impl SevaApi for FakeApi {
    async fn list_sevas(&self) -> Result<Vec<Seva>, ApiError> {
        Ok(Vec::new())
    }

    async fn identity_exists(&self, contact: &Contact) -> Result<IdentityCheck, ApiError> {
        let state = self.state.lock().unwrap();
        let user = state.users.get(contact.as_str());
        if self.corrupt_identity.load(Ordering::SeqCst) && user.is_some() {
            return Ok(IdentityCheck {
                exists: true,
                user: Some(IdentityRef { id: None }),
            });
        }
        Ok(IdentityCheck {
            exists: user.is_some(),
            user: user.map(|u| IdentityRef { id: Some(u.id) }),
        })
    }

    async fn get_user(&self, id: UserId) -> Result<User, ApiError> {
        self.state
            .lock()
            .unwrap()
            .users
            .values()
            .find(|u| u.id == id)
            .cloned()
            .ok_or(ApiError::Api {
                status: 404,
                message: "User not found".to_owned(),
            })
    }

    async fn request_otp(&self, contact: &Contact) -> Result<OtpIssued, ApiError> {
        let n = self.issued.fetch_add(1, Ordering::SeqCst);
        let code = OtpCode::from_number(u32::try_from(100_000 + n).unwrap());
        self.state
            .lock()
            .unwrap()
            .codes
            .insert(contact.as_str().to_owned(), code.clone());
        Ok(OtpIssued {
            message: "OTP sent successfully".to_owned(),
            otp: code,
        })
    }

    async fn verify_otp(&self, contact: &Contact, otp: &str) -> Result<bool, ApiError> {
        let mut state = self.state.lock().unwrap();
        let matched = state
            .codes
            .get(contact.as_str())
            .is_some_and(|code| code.as_str() == otp);
        if matched {
            state.codes.remove(contact.as_str());
        }
        Ok(matched)
    }

    async fn create_user(&self, contact: &Contact, name: &str) -> Result<User, ApiError> {
        let mut state = self.state.lock().unwrap();
        if state.users.contains_key(contact.as_str()) {
            return Err(ApiError::Api {
                status: 400,
                message: "User already exists".to_owned(),
            });
        }
        state.next_user_id += 1;
        let user = User {
            id: UserId::new(state.next_user_id),
            contact: contact.clone(),
            name: name.to_owned(),
            created_at: Utc::now(),
        };
        state.users.insert(contact.as_str().to_owned(), user.clone());
        Ok(user)
    }

    async fn lookup_pincode(&self, pincode: &str) -> Result<Option<PincodeInfo>, ApiError> {
        Ok(match pincode {
            "560001" => Some(PincodeInfo {
                city: "Bengaluru".to_owned(),
                state: "Karnataka".to_owned(),
            }),
            _ => None,
        })
    }

    async fn place_order(
        &self,
        items: &[CartItem],
        _address: &Address,
    ) -> Result<OrderReceipt, ApiError> {
        if self.fail_orders.load(Ordering::SeqCst) {
            return Err(Self::server_error());
        }
        let n = self.orders.fetch_add(1, Ordering::SeqCst) as u64;
        Ok(OrderReceipt {
            order_id: 100_000 + n,
            payment_id: 1_000_000_000 + n,
            amount_to_pay: items.iter().map(|i| i.discounted_price).sum(),
        })
    }
}
