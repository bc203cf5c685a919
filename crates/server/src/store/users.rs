//! The user directory: identity resolution keyed by contact.
//!
//! Stands in for the external document store. Id assignment is a
//! sequential counter advanced under the same write lock as the insert,
//! so two concurrent creates can never observe the same next id.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use chrono::Utc;

use seva_core::{Contact, User, UserId};

use super::StoreError;

#[derive(Debug, Default)]
struct Inner {
    by_id: HashMap<UserId, User>,
    by_contact: HashMap<Contact, UserId>,
    next_id: i32,
}

/// Process-wide registry of user accounts.
#[derive(Debug, Default)]
pub struct UserDirectory {
    inner: RwLock<Inner>,
}

impl UserDirectory {
    /// Create an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up whether an account exists for `contact`.
    #[must_use]
    pub fn exists(&self, contact: &Contact) -> Option<UserId> {
        self.read().by_contact.get(contact).copied()
    }

    /// Create an account for `contact`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Conflict` if the contact is already registered.
    /// The check and the insert happen under one write lock, so concurrent
    /// creates for the same contact cannot both succeed.
    pub fn create(&self, contact: Contact, name: String) -> Result<User, StoreError> {
        let mut inner = self.write();

        if inner.by_contact.contains_key(&contact) {
            return Err(StoreError::Conflict("User already exists".to_owned()));
        }

        inner.next_id += 1;
        let user = User {
            id: UserId::new(inner.next_id),
            contact: contact.clone(),
            name,
            created_at: Utc::now(),
        };

        inner.by_contact.insert(contact, user.id);
        inner.by_id.insert(user.id, user.clone());
        Ok(user)
    }

    /// Fetch the full record for `id`.
    #[must_use]
    pub fn get(&self, id: UserId) -> Option<User> {
        self.read().by_id.get(&id).cloned()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn contact(s: &str) -> Contact {
        Contact::parse(s).expect("valid contact")
    }

    #[test]
    fn test_create_assigns_sequential_ids() {
        let directory = UserDirectory::new();
        let a = directory
            .create(contact("9876543210"), "Asha".to_owned())
            .expect("first create");
        let b = directory
            .create(contact("9876543211"), "Bala".to_owned())
            .expect("second create");

        assert_eq!(a.id, UserId::new(1));
        assert_eq!(b.id, UserId::new(2));
    }

    #[test]
    fn test_duplicate_contact_is_conflict() {
        let directory = UserDirectory::new();
        let first = directory
            .create(contact("9876543210"), "Asha".to_owned())
            .expect("first create");

        let err = directory
            .create(contact("9876543210"), "Imposter".to_owned())
            .expect_err("duplicate must fail");
        assert!(matches!(err, StoreError::Conflict(_)));

        // First user is unaffected.
        let stored = directory.get(first.id).expect("still present");
        assert_eq!(stored.name, "Asha");
    }

    #[test]
    fn test_exists_and_get_round_trip() {
        let directory = UserDirectory::new();
        assert_eq!(directory.exists(&contact("9876543210")), None);

        let user = directory
            .create(contact("9876543210"), "Asha".to_owned())
            .expect("create");

        assert_eq!(directory.exists(&contact("9876543210")), Some(user.id));
        assert_eq!(directory.get(user.id), Some(user));
        assert_eq!(directory.get(UserId::new(999)), None);
    }

    #[test]
    fn test_concurrent_creates_never_share_an_id() {
        let directory = Arc::new(UserDirectory::new());
        let mut handles = Vec::new();

        for i in 0..8 {
            let directory = Arc::clone(&directory);
            handles.push(std::thread::spawn(move || {
                let c = contact(&format!("98765432{i:02}"));
                directory.create(c, format!("User {i}")).expect("create")
            }));
        }

        let mut ids: Vec<i32> = handles
            .into_iter()
            .map(|h| h.join().expect("thread").id.as_i32())
            .collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 8, "ids must be unique under concurrency");
    }
}
