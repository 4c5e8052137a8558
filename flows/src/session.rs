//! Persisted login session over a pluggable key-value store.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser keeps the session in `localStorage`, the terminal client in a
//! JSON file, tests in memory. All of them sit behind [`SessionStorage`], and
//! [`SessionStore`] is the only code that knows the key names.
//!
//! A session exists only when both the token and a decodable profile are
//! present. A half-written session (token without profile) reads as signed
//! out.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use wire::Credentials;
use wire::types::{LoginResponse, Role, UserProfile};

pub const TOKEN_KEY: &str = "authToken";
pub const USER_KEY: &str = "userData";
pub const USER_COMPLETE_KEY: &str = "userCompleteData";
pub const TEMP_USER_KEY: &str = "tempUserData";

/// Every key a session may write. Logout clears all of them.
pub const ALL_KEYS: [&str; 4] = [TOKEN_KEY, USER_KEY, USER_COMPLETE_KEY, TEMP_USER_KEY];

/// String key-value storage with interior mutability.
pub trait SessionStorage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

impl<S: SessionStorage + ?Sized> SessionStorage for &S {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) {
        (**self).set(key, value);
    }

    fn remove(&self, key: &str) {
        (**self).remove(key);
    }
}

impl<S: SessionStorage + ?Sized> SessionStorage for Rc<S> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) {
        (**self).set(key, value);
    }

    fn remove(&self, key: &str) {
        (**self).remove(key);
    }
}

#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries.borrow_mut().insert(key.to_owned(), value.to_owned());
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

/// Typed view of the persisted session.
#[derive(Clone, Debug, Default)]
pub struct SessionStore<S> {
    storage: S,
}

impl<S: SessionStorage> SessionStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn token(&self) -> Option<String> {
        self.storage.get(TOKEN_KEY).filter(|token| !token.is_empty())
    }

    pub fn user(&self) -> Option<UserProfile> {
        let raw = self.storage.get(USER_KEY)?;
        serde_json::from_str(&raw).ok()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some() && self.user().is_some()
    }

    /// Role of the signed-in user, `None` when signed out.
    pub fn role(&self) -> Option<Role> {
        if self.token().is_none() {
            return None;
        }
        self.user().map(|user| user.role)
    }

    /// Persist a successful login.
    ///
    /// # Errors
    ///
    /// Returns the serializer error if the profile cannot be encoded; storage
    /// is left untouched in that case.
    pub fn sign_in(&self, login: &LoginResponse) -> Result<(), serde_json::Error> {
        let profile = serde_json::to_string(&login.user)?;
        self.storage.set(TOKEN_KEY, &login.access_token);
        self.storage.set(USER_KEY, &profile);
        self.storage.remove(TEMP_USER_KEY);
        Ok(())
    }

    /// Replace the cached profile after the user edited it.
    ///
    /// # Errors
    ///
    /// Returns the serializer error if the profile cannot be encoded.
    pub fn update_profile(&self, user: &UserProfile) -> Result<(), serde_json::Error> {
        let profile = serde_json::to_string(user)?;
        self.storage.set(USER_KEY, &profile);
        self.storage.set(USER_COMPLETE_KEY, &profile);
        Ok(())
    }

    pub fn logout(&self) {
        for key in ALL_KEYS {
            self.storage.remove(key);
        }
    }
}

impl<S: SessionStorage> Credentials for SessionStore<S> {
    fn bearer(&self) -> Option<String> {
        self.token()
    }

    fn on_unauthorized(&self) {
        self.logout();
    }
}
