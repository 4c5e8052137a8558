//! Reactive copy of the persisted login session.
//!
//! SYSTEM CONTEXT
//! ==============
//! Browser storage is the source of truth (`flows::SessionStore` over
//! `localStorage`). This struct is the snapshot pages render from and route
//! guards resolve against. It is refreshed on start-up, after login, after a
//! profile edit and on logout.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use flows::{Resolution, Route, SessionStorage, SessionStore};
use wire::types::{Role, UserProfile};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionState {
    pub user: Option<UserProfile>,
    /// `false` until storage has been read (SSR and the first hydrate pass).
    pub loaded: bool,
}

impl SessionState {
    pub fn from_store<S: SessionStorage>(store: &SessionStore<S>) -> Self {
        let user = if store.is_authenticated() { store.user() } else { None };
        Self { user, loaded: true }
    }

    pub fn signed_out() -> Self {
        Self {
            user: None,
            loaded: true,
        }
    }

    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|user| user.role)
    }

    pub fn user_id(&self) -> Option<i64> {
        self.user.as_ref().map(|user| user.id)
    }

    pub fn display_name(&self) -> String {
        self.user
            .as_ref()
            .map(|user| user.display_name().to_owned())
            .unwrap_or_default()
    }

    /// Guard decision for `route`, `None` while the session is still unknown.
    pub fn resolve(&self, route: Route) -> Option<Resolution> {
        self.loaded.then(|| route.resolve(self.role()))
    }

    /// Whether `route` may render right now.
    pub fn allows(&self, route: Route) -> bool {
        self.resolve(route) == Some(Resolution::Render)
    }
}
