//! Session glue between browser storage, the API client and routing.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every guarded page installs [`install_route_guard`] so role checks and
//! unauthenticated redirects behave identically everywhere. The API client
//! reads the bearer token through [`BrowserCredentials`] on every request,
//! so a login or logout in another tab is picked up without a reload.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use flows::{Resolution, Route, SessionStore};
use leptos::prelude::*;
use leptos_router::NavigateOptions;
use wire::Credentials;

use super::storage::BrowserStorage;
use crate::state::session::SessionState;

pub fn browser_session() -> SessionStore<BrowserStorage> {
    SessionStore::new(BrowserStorage)
}

/// Credentials backed by the browser session. A rejected token clears the
/// session and sends the user to the login page.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserCredentials;

impl Credentials for BrowserCredentials {
    fn bearer(&self) -> Option<String> {
        browser_session().token()
    }

    fn on_unauthorized(&self) {
        browser_session().logout();
        redirect_to(Route::Login);
    }
}

/// Full page navigation to `route`.
pub fn redirect_to(route: Route) {
    #[cfg(feature = "hydrate")]
    {
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_href(route.path());
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = route;
    }
}

/// Where `route` must send the current session, if anywhere.
pub fn redirect_target(state: &SessionState, route: Route) -> Option<Route> {
    match state.resolve(route)? {
        Resolution::Render => None,
        Resolution::Redirect(target) => Some(target),
    }
}

/// Redirect away from `route` whenever the loaded session may not see it.
pub fn install_route_guard<F>(route: Route, session: RwSignal<SessionState>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if let Some(target) = redirect_target(&session.get(), route) {
            navigate(target.path(), NavigateOptions::default());
        }
    });
}

/// Clear the stored session and return to the login page.
pub fn sign_out<F>(session: RwSignal<SessionState>, navigate: F)
where
    F: Fn(&str, NavigateOptions),
{
    browser_session().logout();
    session.set(SessionState::signed_out());
    navigate(Route::Login.path(), NavigateOptions::default());
}
