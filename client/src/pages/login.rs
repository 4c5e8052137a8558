//! Login page: username and password against the auth service.
//!
//! SYSTEM CONTEXT
//! ==============
//! On mount the page probes the auth service and keeps submit disabled while
//! it is reported offline. A successful login persists the token and profile
//! and lands the user on their role's home route.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use flows::{Route, validate};
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use wire::types::LoginForm;

use crate::state::config::ConfigState;
use crate::state::notice::NoticeState;
use crate::state::session::SessionState;

/// Reachability of the auth service: `None` while the probe is running.
pub(crate) fn backend_label(online: Option<bool>) -> &'static str {
    match online {
        None => "Checking server...",
        Some(true) => "Server online",
        Some(false) => "Server offline. Try again later.",
    }
}

pub(crate) fn can_submit(online: Option<bool>, busy: bool) -> bool {
    online == Some(true) && !busy
}

/// Probe the auth service once the endpoint catalogue is settled.
pub(crate) fn probe_backend(config: RwSignal<ConfigState>) -> RwSignal<Option<bool>> {
    let online = RwSignal::new(None::<bool>);
    let probed = RwSignal::new(false);
    Effect::new(move || {
        let Some(endpoints) = config.get().ready() else {
            return;
        };
        if probed.get_untracked() {
            return;
        }
        probed.set(true);
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let reachable = crate::net::api::api(endpoints).auth().ping().await;
            online.set(Some(reachable));
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = endpoints;
    });
    online
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let config = expect_context::<RwSignal<ConfigState>>();
    let notices = expect_context::<RwSignal<NoticeState>>();
    let navigate = use_navigate();
    crate::util::auth::install_route_guard(Route::Login, session, navigate.clone());

    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let busy = RwSignal::new(false);
    let online = probe_backend(config);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if !can_submit(online.get_untracked(), busy.get_untracked()) {
            return;
        }
        let form = match validate::login(&LoginForm {
            username: username.get_untracked(),
            password: password.get_untracked(),
        }) {
            Ok(form) => form,
            Err(error) => {
                notices.update(|n| n.error(error.to_string()));
                return;
            }
        };
        busy.set(true);

        #[cfg(feature = "hydrate")]
        {
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                let api = crate::net::api::api_from(config);
                match api.auth().login(&form).await {
                    Ok(login) => {
                        let store = crate::util::auth::browser_session();
                        if let Err(error) = store.sign_in(&login) {
                            notices.update(|n| n.failed("Could not save session", &error));
                        } else {
                            log::info!("signed in as {}", login.user.username);
                            session.set(SessionState::from_store(&store));
                            navigate(Route::landing(login.user.role).path(), NavigateOptions::default());
                        }
                    }
                    Err(error) => notices.update(|n| n.failed("Login failed", &error)),
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (form, &navigate);
        }
    };

    view! {
        <div class="auth-page">
            <form class="auth-page__card" on:submit=on_submit>
                <h1>"TouchGlyph"</h1>
                <p class="auth-page__status">{move || backend_label(online.get())}</p>
                <label class="dialog__label">
                    "Username"
                    <input
                        class="dialog__input"
                        type="text"
                        autocomplete="username"
                        prop:value=move || username.get()
                        on:input=move |ev| username.set(event_target_value(&ev))
                    />
                </label>
                <label class="dialog__label">
                    "Password"
                    <input
                        class="dialog__input"
                        type="password"
                        autocomplete="current-password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                </label>
                <button
                    class="btn btn--primary"
                    type="submit"
                    disabled=move || !can_submit(online.get(), busy.get())
                >
                    {move || if busy.get() { "Signing in..." } else { "Sign in" }}
                </button>
                <a class="auth-page__link" href=Route::Register.path()>
                    "Create an account"
                </a>
            </form>
        </div>
    }
}
