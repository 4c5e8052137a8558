//! Self-service registration.
//!
//! Shares the login page's reachability probe. After the account is created
//! the user signs in through the login page.

#[cfg(test)]
#[path = "register_test.rs"]
mod register_test;

use flows::{Route, ValidationError, validate};
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use wire::types::{Registration, Role};

use super::login::{backend_label, can_submit, probe_backend};
use crate::state::config::ConfigState;
use crate::state::notice::NoticeState;
use crate::state::session::SessionState;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct RegisterForm {
    pub full_name: String,
    pub username: String,
    pub password: String,
    pub confirm: String,
    pub role: Option<Role>,
}

impl RegisterForm {
    pub(crate) fn to_registration(&self) -> Result<Registration, ValidationError> {
        let role = self.role.ok_or(ValidationError::Required("role"))?;
        if self.password != self.confirm {
            return Err(ValidationError::PasswordMismatch);
        }
        let registration = Registration {
            username: self.username.trim().to_owned(),
            full_name: self.full_name.trim().to_owned(),
            password: self.password.clone(),
            role,
        };
        validate::registration(&registration)?;
        Ok(registration)
    }
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let config = expect_context::<RwSignal<ConfigState>>();
    let notices = expect_context::<RwSignal<NoticeState>>();
    let navigate = use_navigate();
    crate::util::auth::install_route_guard(Route::Register, session, navigate.clone());

    let form = RwSignal::new(RegisterForm::default());
    let busy = RwSignal::new(false);
    let online = probe_backend(config);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if !can_submit(online.get_untracked(), busy.get_untracked()) {
            return;
        }
        let registration = match form.get_untracked().to_registration() {
            Ok(registration) => registration,
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
                match api.auth().register(&registration).await {
                    Ok(user) => {
                        notices.update(|n| n.success(format!("Account {} created. You can sign in now.", user.username)));
                        navigate(Route::Login.path(), NavigateOptions::default());
                    }
                    Err(error) => notices.update(|n| n.error(wire::api::friendly_registration_error(&error))),
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (registration, &navigate);
        }
    };

    view! {
        <div class="auth-page">
            <form class="auth-page__card" on:submit=on_submit>
                <h1>"Create account"</h1>
                <p class="auth-page__status">{move || backend_label(online.get())}</p>
                <label class="dialog__label">
                    "Full name"
                    <input
                        class="dialog__input"
                        type="text"
                        prop:value=move || form.get().full_name
                        on:input=move |ev| form.update(|f| f.full_name = event_target_value(&ev))
                    />
                </label>
                <label class="dialog__label">
                    "Username"
                    <input
                        class="dialog__input"
                        type="text"
                        prop:value=move || form.get().username
                        on:input=move |ev| form.update(|f| f.username = event_target_value(&ev))
                    />
                </label>
                <label class="dialog__label">
                    "Password"
                    <input
                        class="dialog__input"
                        type="password"
                        prop:value=move || form.get().password
                        on:input=move |ev| form.update(|f| f.password = event_target_value(&ev))
                    />
                </label>
                <label class="dialog__label">
                    "Confirm password"
                    <input
                        class="dialog__input"
                        type="password"
                        prop:value=move || form.get().confirm
                        on:input=move |ev| form.update(|f| f.confirm = event_target_value(&ev))
                    />
                </label>
                <label class="dialog__label">
                    "Role"
                    <select
                        class="dialog__input"
                        on:change=move |ev| {
                            let value = event_target_value(&ev);
                            form.update(|f| f.role = Role::ALL.into_iter().find(|role| role.as_str() == value));
                        }
                    >
                        <option value="" selected=move || form.get().role.is_none()>"Choose a role"</option>
                        {Role::ALL
                            .into_iter()
                            .map(|role| {
                                view! {
                                    <option value=role.as_str() selected=move || form.get().role == Some(role)>
                                        {role.label()}
                                    </option>
                                }
                            })
                            .collect::<Vec<_>>()}
                    </select>
                </label>
                <button
                    class="btn btn--primary"
                    type="submit"
                    disabled=move || !can_submit(online.get(), busy.get())
                >
                    {move || if busy.get() { "Creating..." } else { "Create account" }}
                </button>
                <a class="auth-page__link" href=Route::Login.path()>
                    "Already have an account? Sign in"
                </a>
            </form>
        </div>
    }
}
