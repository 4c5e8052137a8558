//! The teacher's own personal data.
//!
//! A successful update also rewrites the cached profile so the header and
//! every later page show the new name without signing in again.

use leptos::prelude::*;

use crate::net::api::api_from;
use crate::state::config::ConfigState;
use crate::state::forms::ProfileForm;
use crate::state::notice::NoticeState;
use crate::state::session::SessionState;
use crate::util::auth::browser_session;
use crate::util::scope::{spawn_browser, view_scope};

#[component]
pub fn ProfileTab() -> impl IntoView {
    let config = expect_context::<RwSignal<ConfigState>>();
    let session = expect_context::<RwSignal<SessionState>>();
    let notices = expect_context::<RwSignal<NoticeState>>();
    let scope = view_scope();
    let form = RwSignal::new(
        session
            .get_untracked()
            .user
            .as_ref()
            .map(ProfileForm::from_profile)
            .unwrap_or_default(),
    );
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let Some(user) = session.get_untracked().user else {
            return;
        };
        let current = form.get_untracked();
        let data = match current.to_personal_data() {
            Ok(data) => data,
            Err(error) => {
                notices.update(|n| n.error(error.to_string()));
                return;
            }
        };
        busy.set(true);
        let scope = scope.clone();
        spawn_browser(async move {
            match scope.run(api_from(config).auth().update_personal_data(user.id, &data)).await {
                Some(Ok(_)) => {
                    let store = browser_session();
                    if let Err(error) = store.update_profile(&current.apply_to(&user)) {
                        notices.update(|n| n.failed("Could not save profile locally", &error));
                    } else {
                        session.set(SessionState::from_store(&store));
                        notices.update(|n| n.success("Profile updated."));
                    }
                }
                Some(Err(error)) => notices.update(|n| n.failed("Could not update profile", &error)),
                None => return,
            }
            busy.set(false);
        });
    };

    view! {
        <section class="profile">
            <h2>"Profile"</h2>
            <form class="profile__form" on:submit=on_submit>
                <p class="profile__username">
                    "Username: "
                    {move || session.get().user.map(|u| u.username).unwrap_or_default()}
                </p>
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
                    "Email"
                    <input
                        class="dialog__input"
                        type="email"
                        prop:value=move || form.get().email
                        on:input=move |ev| form.update(|f| f.email = event_target_value(&ev))
                    />
                </label>
                <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                    {move || if busy.get() { "Saving..." } else { "Save" }}
                </button>
            </form>
        </section>
    }
}
