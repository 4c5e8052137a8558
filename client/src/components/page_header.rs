//! Top bar shared by the role dashboards: title, signed-in user and logout.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::state::session::SessionState;

#[component]
pub fn PageHeader(#[prop(into)] title: String, #[prop(optional)] children: Option<Children>) -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let navigate = use_navigate();

    let on_logout = move |_| crate::util::auth::sign_out(session, navigate.clone());

    view! {
        <header class="page-header toolbar">
            <span class="toolbar__title">{title}</span>
            <span class="toolbar__divider" aria-hidden="true"></span>
            {children.map(|children| children())}
            <span class="toolbar__spacer"></span>
            <span class="toolbar__self">
                {move || session.get().display_name()}
                " ("
                <span class="toolbar__self-method">
                    {move || session.get().role().map(|role| role.label()).unwrap_or_default()}
                </span>
                ")"
            </span>
            <button class="btn toolbar__logout" on:click=on_logout title="Logout">
                "Logout"
            </button>
        </header>
    }
}
