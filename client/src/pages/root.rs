//! `/`: sends every visitor to the page their session allows.

use flows::Route;
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::state::session::SessionState;

#[component]
pub fn RootPage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let navigate = use_navigate();

    // The root never renders content of its own; an unauthenticated visitor
    // is sent to login instead of seeing a blank page.
    Effect::new(move || {
        let state = session.get();
        if !state.loaded {
            return;
        }
        let target = state.role().map_or(Route::Login, Route::landing);
        navigate(target.path(), leptos_router::NavigateOptions::default());
    });

    view! {
        <div class="loading-page">
            <p>"Loading..."</p>
        </div>
    }
}
