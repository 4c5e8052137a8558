//! Student home: greeting plus entry points to lessons and the device.

use flows::Route;
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::components::page_header::PageHeader;
use crate::state::session::SessionState;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    crate::util::auth::install_route_guard(Route::Dashboard, session, use_navigate());

    view! {
        <Show
            when=move || session.get().allows(Route::Dashboard)
            fallback=|| view! { <div class="loading-page"><p>"Loading..."</p></div> }
        >
            <div class="dashboard-page">
                <PageHeader title="TouchGlyph"/>
                <main class="dashboard-page__body">
                    <h1>{move || format!("Hello, {}", session.get().display_name())}</h1>
                    <div class="card-grid">
                        <a class="feature-card" href=Route::Lessons.path()>
                            <span class="feature-card__title">"My lessons"</span>
                            <span class="feature-card__description">"Practice the lessons your teacher assigned"</span>
                        </a>
                        <a class="feature-card" href=Route::Devices.path()>
                            <span class="feature-card__title">"Braille device"</span>
                            <span class="feature-card__description">"Raise points and send letters to the cell"</span>
                        </a>
                    </div>
                </main>
            </div>
        </Show>
    }
}
