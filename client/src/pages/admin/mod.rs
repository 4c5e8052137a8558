//! Admin dashboard: a tabbed shell over the admin service.
//!
//! SYSTEM CONTEXT
//! ==============
//! Only admins may render this route. Each tab mounts its own view with its
//! own load cycle, so switching tabs always shows fresh data. The last open
//! tab survives a reload.

mod classes;
mod devices;
mod reports;
mod settings;
mod users;

use flows::Route;
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use wire::types::Role;

use crate::components::page_header::PageHeader;
use crate::state::session::SessionState;
use crate::state::tabs::{ADMIN_TAB_KEY, AdminTab};
use crate::util::ui_persistence::persisted_signal;

#[component]
pub fn AdminPage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    crate::util::auth::install_route_guard(Route::Admin, session, use_navigate());
    let tab = persisted_signal::<AdminTab>(ADMIN_TAB_KEY);

    view! {
        <Show
            when=move || session.get().allows(Route::Admin)
            fallback=|| view! { <div class="loading-page"><p>"Loading..."</p></div> }
        >
            <div class="admin-page">
                <PageHeader title="Administration">
                    <nav class="tab-bar">
                        {AdminTab::ALL
                            .into_iter()
                            .map(|item| {
                                view! {
                                    <button
                                        class="btn tab-bar__tab"
                                        class:tab-bar__tab--active=move || tab.get() == item
                                        on:click=move |_| tab.set(item)
                                    >
                                        {item.label()}
                                    </button>
                                }
                            })
                            .collect::<Vec<_>>()}
                    </nav>
                </PageHeader>
                <main class="admin-page__body">
                    {move || match tab.get() {
                        AdminTab::Home => view! { <AdminHome tab=tab/> }.into_any(),
                        AdminTab::Teachers => view! { <users::UsersTab role=Role::Teacher/> }.into_any(),
                        AdminTab::Students => view! { <users::UsersTab role=Role::Student/> }.into_any(),
                        AdminTab::Classes => view! { <classes::ClassesTab/> }.into_any(),
                        AdminTab::Devices => view! { <devices::DevicesTab/> }.into_any(),
                        AdminTab::Reports => view! { <reports::ReportsTab/> }.into_any(),
                        AdminTab::Settings => view! { <settings::SettingsTab/> }.into_any(),
                    }}
                </main>
            </div>
        </Show>
    }
}

/// Landing tab: one card per management area.
#[component]
fn AdminHome(tab: RwSignal<AdminTab>) -> impl IntoView {
    view! {
        <div class="card-grid">
            {AdminTab::ALL
                .into_iter()
                .filter(|item| *item != AdminTab::Home)
                .map(|item| {
                    view! {
                        <button class="feature-card" on:click=move |_| tab.set(item)>
                            <span class="feature-card__title">{item.label()}</span>
                            <span class="feature-card__description">{item.description()}</span>
                        </button>
                    }
                })
                .collect::<Vec<_>>()}
        </div>
    }
}
