//! Teacher dashboard: lessons, students, progress and profile tabs.

mod lessons;
mod profile;
mod progress;
mod students;

use flows::Route;
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::components::page_header::PageHeader;
use crate::state::session::SessionState;
use crate::state::tabs::{TEACHER_TAB_KEY, TeacherTab};
use crate::util::ui_persistence::persisted_signal;

#[component]
pub fn TeacherPage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    crate::util::auth::install_route_guard(Route::Teacher, session, use_navigate());
    let tab = persisted_signal::<TeacherTab>(TEACHER_TAB_KEY);

    view! {
        <Show
            when=move || session.get().allows(Route::Teacher)
            fallback=|| view! { <div class="loading-page"><p>"Loading..."</p></div> }
        >
            <div class="teacher-page">
                <PageHeader title="Teacher">
                    <nav class="tab-bar">
                        {TeacherTab::ALL
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
                <main class="teacher-page__body">
                    {move || match tab.get() {
                        TeacherTab::Lessons => view! { <lessons::LessonsTab/> }.into_any(),
                        TeacherTab::Students => view! { <students::StudentsTab/> }.into_any(),
                        TeacherTab::Progress => view! { <progress::ProgressTab/> }.into_any(),
                        TeacherTab::Profile => view! { <profile::ProfileTab/> }.into_any(),
                    }}
                </main>
            </div>
        </Show>
    }
}
