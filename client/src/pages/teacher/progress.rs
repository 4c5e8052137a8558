//! Class-wide progress: totals and per-student activity.

#[cfg(test)]
#[path = "progress_test.rs"]
mod progress_test;

use flows::search;
use leptos::prelude::*;
use wire::types::TeacherDashboard;

use crate::components::search_box::SearchBox;
use crate::components::stat_card::StatCard;
use crate::net::api::api_from;
use crate::state::config::ConfigState;
use crate::state::notice::NoticeState;
use crate::util::scope::{spawn_browser, view_scope};

/// Accuracy as reported by the service (0-100), rounded to a whole percent.
pub(crate) fn accuracy_label(accuracy: f64) -> String {
    if accuracy.is_finite() {
        format!("{accuracy:.0}%")
    } else {
        "-".to_owned()
    }
}

#[component]
pub fn ProgressTab() -> impl IntoView {
    let config = expect_context::<RwSignal<ConfigState>>();
    let notices = expect_context::<RwSignal<NoticeState>>();
    let scope = view_scope();
    let dashboard = RwSignal::new(None::<TeacherDashboard>);
    let term = RwSignal::new(String::new());

    Effect::new(move || {
        if !config.get().loaded {
            return;
        }
        let scope = scope.clone();
        spawn_browser(async move {
            match scope.run(api_from(config).teacher().dashboard()).await {
                Some(Ok(loaded)) => dashboard.set(Some(loaded)),
                Some(Err(error)) => notices.update(|n| n.failed("Could not load progress", &error)),
                None => {}
            }
        });
    });

    let total = move |read: fn(&TeacherDashboard) -> i64| {
        Signal::derive(move || dashboard.with(|d| d.as_ref().map_or_else(|| "-".to_owned(), |d| read(d).to_string())))
    };

    view! {
        <section class="crud-view">
            <h2>"Progress"</h2>
            <div class="card-grid">
                <StatCard label="Students" value=total(|d| d.total_students)/>
                <StatCard label="Lessons" value=total(|d| d.total_lessons)/>
                <StatCard label="Active sessions" value=total(|d| d.active_sessions)/>
            </div>
            <div class="crud-view__toolbar">
                <SearchBox placeholder="Search students" on_search=Callback::new(move |value: String| term.set(value))/>
            </div>
            <table class="table">
                <thead>
                    <tr>
                        <th>"Student"</th>
                        <th>"Attempts"</th>
                        <th>"Correct"</th>
                        <th>"Accuracy"</th>
                        <th>"Completed"</th>
                        <th>"Last activity"</th>
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        dashboard.with(|d| {
                            let students = d.as_ref().map(|d| d.students.as_slice()).unwrap_or_default();
                            term.with(|t| {
                                search::filter(students, t)
                                    .into_iter()
                                    .cloned()
                                    .map(|student| {
                                        view! {
                                            <tr>
                                                <td>{student.name}</td>
                                                <td>{student.attempts}</td>
                                                <td>{student.corrects}</td>
                                                <td>{accuracy_label(student.accuracy)}</td>
                                                <td>{student.completed}</td>
                                                <td>{student.last_activity.unwrap_or_else(|| "Never".to_owned())}</td>
                                            </tr>
                                        }
                                    })
                                    .collect::<Vec<_>>()
                            })
                        })
                    }}
                </tbody>
            </table>
        </section>
    }
}
