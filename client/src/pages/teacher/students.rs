//! The teacher's classes, their rosters, and per-student progress.

use flows::search;
use leptos::prelude::*;
use wire::types::{ClassStudent, StudentDetail, TeacherClass};

use super::progress::accuracy_label;
use crate::components::search_box::SearchBox;
use crate::net::api::api_from;
use crate::state::config::ConfigState;
use crate::state::notice::NoticeState;
use crate::state::session::SessionState;
use crate::util::scope::{spawn_browser, view_scope};

#[component]
pub fn StudentsTab() -> impl IntoView {
    let config = expect_context::<RwSignal<ConfigState>>();
    let session = expect_context::<RwSignal<SessionState>>();
    let notices = expect_context::<RwSignal<NoticeState>>();
    let scope = view_scope();

    let classes = RwSignal::new(None::<Vec<TeacherClass>>);
    let selected_class = RwSignal::new(None::<i64>);
    let roster = RwSignal::new(Vec::<ClassStudent>::new());
    let term = RwSignal::new(String::new());
    let detail_for = RwSignal::new(None::<i64>);

    {
        let scope = scope.clone();
        Effect::new(move || {
            if !config.get().loaded {
                return;
            }
            let Some(teacher_id) = session.get().user_id() else {
                return;
            };
            let scope = scope.clone();
            spawn_browser(async move {
                match scope.run(api_from(config).teacher().classes(teacher_id)).await {
                    Some(Ok(list)) => {
                        if let Some(first) = list.classes.first() {
                            selected_class.set(Some(first.id));
                        }
                        classes.set(Some(list.classes));
                    }
                    Some(Err(error)) => notices.update(|n| n.failed("Could not load classes", &error)),
                    None => {}
                }
            });
        });
    }

    // The roster endpoint is authoritative for the selected class.
    Effect::new(move || {
        let Some(class_id) = selected_class.get() else {
            return;
        };
        let scope = scope.clone();
        spawn_browser(async move {
            match scope.run(api_from(config).teacher().class_students(class_id)).await {
                Some(Ok(list)) => roster.set(list.students),
                Some(Err(error)) => notices.update(|n| n.failed("Could not load students", &error)),
                None => {}
            }
        });
    });

    let visible = move || {
        roster.with(|all| {
            term.with(|t| search::filter(all, t).into_iter().cloned().collect::<Vec<_>>())
        })
    };

    view! {
        <section class="crud-view">
            <div class="crud-view__toolbar">
                <h2>"Students"</h2>
                <select
                    class="dialog__input"
                    on:change=move |ev| selected_class.set(event_target_value(&ev).parse().ok())
                >
                    {move || {
                        classes
                            .get()
                            .unwrap_or_default()
                            .into_iter()
                            .map(|class| {
                                let id = class.id;
                                view! {
                                    <option value=id.to_string() selected=move || selected_class.get() == Some(id)>
                                        {format!("{} ({} students, {} lessons)", class.name, class.student_count, class.lesson_count)}
                                    </option>
                                }
                            })
                            .collect::<Vec<_>>()
                    }}
                </select>
                <SearchBox placeholder="Search students" on_search=Callback::new(move |value: String| term.set(value))/>
            </div>
            <Show when=move || classes.with(Option::is_some) fallback=|| view! { <p>"Loading..."</p> }>
                <Show
                    when=move || classes.with(|c| c.as_ref().is_some_and(|c| !c.is_empty()))
                    fallback=|| view! { <p>"You have no classes yet."</p> }
                >
                    <table class="table">
                        <thead>
                            <tr>
                                <th>"Name"</th>
                                <th>"Username"</th>
                                <th>"Completed lessons"</th>
                                <th>"Total score"</th>
                                <th></th>
                            </tr>
                        </thead>
                        <tbody>
                            {move || {
                                visible()
                                    .into_iter()
                                    .map(|student| {
                                        let id = student.id;
                                        view! {
                                            <tr>
                                                <td>{student.full_name}</td>
                                                <td>{student.username}</td>
                                                <td>{student.completed_lessons}</td>
                                                <td>{student.total_score}</td>
                                                <td class="table__actions">
                                                    <button class="btn" on:click=move |_| detail_for.set(Some(id))>"Progress"</button>
                                                </td>
                                            </tr>
                                        }
                                    })
                                    .collect::<Vec<_>>()
                            }}
                        </tbody>
                    </table>
                </Show>
            </Show>
            {move || {
                detail_for
                    .get()
                    .map(|student_id| {
                        view! { <StudentDetailDialog student_id=student_id on_close=Callback::new(move |()| detail_for.set(None))/> }
                    })
            }}
        </section>
    }
}

#[component]
fn StudentDetailDialog(student_id: i64, on_close: Callback<()>) -> impl IntoView {
    let config = expect_context::<RwSignal<ConfigState>>();
    let notices = expect_context::<RwSignal<NoticeState>>();
    let scope = view_scope();
    let detail = RwSignal::new(None::<StudentDetail>);

    spawn_browser(async move {
        match scope.run(api_from(config).teacher().student_detail(student_id)).await {
            Some(Ok(loaded)) => detail.set(Some(loaded)),
            Some(Err(error)) => notices.update(|n| n.failed("Could not load student", &error)),
            None => {}
        }
    });

    view! {
        <div class="dialog-backdrop" on:click=move |_| on_close.run(())>
            <div class="dialog dialog--wide" on:click=move |ev| ev.stop_propagation()>
                {move || match detail.get() {
                    None => view! { <p>"Loading..."</p> }.into_any(),
                    Some(detail) => {
                        let overall = detail.overall;
                        view! {
                            <h2>{detail.student.full_name}</h2>
                            <p class="dialog__summary">
                                {format!(
                                    "{} of {} lessons completed, accuracy {}",
                                    overall.lessons_completed,
                                    overall.lessons_attempted,
                                    accuracy_label(overall.overall_accuracy),
                                )}
                            </p>
                            <table class="table">
                                <thead>
                                    <tr>
                                        <th>"Lesson"</th>
                                        <th>"Score"</th>
                                        <th>"Correct / attempts"</th>
                                        <th>"Finished"</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    {detail
                                        .progress
                                        .into_iter()
                                        .map(|row| {
                                            view! {
                                                <tr>
                                                    <td>{row.title}</td>
                                                    <td>{row.score}</td>
                                                    <td>{format!("{} / {}", row.correct_attempts, row.total_attempts)}</td>
                                                    <td>{row.finished_at.unwrap_or_else(|| "In progress".to_owned())}</td>
                                                </tr>
                                            }
                                        })
                                        .collect::<Vec<_>>()}
                                </tbody>
                            </table>
                        }
                            .into_any()
                    }
                }}
                <div class="dialog__actions">
                    <button class="btn btn--primary" on:click=move |_| on_close.run(())>"Close"</button>
                </div>
            </div>
        </div>
    }
}
