//! Lesson authoring: list, two-page editor, delete and assign to a class.
//!
//! SYSTEM CONTEXT
//! ==============
//! The list comes from the teacher service. Editing first fetches the full
//! lesson so the editor starts from the stored steps, not the summary row.
//! The editor's first page holds the lesson details, the second its steps;
//! the lesson is only sent once it has a title and at least one step.

#[cfg(test)]
#[path = "lessons_test.rs"]
mod lessons_test;

use async_trait::async_trait;
use flows::{CrudService, CrudView, EditMode, ValidationError, validate};
use leptos::prelude::*;
use wire::RequestError;
use wire::types::{Difficulty, LessonAssignment, LessonSummary, StepKind, TeacherClass};

use crate::components::confirm_dialog::ConfirmDialog;
use crate::components::search_box::SearchBox;
use crate::net::api::api_from;
use crate::pages::crud_actions::{ActionContext, ViewSignal};
use crate::state::config::ConfigState;
use crate::state::forms::{EditorPage, LessonForm};
use crate::state::notice::NoticeState;
use crate::state::session::SessionState;
use crate::util::scope::{spawn_browser, view_scope};

/// Build an assignment from the dialog inputs. A blank due date means none.
pub(crate) fn assignment(class_id: Option<i64>, due_date: &str) -> Result<LessonAssignment, ValidationError> {
    let class_id = class_id.ok_or(ValidationError::Required("class"))?;
    let due_date = due_date.trim();
    Ok(LessonAssignment {
        class_id,
        due_date: (!due_date.is_empty()).then(|| due_date.to_owned()),
    })
}

#[derive(Clone, Copy)]
pub(crate) struct LessonService {
    config: RwSignal<ConfigState>,
}

#[async_trait(?Send)]
impl CrudService for LessonService {
    type Item = LessonSummary;
    type Form = LessonForm;

    async fn list(&self) -> Result<Vec<LessonSummary>, RequestError> {
        api_from(self.config).teacher().lessons().await
    }

    async fn create(&self, form: &LessonForm) -> Result<(), RequestError> {
        api_from(self.config).teacher().create_lesson(&form.draft).await.map(drop)
    }

    async fn update(&self, key: &String, form: &LessonForm) -> Result<(), RequestError> {
        api_from(self.config).teacher().update_lesson(key, &form.draft).await.map(drop)
    }

    async fn delete(&self, key: &String) -> Result<(), RequestError> {
        api_from(self.config).teacher().delete_lesson(key).await.map(drop)
    }

    fn validate(&self, _mode: &EditMode<String>, form: &LessonForm) -> Result<(), ValidationError> {
        validate::lesson(&form.draft)
    }
}

#[component]
pub fn LessonsTab() -> impl IntoView {
    let config = expect_context::<RwSignal<ConfigState>>();
    let notices = expect_context::<RwSignal<NoticeState>>();
    let actions = ActionContext::mount(LessonService { config }, config);
    let view = actions.get_value().view;
    let scope = view_scope();
    let assigning = RwSignal::new(None::<LessonSummary>);

    let open_edit = move |lesson_id: String| {
        let scope = scope.clone();
        spawn_browser(async move {
            match scope.run(api_from(config).teacher().lesson(&lesson_id)).await {
                Some(Ok(detail)) => view.update(|v| v.open_edit(lesson_id, LessonForm::from_detail(&detail))),
                Some(Err(error)) => notices.update(|n| n.failed("Could not open lesson", &error)),
                None => {}
            }
        });
    };

    let on_search = Callback::new(move |term: String| view.update(|v| v.set_search(term)));
    let on_cancel = Callback::new(move |()| view.update(CrudView::close_editor));
    let on_save = Callback::new(move |()| actions.get_value().submit("Lesson saved."));
    let on_delete_cancel = Callback::new(move |()| view.update(CrudView::cancel_delete));
    let on_delete = Callback::new(move |()| actions.get_value().confirm_delete("Lesson deleted."));
    let on_assign_close = Callback::new(move |()| assigning.set(None));

    let rows = move || {
        view.with(|v| {
            v.visible()
                .into_iter()
                .cloned()
                .map(|lesson| {
                    let id = lesson.id.clone();
                    let edit_id = lesson.id.clone();
                    let open_edit = open_edit.clone();
                    let assign_target = lesson.clone();
                    view! {
                        <tr>
                            <td>{lesson.title}</td>
                            <td>{lesson.difficulty.as_str()}</td>
                            <td>{lesson.step_count}</td>
                            <td>{if lesson.active { "Active" } else { "Inactive" }}</td>
                            <td class="table__actions">
                                <button class="btn" on:click=move |_| open_edit(edit_id.clone())>"Edit"</button>
                                <button class="btn" on:click=move |_| assigning.set(Some(assign_target.clone()))>
                                    "Assign"
                                </button>
                                <button class="btn btn--danger" on:click=move |_| view.update(|v| v.request_delete(id.clone()))>
                                    "Delete"
                                </button>
                            </td>
                        </tr>
                    }
                })
                .collect::<Vec<_>>()
        })
    };

    view! {
        <section class="crud-view">
            <div class="crud-view__toolbar">
                <h2>"Lessons"</h2>
                <SearchBox placeholder="Search lessons" on_search=on_search/>
                <button
                    class="btn btn--primary"
                    on:click=move |_| {
                        let existing = view.with_untracked(|v| v.items().len());
                        view.update(|v| v.open_create(LessonForm::new_lesson(existing)));
                    }
                >
                    "+ New lesson"
                </button>
            </div>
            <Show when=move || view.with(CrudView::is_loaded) fallback=|| view! { <p>"Loading..."</p> }>
                <table class="table">
                    <thead>
                        <tr>
                            <th>"Title"</th>
                            <th>"Difficulty"</th>
                            <th>"Steps"</th>
                            <th>"Status"</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>{rows.clone()}</tbody>
                </table>
            </Show>
            <Show when=move || view.with(CrudView::is_editing)>
                <LessonEditor view=view on_cancel=on_cancel on_save=on_save/>
            </Show>
            <Show when=move || view.with(|v| v.pending_delete().is_some())>
                <ConfirmDialog
                    title="Delete lesson"
                    message="Students will lose access to this lesson and its results."
                    on_confirm=on_delete
                    on_cancel=on_delete_cancel
                />
            </Show>
            {move || assigning.get().map(|lesson| view! { <AssignDialog lesson=lesson on_close=on_assign_close/> })}
        </section>
    }
}

fn update_form(view: ViewSignal<LessonService>, change: impl FnOnce(&mut LessonForm)) {
    view.update(|v| {
        if let Some(form) = v.form_mut() {
            change(form);
        }
    });
}

#[component]
fn LessonEditor(view: ViewSignal<LessonService>, on_cancel: Callback<()>, on_save: Callback<()>) -> impl IntoView {
    let notices = expect_context::<RwSignal<NoticeState>>();
    let creating = view.with_untracked(|v| v.editor().is_some_and(|e| e.mode == EditMode::Create));
    let form = move || view.with(|v| v.editor().map(|e| e.form.clone()).unwrap_or_default());
    let page = move || form().page;

    let on_next = move |_| {
        let mut result = Ok(());
        update_form(view, |f| result = f.next_page());
        if let Err(error) = result {
            notices.update(|n| n.error(error.to_string()));
        }
    };
    let on_add_step = move |_| {
        let mut result = Ok(());
        update_form(view, |f| result = f.add_step());
        if let Err(error) = result {
            notices.update(|n| n.error(error.to_string()));
        }
    };

    view! {
        <div class="dialog-backdrop" on:click=move |_| on_cancel.run(())>
            <div class="dialog dialog--wide" on:click=move |ev| ev.stop_propagation()>
                <h2>{if creating { "New lesson" } else { "Edit lesson" }}</h2>
                <Show
                    when=move || page() == EditorPage::Details
                    fallback=move || {
                        view! {
                            <h3>{move || format!("Steps ({})", form().draft.steps.len())}</h3>
                            <ol class="dialog__list">
                                {move || {
                                    form()
                                        .draft
                                        .steps
                                        .into_iter()
                                        .enumerate()
                                        .map(|(index, step)| {
                                            view! {
                                                <li>
                                                    <strong>{step.target}</strong>
                                                    " - "
                                                    {step.prompt}
                                                    <button class="btn btn--danger" on:click=move |_| update_form(view, |f| f.remove_step(index))>
                                                        "Remove"
                                                    </button>
                                                </li>
                                            }
                                        })
                                        .collect::<Vec<_>>()
                                }}
                            </ol>
                            <div class="dialog__group">
                                <label class="dialog__label">
                                    "Type"
                                    <select
                                        class="dialog__input"
                                        on:change=move |ev| {
                                            let kind = StepKind::parse_lenient(&event_target_value(&ev));
                                            update_form(view, |f| f.pending_step.kind = kind);
                                        }
                                    >
                                        {StepKind::ALL
                                            .into_iter()
                                            .map(|kind| {
                                                view! {
                                                    <option value=kind.as_str() selected=move || form().pending_step.kind == kind>
                                                        {kind.as_str()}
                                                    </option>
                                                }
                                            })
                                            .collect::<Vec<_>>()}
                                    </select>
                                </label>
                                <label class="dialog__label">
                                    "Target"
                                    <input
                                        class="dialog__input"
                                        type="text"
                                        prop:value=move || form().pending_step.target
                                        on:input=move |ev| {
                                            let value = event_target_value(&ev);
                                            update_form(view, |f| f.pending_step.target = value);
                                        }
                                    />
                                </label>
                                <label class="dialog__label">
                                    "Prompt"
                                    <input
                                        class="dialog__input"
                                        type="text"
                                        prop:value=move || form().pending_step.prompt
                                        on:input=move |ev| {
                                            let value = event_target_value(&ev);
                                            update_form(view, |f| f.pending_step.prompt = value);
                                        }
                                    />
                                </label>
                                <label class="dialog__label">
                                    "Hint"
                                    <input
                                        class="dialog__input"
                                        type="text"
                                        prop:value=move || form().pending_step.hint
                                        on:input=move |ev| {
                                            let value = event_target_value(&ev);
                                            update_form(view, |f| f.pending_step.hint = value);
                                        }
                                    />
                                </label>
                                <label class="dialog__label">
                                    "Attempts allowed"
                                    <input
                                        class="dialog__input"
                                        type="number"
                                        min="1"
                                        prop:value=move || form().pending_step.max_attempts.to_string()
                                        on:input=move |ev| {
                                            if let Ok(value) = event_target_value(&ev).parse::<u32>() {
                                                update_form(view, |f| f.pending_step.max_attempts = value.max(1));
                                            }
                                        }
                                    />
                                </label>
                                <button class="btn" on:click=on_add_step>"Add step"</button>
                            </div>
                            <div class="dialog__actions">
                                <button class="btn" on:click=move |_| update_form(view, LessonForm::previous_page)>"Back"</button>
                                <button class="btn" on:click=move |_| on_cancel.run(())>"Cancel"</button>
                                <button class="btn btn--primary" on:click=move |_| on_save.run(())>"Save lesson"</button>
                            </div>
                        }
                    }
                >
                    <label class="dialog__label">
                        "Title"
                        <input
                            class="dialog__input"
                            type="text"
                            prop:value=move || form().draft.title
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                update_form(view, |f| f.draft.title = value);
                            }
                        />
                    </label>
                    <label class="dialog__label">
                        "Description"
                        <textarea
                            class="dialog__input"
                            prop:value=move || form().draft.description
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                update_form(view, |f| f.draft.description = value);
                            }
                        ></textarea>
                    </label>
                    <label class="dialog__label">
                        "Difficulty"
                        <select
                            class="dialog__input"
                            on:change=move |ev| {
                                let difficulty = Difficulty::parse_lenient(&event_target_value(&ev));
                                update_form(view, |f| f.draft.difficulty = difficulty);
                            }
                        >
                            {Difficulty::ALL
                                .into_iter()
                                .map(|difficulty| {
                                    view! {
                                        <option value=difficulty.as_str() selected=move || form().draft.difficulty == difficulty>
                                            {difficulty.as_str()}
                                        </option>
                                    }
                                })
                                .collect::<Vec<_>>()}
                        </select>
                    </label>
                    <label class="dialog__label">
                        "Order"
                        <input
                            class="dialog__input"
                            type="number"
                            min="0"
                            prop:value=move || form().draft.order_index.to_string()
                            on:input=move |ev| {
                                if let Ok(value) = event_target_value(&ev).parse::<i64>() {
                                    update_form(view, |f| f.draft.order_index = value);
                                }
                            }
                        />
                    </label>
                    <div class="dialog__actions">
                        <button class="btn" on:click=move |_| on_cancel.run(())>"Cancel"</button>
                        <button class="btn btn--primary" on:click=on_next>"Next: steps"</button>
                    </div>
                </Show>
            </div>
        </div>
    }
}

#[component]
fn AssignDialog(lesson: LessonSummary, on_close: Callback<()>) -> impl IntoView {
    let config = expect_context::<RwSignal<ConfigState>>();
    let session = expect_context::<RwSignal<SessionState>>();
    let notices = expect_context::<RwSignal<NoticeState>>();
    let scope = view_scope();
    let classes = RwSignal::new(Vec::<TeacherClass>::new());
    let class_id = RwSignal::new(None::<i64>);
    let due_date = RwSignal::new(String::new());

    if let Some(teacher_id) = session.get_untracked().user_id() {
        let scope = scope.clone();
        spawn_browser(async move {
            match scope.run(api_from(config).teacher().classes(teacher_id)).await {
                Some(Ok(list)) => classes.set(list.classes),
                Some(Err(error)) => notices.update(|n| n.failed("Could not load classes", &error)),
                None => {}
            }
        });
    }

    let lesson_id = lesson.id.clone();
    let on_assign = move |_| {
        let request = match assignment(class_id.get_untracked(), &due_date.get_untracked()) {
            Ok(request) => request,
            Err(error) => {
                notices.update(|n| n.error(error.to_string()));
                return;
            }
        };
        let scope = scope.clone();
        let lesson_id = lesson_id.clone();
        spawn_browser(async move {
            match scope.run(api_from(config).teacher().assign_lesson(&lesson_id, &request)).await {
                Some(Ok(_)) => {
                    notices.update(|n| n.success("Lesson assigned."));
                    on_close.run(());
                }
                Some(Err(error)) => notices.update(|n| n.failed("Could not assign lesson", &error)),
                None => {}
            }
        });
    };

    view! {
        <div class="dialog-backdrop" on:click=move |_| on_close.run(())>
            <div class="dialog" on:click=move |ev| ev.stop_propagation()>
                <h2>{format!("Assign \"{}\"", lesson.title)}</h2>
                <label class="dialog__label">
                    "Class"
                    <select
                        class="dialog__input"
                        on:change=move |ev| class_id.set(event_target_value(&ev).parse().ok())
                    >
                        <option value="" selected=move || class_id.get().is_none()>"Choose a class"</option>
                        {move || {
                            classes
                                .get()
                                .into_iter()
                                .map(|class| view! { <option value=class.id.to_string()>{class.name}</option> })
                                .collect::<Vec<_>>()
                        }}
                    </select>
                </label>
                <label class="dialog__label">
                    "Due date (optional)"
                    <input
                        class="dialog__input"
                        type="date"
                        prop:value=move || due_date.get()
                        on:input=move |ev| due_date.set(event_target_value(&ev))
                    />
                </label>
                <div class="dialog__actions">
                    <button class="btn" on:click=move |_| on_close.run(())>"Cancel"</button>
                    <button class="btn btn--primary" on:click=on_assign>"Assign"</button>
                </div>
            </div>
        </div>
    }
}
