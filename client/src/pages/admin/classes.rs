//! Class management: create, reassign teacher, delete, and enrolment.
//!
//! Editing a class only reassigns its teacher; the admin service has no
//! rename. The details dialog lists enrolled students and adds more from
//! the students not yet in the class.

#[cfg(test)]
#[path = "classes_test.rs"]
mod classes_test;

use async_trait::async_trait;
use flows::{CrudService, CrudView, EditMode, ValidationError, validate};
use leptos::prelude::*;
use wire::RequestError;
use wire::types::{AdminUser, ClassDetails, ClassSummary, EnrolledStudent};

use crate::components::confirm_dialog::ConfirmDialog;
use crate::components::search_box::SearchBox;
use crate::net::api::api_from;
use crate::pages::crud_actions::{ActionContext, ViewSignal};
use crate::state::config::ConfigState;
use crate::state::forms::{ClassForm, parse_teacher_choice};
use crate::state::notice::NoticeState;
use crate::util::scope::{spawn_browser, view_scope};

/// Students that may still be added to a class.
pub(crate) fn unenrolled(students: &[AdminUser], enrolled: &[EnrolledStudent]) -> Vec<AdminUser> {
    students
        .iter()
        .filter(|student| !enrolled.iter().any(|e| e.id == student.id))
        .cloned()
        .collect()
}

/// Add `id` to the selection, or remove it if already selected.
pub(crate) fn toggle_selection(selected: &mut Vec<i64>, id: i64) {
    if let Some(index) = selected.iter().position(|s| *s == id) {
        selected.remove(index);
    } else {
        selected.push(id);
    }
}

#[derive(Clone, Copy)]
pub(crate) struct ClassService {
    config: RwSignal<ConfigState>,
}

#[async_trait(?Send)]
impl CrudService for ClassService {
    type Item = ClassSummary;
    type Form = ClassForm;

    async fn list(&self) -> Result<Vec<ClassSummary>, RequestError> {
        Ok(api_from(self.config).admin().snapshot().await?.classes)
    }

    async fn create(&self, form: &ClassForm) -> Result<(), RequestError> {
        let class = form
            .to_new_class()
            .map_err(|error| RequestError::Rejected(error.to_string()))?;
        api_from(self.config).admin().create_class(&class).await.map(drop)
    }

    async fn update(&self, key: &i64, form: &ClassForm) -> Result<(), RequestError> {
        api_from(self.config)
            .admin()
            .assign_teacher(*key, form.teacher_id)
            .await
            .map(drop)
    }

    async fn delete(&self, key: &i64) -> Result<(), RequestError> {
        api_from(self.config).admin().delete_class(*key).await.map(drop)
    }

    fn validate(&self, mode: &EditMode<i64>, form: &ClassForm) -> Result<(), ValidationError> {
        match mode {
            EditMode::Create => validate::class_name(&form.name).map(drop),
            EditMode::Edit(_) => Ok(()),
        }
    }
}

#[component]
pub fn ClassesTab() -> impl IntoView {
    let config = expect_context::<RwSignal<ConfigState>>();
    let notices = expect_context::<RwSignal<NoticeState>>();
    let actions = ActionContext::mount(ClassService { config }, config);
    let view = actions.get_value().view;
    let scope = view_scope();

    // Teacher choices and enrolment candidates come from the same snapshot.
    let teachers = RwSignal::new(Vec::<AdminUser>::new());
    let students = RwSignal::new(Vec::<AdminUser>::new());
    Effect::new(move || {
        if !config.get().loaded {
            return;
        }
        let scope = scope.clone();
        spawn_browser(async move {
            match scope.run(api_from(config).admin().snapshot()).await {
                Some(Ok(snapshot)) => {
                    teachers.set(snapshot.teachers);
                    students.set(snapshot.students);
                }
                Some(Err(error)) => notices.update(|n| n.failed("Could not load teachers", &error)),
                None => {}
            }
        });
    });

    let details_for = RwSignal::new(None::<i64>);

    let on_search = Callback::new(move |term: String| view.update(|v| v.set_search(term)));
    let on_cancel = Callback::new(move |()| view.update(CrudView::close_editor));
    let on_save = Callback::new(move |()| actions.get_value().submit("Class saved."));
    let on_delete_cancel = Callback::new(move |()| view.update(CrudView::cancel_delete));
    let on_delete = Callback::new(move |()| actions.get_value().confirm_delete("Class deleted."));
    let on_details_close = Callback::new(move |()| {
        details_for.set(None);
        actions.get_value().reload();
    });

    let rows = move || {
        view.with(|v| {
            v.visible()
                .into_iter()
                .cloned()
                .map(|class| {
                    let id = class.id;
                    let form = ClassForm {
                        name: class.name.clone(),
                        teacher_id: class.teacher_id,
                    };
                    view! {
                        <tr>
                            <td>{class.name}</td>
                            <td>{class.teacher_name.unwrap_or_else(|| "Unassigned".to_owned())}</td>
                            <td>{class.students_count}</td>
                            <td class="table__actions">
                                <button class="btn" on:click=move |_| details_for.set(Some(id))>"Students"</button>
                                <button class="btn" on:click=move |_| view.update(|v| v.open_edit(id, form.clone()))>
                                    "Teacher"
                                </button>
                                <button class="btn btn--danger" on:click=move |_| view.update(|v| v.request_delete(id))>
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
                <h2>"Classes"</h2>
                <SearchBox placeholder="Search by class or teacher" on_search=on_search/>
                <button class="btn btn--primary" on:click=move |_| view.update(|v| v.open_create(ClassForm::default()))>
                    "+ New class"
                </button>
            </div>
            <Show when=move || view.with(CrudView::is_loaded) fallback=|| view! { <p>"Loading..."</p> }>
                <table class="table">
                    <thead>
                        <tr>
                            <th>"Class"</th>
                            <th>"Teacher"</th>
                            <th>"Students"</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>{rows}</tbody>
                </table>
            </Show>
            <Show when=move || view.with(CrudView::is_editing)>
                <ClassDialog view=view teachers=teachers on_cancel=on_cancel on_save=on_save/>
            </Show>
            <Show when=move || view.with(|v| v.pending_delete().is_some())>
                <ConfirmDialog
                    title="Delete class"
                    message="Enrolments and lesson assignments for this class will be removed."
                    on_confirm=on_delete
                    on_cancel=on_delete_cancel
                />
            </Show>
            {move || {
                details_for
                    .get()
                    .map(|class_id| view! { <ClassDetailsDialog class_id=class_id students=students on_close=on_details_close/> })
            }}
        </section>
    }
}

#[component]
fn ClassDialog(
    view: ViewSignal<ClassService>,
    teachers: RwSignal<Vec<AdminUser>>,
    on_cancel: Callback<()>,
    on_save: Callback<()>,
) -> impl IntoView {
    let creating = view.with_untracked(|v| v.editor().is_some_and(|e| e.mode == EditMode::Create));
    let teacher_id = move || view.with(|v| v.editor().and_then(|e| e.form.teacher_id));

    view! {
        <div class="dialog-backdrop" on:click=move |_| on_cancel.run(())>
            <div class="dialog" on:click=move |ev| ev.stop_propagation()>
                <h2>{if creating { "New class" } else { "Assign teacher" }}</h2>
                <Show when=move || creating>
                    <label class="dialog__label">
                        "Class name"
                        <input
                            class="dialog__input"
                            type="text"
                            prop:value=move || view.with(|v| v.editor().map(|e| e.form.name.clone()).unwrap_or_default())
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                view.update(|v| {
                                    if let Some(form) = v.form_mut() {
                                        form.name = value;
                                    }
                                });
                            }
                        />
                    </label>
                </Show>
                <label class="dialog__label">
                    "Teacher"
                    <select
                        class="dialog__input"
                        on:change=move |ev| {
                            let choice = parse_teacher_choice(&event_target_value(&ev));
                            view.update(|v| {
                                if let Some(form) = v.form_mut() {
                                    form.teacher_id = choice;
                                }
                            });
                        }
                    >
                        <option value="" selected=move || teacher_id().is_none()>"No teacher"</option>
                        {move || {
                            teachers
                                .get()
                                .into_iter()
                                .map(|teacher| {
                                    let id = teacher.id;
                                    view! {
                                        <option value=id.to_string() selected=move || teacher_id() == Some(id)>
                                            {teacher.full_name}
                                        </option>
                                    }
                                })
                                .collect::<Vec<_>>()
                        }}
                    </select>
                </label>
                <div class="dialog__actions">
                    <button class="btn" on:click=move |_| on_cancel.run(())>"Cancel"</button>
                    <button class="btn btn--primary" on:click=move |_| on_save.run(())>"Save"</button>
                </div>
            </div>
        </div>
    }
}

#[component]
fn ClassDetailsDialog(class_id: i64, students: RwSignal<Vec<AdminUser>>, on_close: Callback<()>) -> impl IntoView {
    let config = expect_context::<RwSignal<ConfigState>>();
    let notices = expect_context::<RwSignal<NoticeState>>();
    let scope = view_scope();
    let details = RwSignal::new(None::<ClassDetails>);
    let selected = RwSignal::new(Vec::<i64>::new());
    let busy = RwSignal::new(false);

    let load = {
        let scope = scope.clone();
        move || {
            let scope = scope.clone();
            spawn_browser(async move {
                match scope.run(api_from(config).admin().class_details(class_id)).await {
                    Some(Ok(loaded)) => details.set(Some(loaded)),
                    Some(Err(error)) => notices.update(|n| n.failed("Could not load class", &error)),
                    None => {}
                }
            });
        }
    };
    load();

    let on_add = move |_| {
        let ids = selected.get_untracked();
        if let Err(error) = validate::student_selection(&ids) {
            notices.update(|n| n.error(error.to_string()));
            return;
        }
        busy.set(true);
        let scope = scope.clone();
        let load = load.clone();
        spawn_browser(async move {
            match scope.run(api_from(config).admin().add_students(class_id, &ids)).await {
                Some(Ok(_)) => {
                    selected.set(Vec::new());
                    notices.update(|n| n.success("Students added."));
                    load();
                }
                Some(Err(error)) => notices.update(|n| n.failed("Could not add students", &error)),
                None => return,
            }
            busy.set(false);
        });
    };

    let candidates = move || {
        details.with(|d| {
            d.as_ref()
                .map(|d| students.with(|all| unenrolled(all, &d.students)))
                .unwrap_or_default()
        })
    };

    view! {
        <div class="dialog-backdrop" on:click=move |_| on_close.run(())>
            <div class="dialog dialog--wide" on:click=move |ev| ev.stop_propagation()>
                <h2>{move || details.with(|d| d.as_ref().map(|d| d.class.name.clone()).unwrap_or_else(|| "Class".to_owned()))}</h2>
                <h3>"Enrolled"</h3>
                <ul class="dialog__list">
                    {move || {
                        details.with(|d| {
                            d.as_ref()
                                .map(|d| d.students.clone())
                                .unwrap_or_default()
                                .into_iter()
                                .map(|student| view! { <li>{student.full_name}" ("{student.username}")"</li> })
                                .collect::<Vec<_>>()
                        })
                    }}
                </ul>
                <h3>"Add students"</h3>
                <ul class="dialog__list">
                    {move || {
                        candidates()
                            .into_iter()
                            .map(|student| {
                                let id = student.id;
                                view! {
                                    <li>
                                        <label class="dialog__label--inline">
                                            <input
                                                type="checkbox"
                                                prop:checked=move || selected.with(|s| s.contains(&id))
                                                on:change=move |_| selected.update(|s| toggle_selection(s, id))
                                            />
                                            {student.full_name}
                                        </label>
                                    </li>
                                }
                            })
                            .collect::<Vec<_>>()
                    }}
                </ul>
                <div class="dialog__actions">
                    <button class="btn" on:click=move |_| on_close.run(())>"Close"</button>
                    <button class="btn btn--primary" disabled=move || busy.get() on:click=on_add>
                        "Add selected"
                    </button>
                </div>
            </div>
        </div>
    }
}
