//! Teacher and student account management.
//!
//! One component serves both roles; the role decides which slice of the
//! admin snapshot is listed and which role new accounts get. The students
//! tab also imports rosters from CSV.

#[cfg(test)]
#[path = "users_test.rs"]
mod users_test;

use async_trait::async_trait;
use flows::{CrudService, EditMode, ValidationError, validate};
use leptos::prelude::*;
use wire::RequestError;
use wire::types::{AdminSnapshot, AdminUser, Role};

use crate::components::confirm_dialog::ConfirmDialog;
use crate::components::search_box::SearchBox;
use crate::net::api::api_from;
use crate::pages::crud_actions::ActionContext;
use crate::state::config::ConfigState;
use crate::state::forms::UserForm;
use crate::state::notice::NoticeState;
use crate::util::file::{is_csv, read_selected};
use crate::util::scope::spawn_browser;

/// Accounts of `role` from a snapshot.
pub(crate) fn users_with_role(snapshot: AdminSnapshot, role: Role) -> Vec<AdminUser> {
    match role {
        Role::Student => snapshot.students,
        Role::Teacher => snapshot.teachers,
        Role::Admin => snapshot.users.into_iter().filter(|user| user.role == Role::Admin).collect(),
    }
}

#[derive(Clone, Copy)]
pub(crate) struct UserService {
    config: RwSignal<ConfigState>,
    role: Role,
}

#[async_trait(?Send)]
impl CrudService for UserService {
    type Item = AdminUser;
    type Form = UserForm;

    async fn list(&self) -> Result<Vec<AdminUser>, RequestError> {
        let snapshot = api_from(self.config).admin().snapshot().await?;
        Ok(users_with_role(snapshot, self.role))
    }

    async fn create(&self, form: &UserForm) -> Result<(), RequestError> {
        api_from(self.config).admin().create_user(&form.to_new_user(self.role)).await.map(drop)
    }

    async fn update(&self, key: &i64, form: &UserForm) -> Result<(), RequestError> {
        api_from(self.config).admin().update_user(&form.to_update(*key)).await.map(drop)
    }

    async fn delete(&self, key: &i64) -> Result<(), RequestError> {
        api_from(self.config).admin().delete_user(*key).await.map(drop)
    }

    fn validate(&self, mode: &EditMode<i64>, form: &UserForm) -> Result<(), ValidationError> {
        match mode {
            EditMode::Create => validate::new_user(&form.to_new_user(self.role)),
            EditMode::Edit(id) => validate::user_update(&form.to_update(*id)),
        }
    }
}

#[component]
pub fn UsersTab(role: Role) -> impl IntoView {
    let config = expect_context::<RwSignal<ConfigState>>();
    let actions = ActionContext::mount(UserService { config, role }, config);
    let view = actions.get_value().view;
    let noun = role.label();

    let on_search = Callback::new(move |term: String| view.update(|v| v.set_search(term)));
    let on_cancel = Callback::new(move |()| view.update(flows::CrudView::close_editor));
    let on_save = Callback::new(move |()| actions.get_value().submit("Account saved."));
    let on_delete_cancel = Callback::new(move |()| view.update(flows::CrudView::cancel_delete));
    let on_delete = Callback::new(move |()| actions.get_value().confirm_delete("Account deleted."));

    let rows = move || {
        view.with(|v| {
            v.visible()
                .into_iter()
                .cloned()
                .map(|user| {
                    let id = user.id;
                    let edit_form = UserForm::from_user(&user);
                    view! {
                        <tr>
                            <td>{user.full_name}</td>
                            <td>{user.username}</td>
                            <td>{user.email.unwrap_or_default()}</td>
                            <td>{if user.active { "Active" } else { "Inactive" }}</td>
                            <td class="table__actions">
                                <button
                                    class="btn"
                                    on:click=move |_| view.update(|v| v.open_edit(id, edit_form.clone()))
                                >
                                    "Edit"
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
                <h2>{format!("{noun}s")}</h2>
                <SearchBox placeholder="Search by name or username" on_search=on_search/>
                <button class="btn btn--primary" on:click=move |_| view.update(|v| v.open_create(UserForm::default()))>
                    {format!("+ New {}", noun.to_lowercase())}
                </button>
                <Show when=move || role == Role::Student>
                    <CsvImport on_imported=Callback::new(move |()| actions.get_value().reload())/>
                </Show>
            </div>
            <Show when=move || view.with(flows::CrudView::is_loaded) fallback=|| view! { <p>"Loading..."</p> }>
                <table class="table">
                    <thead>
                        <tr>
                            <th>"Name"</th>
                            <th>"Username"</th>
                            <th>"Email"</th>
                            <th>"Status"</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>{rows}</tbody>
                </table>
            </Show>
            <Show when=move || view.with(flows::CrudView::is_editing)>
                <UserDialog role=role view=view on_cancel=on_cancel on_save=on_save/>
            </Show>
            <Show when=move || view.with(|v| v.pending_delete().is_some())>
                <ConfirmDialog
                    title=format!("Delete {}", noun.to_lowercase())
                    message="This account and its history will be removed."
                    on_confirm=on_delete
                    on_cancel=on_delete_cancel
                />
            </Show>
        </section>
    }
}

#[component]
fn UserDialog(
    role: Role,
    view: crate::pages::crud_actions::ViewSignal<UserService>,
    on_cancel: Callback<()>,
    on_save: Callback<()>,
) -> impl IntoView {
    let creating = view.with_untracked(|v| v.editor().is_some_and(|e| e.mode == EditMode::Create));
    let field = move |read: fn(&UserForm) -> String| {
        move || view.with(|v| v.editor().map(|e| read(&e.form)).unwrap_or_default())
    };
    let set = move |write: fn(&mut UserForm, String)| {
        move |ev: leptos::ev::Event| {
            let value = event_target_value(&ev);
            view.update(|v| {
                if let Some(form) = v.form_mut() {
                    write(form, value);
                }
            });
        }
    };

    view! {
        <div class="dialog-backdrop" on:click=move |_| on_cancel.run(())>
            <div class="dialog" on:click=move |ev| ev.stop_propagation()>
                <h2>{if creating { format!("New {}", role.label().to_lowercase()) } else { "Edit account".to_owned() }}</h2>
                <label class="dialog__label">
                    "Full name"
                    <input class="dialog__input" type="text" prop:value=field(|f| f.full_name.clone()) on:input=set(|f, v| f.full_name = v)/>
                </label>
                <label class="dialog__label">
                    "Username"
                    <input class="dialog__input" type="text" prop:value=field(|f| f.username.clone()) on:input=set(|f, v| f.username = v)/>
                </label>
                <label class="dialog__label">
                    "Email"
                    <input class="dialog__input" type="email" prop:value=field(|f| f.email.clone()) on:input=set(|f, v| f.email = v)/>
                </label>
                <Show when=move || creating>
                    <label class="dialog__label">
                        "ID number"
                        <input class="dialog__input" type="text" prop:value=field(|f| f.ci.clone()) on:input=set(|f, v| f.ci = v)/>
                    </label>
                </Show>
                <label class="dialog__label">
                    {if creating { "Password" } else { "New password (leave blank to keep)" }}
                    <input class="dialog__input" type="password" prop:value=field(|f| f.password.clone()) on:input=set(|f, v| f.password = v)/>
                </label>
                <label class="dialog__label dialog__label--inline">
                    <input
                        type="checkbox"
                        prop:checked=move || view.with(|v| v.editor().is_some_and(|e| e.form.active))
                        on:change=move |ev| {
                            let checked = event_target_checked(&ev);
                            view.update(|v| {
                                if let Some(form) = v.form_mut() {
                                    form.active = checked;
                                }
                            });
                        }
                    />
                    "Active"
                </label>
                <div class="dialog__actions">
                    <button class="btn" on:click=move |_| on_cancel.run(())>"Cancel"</button>
                    <button class="btn btn--primary" on:click=move |_| on_save.run(())>"Save"</button>
                </div>
            </div>
        </div>
    }
}

/// Bulk student import from a CSV roster.
#[component]
fn CsvImport(on_imported: Callback<()>) -> impl IntoView {
    let config = expect_context::<RwSignal<ConfigState>>();
    let notices = expect_context::<RwSignal<NoticeState>>();
    let busy = RwSignal::new(false);

    let on_change = move |ev: leptos::ev::Event| {
        if busy.get_untracked() {
            return;
        }
        busy.set(true);
        spawn_browser(async move {
            match read_selected(ev).await {
                Some(file) if is_csv(&file.name) => {
                    let result = api_from(config).admin().import_students(&file.name, file.bytes).await;
                    match result {
                        Ok(ack) => {
                            let message = ack.message.unwrap_or_else(|| "Students imported.".to_owned());
                            notices.update(|n| n.success(message));
                            on_imported.run(());
                        }
                        Err(error) => notices.update(|n| n.failed("Import failed", &error)),
                    }
                }
                Some(_) => notices.update(|n| n.error("Choose a .csv file.")),
                None => {}
            }
            busy.set(false);
        });
    };

    view! {
        <label class="btn crud-view__import">
            {move || if busy.get() { "Importing..." } else { "Import CSV" }}
            <input type="file" accept=".csv,text/csv" hidden=true disabled=move || busy.get() on:change=on_change/>
        </label>
    }
}
