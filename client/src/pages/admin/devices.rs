//! Registered Braille devices.
//!
//! The admin service can list and register devices but has no update or
//! delete endpoint, so this tab drives a [`CrudView`] directly instead of
//! going through a `CrudService`.

use flows::{CrudView, ViewScope, validate};
use leptos::prelude::*;
use wire::types::Device;

use crate::components::search_box::SearchBox;
use crate::net::api::api_from;
use crate::state::config::ConfigState;
use crate::state::forms::DeviceForm;
use crate::state::notice::NoticeState;
use crate::util::scope::{spawn_browser, view_scope};

type DeviceView = RwSignal<CrudView<Device, DeviceForm>>;

fn reload(config: RwSignal<ConfigState>, view: DeviceView, notices: RwSignal<NoticeState>, scope: ViewScope) {
    spawn_browser(async move {
        match scope.run(api_from(config).admin().snapshot()).await {
            Some(Ok(snapshot)) => view.update(|v| v.replace(snapshot.devices)),
            Some(Err(error)) => notices.update(|n| n.failed("Could not load devices", &error)),
            None => {}
        }
    });
}

/// Last-seen column: the raw unix timestamp the service reports.
fn last_seen_label(last_seen: Option<i64>) -> String {
    last_seen.map_or_else(|| "Never".to_owned(), |ts| format!("{ts}"))
}

#[component]
pub fn DevicesTab() -> impl IntoView {
    let config = expect_context::<RwSignal<ConfigState>>();
    let notices = expect_context::<RwSignal<NoticeState>>();
    let view: DeviceView = RwSignal::new(CrudView::new());
    let scope = view_scope();

    {
        let scope = scope.clone();
        Effect::new(move || {
            if config.get().loaded {
                reload(config, view, notices, scope.clone());
            }
        });
    }

    let on_register = move |_| {
        let Some(form) = view.with_untracked(|v| v.editor().map(|e| e.form.clone())) else {
            return;
        };
        let device = form.to_new_device();
        if let Err(error) = validate::device(&device) {
            notices.update(|n| n.error(error.to_string()));
            return;
        }
        let scope = scope.clone();
        spawn_browser(async move {
            match scope.run(api_from(config).admin().create_device(&device)).await {
                Some(Ok(_)) => {
                    view.update(CrudView::close_editor);
                    notices.update(|n| n.success("Device registered."));
                    reload(config, view, notices, scope);
                }
                Some(Err(error)) => notices.update(|n| n.failed("Could not register device", &error)),
                None => {}
            }
        });
    };

    let set_field = move |write: fn(&mut DeviceForm, String)| {
        move |ev: leptos::ev::Event| {
            let value = event_target_value(&ev);
            view.update(|v| {
                if let Some(form) = v.form_mut() {
                    write(form, value);
                }
            });
        }
    };
    let field = move |read: fn(&DeviceForm) -> String| {
        move || view.with(|v| v.editor().map(|e| read(&e.form)).unwrap_or_default())
    };

    view! {
        <section class="crud-view">
            <div class="crud-view__toolbar">
                <h2>"Devices"</h2>
                <SearchBox
                    placeholder="Search by name or id"
                    on_search=Callback::new(move |term: String| view.update(|v| v.set_search(term)))
                />
                <button class="btn btn--primary" on:click=move |_| view.update(|v| v.open_create(DeviceForm::default()))>
                    "+ Register device"
                </button>
            </div>
            <Show when=move || view.with(CrudView::is_loaded) fallback=|| view! { <p>"Loading..."</p> }>
                <table class="table">
                    <thead>
                        <tr>
                            <th>"Name"</th>
                            <th>"Device id"</th>
                            <th>"Last seen"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            view.with(|v| {
                                v.visible()
                                    .into_iter()
                                    .cloned()
                                    .map(|device| {
                                        view! {
                                            <tr>
                                                <td>{device.name}</td>
                                                <td class="table__mono">{device.id}</td>
                                                <td>{last_seen_label(device.last_seen)}</td>
                                            </tr>
                                        }
                                    })
                                    .collect::<Vec<_>>()
                            })
                        }}
                    </tbody>
                </table>
            </Show>
            <Show when=move || view.with(CrudView::is_editing)>
                <div class="dialog-backdrop" on:click=move |_| view.update(CrudView::close_editor)>
                    <div class="dialog" on:click=move |ev| ev.stop_propagation()>
                        <h2>"Register device"</h2>
                        <label class="dialog__label">
                            "Device id"
                            <input class="dialog__input" type="text" prop:value=field(|f| f.device_id.clone()) on:input=set_field(|f, v| f.device_id = v)/>
                        </label>
                        <label class="dialog__label">
                            "Name"
                            <input class="dialog__input" type="text" prop:value=field(|f| f.name.clone()) on:input=set_field(|f, v| f.name = v)/>
                        </label>
                        <div class="dialog__actions">
                            <button class="btn" on:click=move |_| view.update(CrudView::close_editor)>"Cancel"</button>
                            <button class="btn btn--primary" on:click=on_register.clone()>"Register"</button>
                        </div>
                    </div>
                </div>
            </Show>
        </section>
    }
}
