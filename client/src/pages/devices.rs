//! Braille device panel.
//!
//! SYSTEM CONTEXT
//! ==============
//! Talks to the device bridge for one six-point cell. The panel checks the
//! connection on mount and every [`POLL_INTERVAL`] after that; whenever the
//! bridge reports the device connected, the cell is read back so the dots
//! on screen match the actuators.
//!
//! DESIGN
//! ======
//! Dots change only from device replies. A click or key press is validated
//! by `DevicePanel`, sent, and the reply mirrored; a refused command leaves
//! the cell untouched and shows the bridge's reason.
//!
//! Keys (while the panel has focus): `1`-`6` toggle a point, `Enter` sends
//! the letter field, `Escape` clears the cell, `r` refreshes.

#[cfg(test)]
#[path = "devices_test.rs"]
mod devices_test;

use flows::device::{POLL_INTERVAL, key_action};
use flows::{DevicePanel, PanelCommand, Route, ValidationError, ViewScope};
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::components::braille_cell::BrailleCellView;
use crate::components::page_header::PageHeader;
use crate::net::api::api_from;
use crate::state::config::ConfigState;
use crate::state::notice::NoticeState;
use crate::state::session::SessionState;
use crate::util::scope::{sleep, spawn_browser, view_scope};

/// Dashboard a user returns to from the panel.
pub(crate) fn home_path(session: &SessionState) -> &'static str {
    session.role().map_or(Route::Login, Route::landing).path()
}

fn check_status(panel: RwSignal<DevicePanel>, config: RwSignal<ConfigState>, scope: ViewScope) {
    if !panel.try_update(DevicePanel::begin_status_check).unwrap_or(false) {
        return;
    }
    spawn_browser(async move {
        let api = api_from(config);
        let connected = match scope.run(api.device().status()).await {
            Some(Ok(status)) => panel.try_update(|p| p.apply_status(status)).unwrap_or(false),
            Some(Err(error)) => {
                panel.update(|p| p.status_failed(&error));
                false
            }
            None => return,
        };
        if !connected {
            return;
        }
        match scope.run(api.device().cell()).await {
            Some(Ok(points)) => panel.update(|p| p.apply_cell(points)),
            Some(Err(error)) => panel.update(|p| p.command_failed(&error)),
            None => {}
        }
    });
}

fn execute(
    panel: RwSignal<DevicePanel>,
    config: RwSignal<ConfigState>,
    notices: RwSignal<NoticeState>,
    scope: ViewScope,
    command: Result<PanelCommand, ValidationError>,
) {
    let command = match command {
        Ok(command) => command,
        Err(error) => {
            notices.update(|n| n.error(error.to_string()));
            return;
        }
    };
    if command == PanelCommand::Refresh {
        check_status(panel, config, scope);
        return;
    }
    if panel.with_untracked(DevicePanel::is_busy) {
        return;
    }
    panel.update(DevicePanel::begin_command);
    spawn_browser(async move {
        let api = api_from(config);
        let device = api.device();
        let outcome = match command {
            PanelCommand::Toggle(point) => scope
                .run(device.toggle(point))
                .await
                .map(|reply| reply.map(|state| panel.update(|p| p.apply_toggle(point, state)))),
            PanelCommand::SendLetter(letter) => scope
                .run(device.send_letter(letter))
                .await
                .map(|reply| reply.map(|points| panel.update(|p| p.apply_letter(points)))),
            PanelCommand::Clear => scope
                .run(device.clear())
                .await
                .map(|reply| reply.map(|points| panel.update(|p| p.apply_cell(points)))),
            PanelCommand::Refresh => return,
        };
        if let Some(Err(error)) = outcome {
            panel.update(|p| p.command_failed(&error));
        }
    });
}

#[component]
pub fn DevicesPage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let config = expect_context::<RwSignal<ConfigState>>();
    let notices = expect_context::<RwSignal<NoticeState>>();
    crate::util::auth::install_route_guard(Route::Devices, session, use_navigate());
    let scope = view_scope();
    let panel = RwSignal::new(DevicePanel::new());

    {
        let scope = scope.clone();
        Effect::new(move || {
            if config.get().loaded {
                check_status(panel, config, scope.clone());
            }
        });
    }

    {
        let scope = scope.clone();
        spawn_browser(async move {
            loop {
                sleep(POLL_INTERVAL).await;
                if !scope.is_alive() {
                    break;
                }
                if config.get_untracked().loaded {
                    check_status(panel, config, scope.clone());
                }
            }
        });
    }

    let run = {
        let scope = scope.clone();
        move |command: Result<PanelCommand, ValidationError>| execute(panel, config, notices, scope.clone(), command)
    };

    let on_toggle = {
        let run = run.clone();
        Callback::new(move |point: usize| run(panel.with_untracked(|p| p.command(PanelCommand::Toggle(point)))))
    };
    let on_keydown = {
        let run = run.clone();
        move |ev: leptos::ev::KeyboardEvent| {
            if let Some(action) = key_action(&ev.key()) {
                ev.prevent_default();
                run(panel.with_untracked(|p| p.key_command(action)));
            }
        }
    };
    let send_letter = {
        let run = run.clone();
        move || run(panel.with_untracked(DevicePanel::letter_command))
    };

    let cells = Signal::derive(move || panel.with(DevicePanel::visual_cells));
    let locked = Signal::derive(move || panel.with(|p| p.is_busy() || !p.is_connected()));

    view! {
        <Show
            when=move || session.get().allows(Route::Devices)
            fallback=|| view! { <div class="loading-page"><p>"Loading..."</p></div> }
        >
            <div class="devices-page">
                <PageHeader title="Braille device">
                    <a class="btn" href=move || home_path(&session.get())>"Home"</a>
                </PageHeader>
                <main class="device-panel" tabindex="0" on:keydown=on_keydown.clone()>
                    <div class="device-panel__status">
                        <span class=move || {
                            if panel.with(DevicePanel::is_connected) {
                                "device-panel__indicator device-panel__indicator--online"
                            } else {
                                "device-panel__indicator"
                            }
                        }></span>
                        <span>{move || panel.with(DevicePanel::status_label)}</span>
                        <button class="btn" on:click={
                            let run = run.clone();
                            move |_| run(Ok(PanelCommand::Refresh))
                        }>
                            "Refresh"
                        </button>
                    </div>

                    <BrailleCellView cells=cells disabled=locked on_toggle=on_toggle/>
                    <p class="device-panel__points">{move || panel.with(DevicePanel::active_points_label)}</p>

                    <div class="device-panel__letter">
                        <input
                            class="dialog__input"
                            type="text"
                            maxlength="1"
                            placeholder="Letter"
                            prop:value=move || panel.with(|p| p.letter().to_owned())
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                panel.update(|p| p.set_letter(value));
                            }
                            on:keydown={
                                let send_letter = send_letter.clone();
                                move |ev: leptos::ev::KeyboardEvent| {
                                    ev.stop_propagation();
                                    if ev.key() == "Enter" {
                                        ev.prevent_default();
                                        send_letter();
                                    }
                                }
                            }
                        />
                        <button class="btn btn--primary" disabled=move || locked.get() on:click={
                            let send_letter = send_letter.clone();
                            move |_| send_letter()
                        }>
                            "Send letter"
                        </button>
                        <button class="btn btn--danger" disabled=move || locked.get() on:click={
                            let run = run.clone();
                            move |_| run(panel.with_untracked(|p| p.command(PanelCommand::Clear)))
                        }>
                            "Clear"
                        </button>
                    </div>

                    <Show when=move || panel.with(|p| p.error().is_some())>
                        <p class="device-panel__error">{move || panel.with(|p| p.error().unwrap_or_default().to_owned())}</p>
                    </Show>
                    <p class="device-panel__help">"Keys: 1-6 toggle a point, Enter sends the letter, Esc clears, R refreshes."</p>
                </main>
            </div>
        </Show>
    }
}
