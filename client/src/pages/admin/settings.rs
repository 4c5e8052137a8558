//! Read-only view of the backend endpoints this client talks to.

use leptos::prelude::*;
use wire::Backend;

use crate::state::config::ConfigState;

#[component]
pub fn SettingsTab() -> impl IntoView {
    let config = expect_context::<RwSignal<ConfigState>>();

    view! {
        <section class="settings">
            <h2>"Settings"</h2>
            <p>"Backend endpoints are published by the host server in /app-config.json."</p>
            <table class="table">
                <thead>
                    <tr>
                        <th>"Service"</th>
                        <th>"Base URL"</th>
                        <th>"Variable"</th>
                    </tr>
                </thead>
                <tbody>
                    {Backend::ALL
                        .into_iter()
                        .map(|backend| {
                            view! {
                                <tr>
                                    <td>{backend.as_str()}</td>
                                    <td class="table__mono">{move || config.with(|c| c.endpoints.base(backend).to_owned())}</td>
                                    <td class="table__mono">{backend.env_var()}</td>
                                </tr>
                            }
                        })
                        .collect::<Vec<_>>()}
                </tbody>
            </table>
            <Show when=move || !config.get().loaded>
                <p>"Loading configuration..."</p>
            </Show>
        </section>
    }
}
