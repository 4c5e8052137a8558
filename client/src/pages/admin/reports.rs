//! Platform totals derived from the admin snapshot.

use leptos::prelude::*;

use crate::components::stat_card::StatCard;
use crate::net::api::api_from;
use crate::state::config::ConfigState;
use crate::state::notice::NoticeState;
use crate::state::reports::AdminReport;
use crate::util::scope::{spawn_browser, view_scope};

#[component]
pub fn ReportsTab() -> impl IntoView {
    let config = expect_context::<RwSignal<ConfigState>>();
    let notices = expect_context::<RwSignal<NoticeState>>();
    let report = RwSignal::new(None::<AdminReport>);
    let scope = view_scope();

    Effect::new(move || {
        if !config.get().loaded {
            return;
        }
        let scope = scope.clone();
        spawn_browser(async move {
            match scope.run(api_from(config).admin().snapshot()).await {
                Some(Ok(snapshot)) => report.set(Some(AdminReport::from_snapshot(&snapshot))),
                Some(Err(error)) => notices.update(|n| n.failed("Could not load reports", &error)),
                None => {}
            }
        });
    });

    let figure = move |read: fn(&AdminReport) -> String| {
        Signal::derive(move || report.with(|r| r.as_ref().map(read).unwrap_or_else(|| "-".to_owned())))
    };

    view! {
        <section class="reports">
            <h2>"Reports"</h2>
            <div class="card-grid">
                <StatCard label="Students" value=figure(|r| r.students.to_string())/>
                <StatCard label="Teachers" value=figure(|r| r.teachers.to_string())/>
                <StatCard label="Classes" value=figure(|r| r.classes.to_string())/>
                <StatCard label="Devices" value=figure(|r| r.devices.to_string())/>
                <StatCard label="Active users" value=figure(|r| r.active_users.to_string())/>
                <StatCard label="Inactive users" value=figure(|r| r.inactive_users.to_string())/>
                <StatCard label="Classes without teacher" value=figure(|r| r.unassigned_classes.to_string())/>
                <StatCard label="Average students per class" value=figure(AdminReport::average_class_size_label)/>
            </div>
        </section>
    }
}
