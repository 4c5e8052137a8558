//! Blocking acknowledgement for the front of the notice queue.

use leptos::prelude::*;

use crate::state::notice::{NoticeKind, NoticeState};

/// Renders the oldest pending notice until the user dismisses it.
#[component]
pub fn NoticeDialog() -> impl IntoView {
    let notices = expect_context::<RwSignal<NoticeState>>();
    let dismiss = Callback::new(move |()| notices.update(NoticeState::dismiss));

    view! {
        {move || {
            notices
                .get()
                .current()
                .cloned()
                .map(|notice| {
                    let (title, class) = match notice.kind {
                        NoticeKind::Success => ("Done", "dialog dialog--notice dialog--success"),
                        NoticeKind::Error => ("Something went wrong", "dialog dialog--notice dialog--error"),
                    };
                    view! {
                        <div class="dialog-backdrop" on:click=move |_| dismiss.run(())>
                            <div
                                class=class
                                role="alertdialog"
                                on:click=move |ev| ev.stop_propagation()
                                on:keydown=move |ev: leptos::ev::KeyboardEvent| {
                                    if ev.key() == "Escape" || ev.key() == "Enter" {
                                        ev.prevent_default();
                                        dismiss.run(());
                                    }
                                }
                                tabindex="0"
                            >
                                <h2>{title}</h2>
                                <p class="dialog__message">{notice.message}</p>
                                <div class="dialog__actions">
                                    <button class="btn btn--primary" on:click=move |_| dismiss.run(())>
                                        "OK"
                                    </button>
                                </div>
                            </div>
                        </div>
                    }
                })
        }}
    }
}
