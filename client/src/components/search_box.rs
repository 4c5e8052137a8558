//! Search input bound to a view's filter term.

use leptos::prelude::*;

#[component]
pub fn SearchBox(#[prop(into)] placeholder: String, on_search: Callback<String>) -> impl IntoView {
    let term = RwSignal::new(String::new());
    view! {
        <input
            class="search-box"
            type="search"
            placeholder=placeholder
            prop:value=move || term.get()
            on:input=move |ev| {
                let value = event_target_value(&ev);
                term.set(value.clone());
                on_search.run(value);
            }
        />
    }
}
