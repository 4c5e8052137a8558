//! Six-point Braille cell drawn as two columns of three.
//!
//! Points arrive in the panel's visual order (1 4 / 2 5 / 3 6); each dot is
//! a button labelled with its one-based point number.

use leptos::prelude::*;
use wire::types::CELL_POINTS;

#[component]
pub fn BrailleCellView(
    #[prop(into)] cells: Signal<[(usize, bool); CELL_POINTS]>,
    #[prop(into)] disabled: Signal<bool>,
    on_toggle: Callback<usize>,
) -> impl IntoView {
    view! {
        <div class="braille-cell" role="group" aria-label="Braille cell">
            {move || {
                cells
                    .get()
                    .into_iter()
                    .map(|(point, raised)| {
                        let class = if raised { "braille-cell__dot braille-cell__dot--raised" } else { "braille-cell__dot" };
                        view! {
                            <button
                                class=class
                                aria-pressed=raised.to_string()
                                disabled=move || disabled.get()
                                on:click=move |_| on_toggle.run(point)
                            >
                                {point + 1}
                            </button>
                        }
                    })
                    .collect::<Vec<_>>()
            }}
        </div>
    }
}
