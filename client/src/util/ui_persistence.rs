//! Browser localStorage helpers for remembered UI choices.
//!
//! SYSTEM CONTEXT
//! ==============
//! The admin and teacher panels remember their last open tab across reloads.
//! These helpers centralize the hydrate-only read/write so pages don't
//! repeat web-sys glue.

use leptos::prelude::*;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Load a JSON value from `localStorage` for `key`.
pub fn load_json<T: DeserializeOwned>(key: &str) -> Option<T> {
    #[cfg(feature = "hydrate")]
    {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten())?;
        let raw = storage.get_item(key).ok().flatten()?;
        serde_json::from_str(&raw).ok()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = key;
        None
    }
}

/// Save a JSON value to `localStorage` for `key`.
pub fn save_json<T: Serialize>(key: &str, value: &T) {
    #[cfg(feature = "hydrate")]
    {
        let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) else {
            return;
        };
        let Ok(raw) = serde_json::to_string(value) else {
            return;
        };
        let _ = storage.set_item(key, &raw);
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (key, value);
    }
}

/// Signal seeded from `key` after hydration and written back on change.
pub fn persisted_signal<T>(key: &'static str) -> RwSignal<T>
where
    T: Clone + Default + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static,
{
    let value = RwSignal::new(T::default());
    let restored = RwSignal::new(false);
    Effect::new(move || {
        if restored.get_untracked() {
            save_json(key, &value.get());
        } else {
            if let Some(saved) = load_json::<T>(key) {
                value.set(saved);
            }
            restored.set(true);
        }
    });
    value
}
