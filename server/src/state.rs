//! Shared application state.
//!
//! DESIGN
//! ======
//! The host keeps no session or data of its own. All it knows is where the
//! five REST backends live, resolved once at start-up and handed to every
//! browser through `/app-config.json`.

#[cfg(test)]
#[path = "state_test.rs"]
mod state_test;

use std::sync::Arc;

use wire::Endpoints;

#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub endpoints: Arc<Endpoints>,
}

impl AppState {
    #[must_use]
    pub fn new(endpoints: Endpoints) -> Self {
        Self {
            endpoints: Arc::new(endpoints),
        }
    }

    /// Base URLs from `TOUCHGLYPH_*_URL`, defaulting per backend.
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(Endpoints::from_lookup(|key| std::env::var(key).ok()))
    }
}
