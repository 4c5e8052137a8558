//! Runtime configuration published to the browser.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use axum::extract::State;
use axum::response::Json;
use wire::Endpoints;

use crate::state::AppState;

/// `GET /app-config.json`: the backend base URLs this host was started with.
pub async fn app_config(State(state): State<AppState>) -> Json<Endpoints> {
    Json(state.endpoints.as_ref().clone())
}
