//! Typed API access for pages.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages never build URLs. They take the endpoint catalogue from
//! [`ConfigState`] and call through [`Api`], which attaches the stored bearer
//! token and ends the session on a 401.
//!
//! The catalogue itself comes from `/app-config.json` on the host server.
//! When that document is missing or malformed the local defaults stay in
//! effect.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use leptos::prelude::*;
use wire::{ApiClient, Endpoints};

use super::transport::GlooTransport;
use crate::state::config::ConfigState;
use crate::util::auth::BrowserCredentials;

pub type Api = ApiClient<GlooTransport, BrowserCredentials>;

pub const APP_CONFIG_PATH: &str = "/app-config.json";

pub fn api(endpoints: Endpoints) -> Api {
    ApiClient::new(GlooTransport, BrowserCredentials, endpoints)
}

/// Client for the endpoints currently in [`ConfigState`].
pub fn api_from(config: RwSignal<ConfigState>) -> Api {
    api(config.get_untracked().endpoints)
}

pub fn parse_app_config(raw: &str) -> Option<Endpoints> {
    serde_json::from_str(raw).ok()
}

/// Fetch the backend catalogue published by the host.
/// Returns `None` on the server or when the document is unavailable.
pub async fn fetch_app_config() -> Option<Endpoints> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get(APP_CONFIG_PATH).send().await.ok()?;
        if !resp.ok() {
            log::warn!("app config unavailable: {}", resp.status());
            return None;
        }
        let raw = resp.text().await.ok()?;
        let endpoints = parse_app_config(&raw);
        if endpoints.is_none() {
            log::warn!("app config malformed, keeping defaults");
        }
        endpoints
    }
    #[cfg(not(feature = "hydrate"))]
    {
        None
    }
}
