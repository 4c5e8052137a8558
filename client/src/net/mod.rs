//! Networking for the browser client.
//!
//! SYSTEM CONTEXT
//! ==============
//! `transport` moves bytes over `gloo-net`; `api` builds the typed
//! [`wire::ApiClient`] pages call, wired to the browser session.

pub mod api;
pub mod transport;
