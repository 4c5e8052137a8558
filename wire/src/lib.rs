//! Shared request model and typed REST clients for the TouchGlyph backends.
//!
//! This crate owns everything that crosses the network boundary for both the
//! browser `client` and the terminal `cli`: the backend catalogue
//! ([`Endpoints`]), the payload types, the [`RequestError`] taxonomy and one
//! typed client per backend service.
//!
//! DESIGN
//! ======
//! HTTP itself is behind the [`Transport`] trait so the same clients run over
//! `gloo-net` in WASM, `reqwest` on the terminal, and a recording double in
//! tests. [`ApiClient`] applies the single auth policy shared by every
//! backend: attach the bearer token when a session exists, and report a 401
//! on such a request to the [`Credentials`] owner before surfacing the error.

pub mod api;
pub mod client;
pub mod endpoints;
pub mod error;
pub mod transport;
pub mod types;

#[cfg(test)]
mod testing;

pub use client::{ApiClient, ApiRequest, Credentials, NoCredentials};
pub use endpoints::{Backend, Endpoints};
pub use error::RequestError;
pub use transport::{Body, FormPart, HttpRequest, HttpResponse, Method, Transport};
