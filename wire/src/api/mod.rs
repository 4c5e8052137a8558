//! Typed clients, one per backend service.
//!
//! ARCHITECTURE
//! ============
//! Each module exposes pure `*_request` builders (testable without a
//! transport) and a borrowed client struct whose async methods send those
//! requests through [`crate::ApiClient`] and decode the reply.

mod admin;
mod auth;
mod device;
mod student;
mod teacher;

pub use admin::*;
pub use auth::*;
pub use device::*;
pub use student::*;
pub use teacher::*;
