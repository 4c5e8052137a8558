//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page installs its route guard, owns route-scoped orchestration and
//! delegates rendering details to `components`. The admin and teacher
//! dashboards are tabbed shells whose tabs live in submodules.

pub mod admin;
pub(crate) mod crud_actions;
pub mod dashboard;
pub mod devices;
pub mod lessons;
pub mod login;
pub mod register;
pub mod root;
pub mod teacher;
