//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by concern (`session`, `config`, `notice`, dashboard tabs,
//! form drafts) so individual components can depend on small focused models.
//! The long-lived ones are provided as `RwSignal` contexts by `app::App`.

pub mod config;
pub mod forms;
pub mod notice;
pub mod reports;
pub mod session;
pub mod tabs;
