//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser concerns (storage, navigation, file
//! input) from page and component logic.

pub mod auth;
pub mod file;
pub mod scope;
pub mod storage;
pub mod ui_persistence;
