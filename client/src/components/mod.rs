//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render shared chrome (headers, dialogs, search, the Braille
//! cell) while pages own data loading and state transitions.

pub mod braille_cell;
pub mod confirm_dialog;
pub mod notice_dialog;
pub mod page_header;
pub mod search_box;
pub mod stat_card;
