//! Blocking acknowledgements shown after user actions.
//!
//! Every action boundary reports here instead of rendering its own alert:
//! validation failures, request errors and success confirmations. Notices
//! queue up and are dismissed one at a time.

#[cfg(test)]
#[path = "notice_test.rs"]
mod notice_test;

use std::collections::VecDeque;
use std::fmt::Display;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NoticeState {
    queue: VecDeque<Notice>,
}

impl NoticeState {
    pub fn current(&self) -> Option<&Notice> {
        self.queue.front()
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(NoticeKind::Success, message.into());
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(NoticeKind::Error, message.into());
    }

    /// Report a failed action under a short context label.
    pub fn failed(&mut self, action: &str, error: &impl Display) {
        self.error(format!("{action}: {error}"));
    }

    pub fn dismiss(&mut self) {
        self.queue.pop_front();
    }

    fn push(&mut self, kind: NoticeKind, message: String) {
        // Identical back-to-back notices (a poll failing twice) show once.
        if self.queue.back().is_some_and(|last| last.kind == kind && last.message == message) {
            return;
        }
        self.queue.push_back(Notice { kind, message });
    }
}
