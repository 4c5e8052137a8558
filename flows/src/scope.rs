//! Cancellation scope tying in-flight requests to the view that started them.
//!
//! A view creates one [`ViewScope`] when it mounts and closes it on unmount.
//! Async work checks the scope after every await; a response that lands
//! after close is dropped instead of written into state that no longer has
//! an owner. Polling loops use the same flag as their exit condition.

#[cfg(test)]
#[path = "scope_test.rs"]
mod scope_test;

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Clone, Debug)]
pub struct ViewScope {
    alive: Arc<AtomicBool>,
}

impl Default for ViewScope {
    fn default() -> Self {
        Self {
            alive: Arc::new(AtomicBool::new(true)),
        }
    }
}

impl ViewScope {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Relaxed)
    }

    /// Close the scope for every clone.
    pub fn close(&self) {
        self.alive.store(false, Ordering::Relaxed);
    }

    /// Pass `value` through only while the scope is open.
    pub fn keep<T>(&self, value: T) -> Option<T> {
        self.is_alive().then_some(value)
    }

    /// Await `future` and drop its output if the scope closed meanwhile.
    pub async fn run<F: Future>(&self, future: F) -> Option<F::Output> {
        let output = future.await;
        self.keep(output)
    }
}
