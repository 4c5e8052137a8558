//! Async task helpers tied to the calling component.

use std::future::Future;
use std::time::Duration;

use flows::ViewScope;
use leptos::prelude::on_cleanup;

/// Scope that closes when the calling component unmounts.
pub fn view_scope() -> ViewScope {
    let scope = ViewScope::new();
    let closer = scope.clone();
    on_cleanup(move || closer.close());
    scope
}

/// Run `future` on the browser's local executor. Requests are never made
/// during SSR, so on the server the future is dropped unpolled.
pub fn spawn_browser<F>(future: F)
where
    F: Future<Output = ()> + 'static,
{
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(future);
    #[cfg(not(feature = "hydrate"))]
    drop(future);
}

/// Timer for feedback pauses. Resolves immediately on the server.
pub async fn sleep(delay: Duration) {
    #[cfg(feature = "hydrate")]
    gloo_timers::future::sleep(delay).await;
    #[cfg(not(feature = "hydrate"))]
    let _ = delay;
}
