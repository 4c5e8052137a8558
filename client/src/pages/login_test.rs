use super::*;

#[test]
fn submit_requires_confirmed_backend() {
    assert!(!can_submit(None, false));
    assert!(!can_submit(Some(false), false));
    assert!(can_submit(Some(true), false));
}

#[test]
fn submit_blocked_while_busy() {
    assert!(!can_submit(Some(true), true));
}

#[test]
fn backend_label_reports_probe_state() {
    assert_eq!(backend_label(None), "Checking server...");
    assert_eq!(backend_label(Some(false)), "Server offline. Try again later.");
}
