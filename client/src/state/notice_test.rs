use flows::ValidationError;

use super::*;

#[test]
fn notices_are_shown_in_order() {
    let mut state = NoticeState::default();
    assert_eq!(state.current(), None);
    state.success("Teacher created");
    state.error("boom");
    assert_eq!(state.current().unwrap().kind, NoticeKind::Success);
    state.dismiss();
    assert_eq!(state.current().unwrap().message, "boom");
    state.dismiss();
    assert_eq!(state.current(), None);
}

#[test]
fn failed_prefixes_action() {
    let mut state = NoticeState::default();
    state.failed("Could not save class", &ValidationError::ClassNameTooShort);
    assert_eq!(
        state.current().unwrap().message,
        "Could not save class: class name must be at least 3 characters"
    );
    assert_eq!(state.current().unwrap().kind, NoticeKind::Error);
}

#[test]
fn repeated_notice_is_collapsed() {
    let mut state = NoticeState::default();
    state.error("device offline");
    state.error("device offline");
    state.dismiss();
    assert_eq!(state.current(), None);
}
