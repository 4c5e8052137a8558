use flows::ValidationError;

use super::*;

#[test]
fn assignment_requires_class() {
    assert_eq!(assignment(None, "2026-11-01"), Err(ValidationError::Required("class")));
}

#[test]
fn blank_due_date_is_omitted() {
    let request = assignment(Some(3), "  ").unwrap();
    assert_eq!(request.class_id, 3);
    assert_eq!(request.due_date, None);

    let dated = assignment(Some(3), "2026-11-01").unwrap();
    assert_eq!(dated.due_date.as_deref(), Some("2026-11-01"));
}
