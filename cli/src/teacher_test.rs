use flows::ValidationError;

use super::*;

#[test]
fn draft_from_json_is_validated() {
    let raw = r#"{
        "title": "Vowels",
        "description": "A E I O U",
        "difficulty": "beginner",
        "order_index": 1,
        "steps": [{"type": "input", "target": "A", "prompt": "Show A", "hint": "", "max_attempts": 3}]
    }"#;
    let draft = parse_draft(raw).unwrap();
    assert_eq!(draft.title, "Vowels");
    assert_eq!(draft.steps.len(), 1);
}

#[test]
fn draft_without_steps_is_rejected() {
    let raw = r#"{"title": "Empty", "description": "", "difficulty": "beginner", "order_index": 0, "steps": []}"#;
    assert!(matches!(
        parse_draft(raw),
        Err(CliError::Invalid(ValidationError::LessonWithoutSteps))
    ));
}

#[test]
fn malformed_draft_is_json_error() {
    assert!(matches!(parse_draft("{"), Err(CliError::InvalidJson(_))));
}

#[test]
fn blank_due_date_is_omitted() {
    assert_eq!(assignment(2, Some("  ".to_owned())).due_date, None);
    assert_eq!(
        assignment(2, Some("2026-11-30".to_owned())).due_date.as_deref(),
        Some("2026-11-30")
    );
}
