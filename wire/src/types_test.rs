use serde_json::json;

use super::*;

// =============================================================
// Auth payloads
// =============================================================

#[test]
fn login_response_decodes_auth_service_shape() {
    let body = json!({
        "access_token": "abc.def",
        "token_type": "bearer",
        "user": {
            "id": 7,
            "username": "mrivera",
            "full_name": "Maria Rivera",
            "role": "teacher",
            "created_at": "2024-02-01T10:00:00"
        }
    });
    let login: LoginResponse = serde_json::from_value(body).unwrap();
    assert_eq!(login.access_token, "abc.def");
    assert_eq!(login.user.id, 7);
    assert_eq!(login.user.role, Role::Teacher);
    assert_eq!(login.user.display_name(), "Maria Rivera");
}

#[test]
fn profile_display_name_falls_back_to_username() {
    let profile: UserProfile =
        serde_json::from_value(json!({"id": "3", "username": "kid", "full_name": null, "role": "student"})).unwrap();
    assert_eq!(profile.id, 3);
    assert_eq!(profile.display_name(), "kid");
}

#[test]
fn role_parses_case_insensitively() {
    assert_eq!("Admin".parse::<Role>(), Ok(Role::Admin));
    assert_eq!(" student ".parse::<Role>(), Ok(Role::Student));
    assert!("janitor".parse::<Role>().is_err());
    assert_eq!(Role::Teacher.to_string(), "teacher");
}

// =============================================================
// Admin payloads
// =============================================================

#[test]
fn admin_snapshot_decodes_rows_with_mixed_representations() {
    let body = json!({
        "users": [
            {"id": 1, "username": "root", "full_name": "Root", "role": "admin",
             "password": "salt$hash", "active": 1, "CI": 1234567, "created_at": "Mon, 01 Jan 2024 00:00:00 GMT"}
        ],
        "students": [
            {"id": 5, "username": "ana", "full_name": "Ana", "role": "student", "active": 0}
        ],
        "teachers": [],
        "devices": [{"id": "esp-01", "name": "Cell A", "last_seen": 1700000000000u64}],
        "classes": [
            {"id": 2, "name": "Morning", "teacher_id": null, "teacher_name": null, "students_count": "3"}
        ]
    });
    let snapshot: AdminSnapshot = serde_json::from_value(body).unwrap();
    assert_eq!(snapshot.users[0].ci.as_deref(), Some("1234567"));
    assert!(snapshot.users[0].active);
    assert!(!snapshot.students[0].active);
    assert_eq!(snapshot.devices[0].id, "esp-01");
    assert_eq!(snapshot.classes[0].students_count, 3);
    assert_eq!(snapshot.classes[0].teacher_id, None);
}

#[test]
fn admin_snapshot_tolerates_missing_sections() {
    let snapshot: AdminSnapshot = serde_json::from_value(json!({"users": []})).unwrap();
    assert!(snapshot.classes.is_empty());
    assert!(snapshot.devices.is_empty());
}

#[test]
fn new_user_sends_active_as_string_flag() {
    let user = NewUser {
        username: "ana".to_owned(),
        full_name: "Ana".to_owned(),
        role: Role::Student,
        password: "secret123".to_owned(),
        email: None,
        ci: Some("99".to_owned()),
        active: false,
    };
    let value = serde_json::to_value(&user).unwrap();
    assert_eq!(value["active"], json!("0"));
    assert_eq!(value["role"], json!("student"));
    assert!(value.get("email").is_none());
}

#[test]
fn user_update_sends_null_password_and_int_flag() {
    let update = UserUpdate {
        user_id: 4,
        username: "ana".to_owned(),
        full_name: "Ana".to_owned(),
        email: None,
        password: None,
        active: true,
    };
    let value = serde_json::to_value(&update).unwrap();
    assert_eq!(value["password"], Value::Null);
    assert_eq!(value["active"], json!(1));
}

#[test]
fn class_details_decode() {
    let body = json!({
        "class": {"id": 9, "name": "B1", "teacher_id": 2, "teacher_name": "Maria", "created_at": "x"},
        "students": [{"id": 5, "username": "ana", "full_name": "Ana", "enrolled_at": "y"}]
    });
    let details: ClassDetails = serde_json::from_value(body).unwrap();
    assert_eq!(details.class.teacher_id, Some(2));
    assert_eq!(details.students.len(), 1);
}

// =============================================================
// Lessons + teacher payloads
// =============================================================

#[test]
fn lesson_summary_tolerates_unmigrated_rows() {
    let lesson: LessonSummary = serde_json::from_value(json!({
        "id": "a1b2c3d4", "title": "Vowels", "description": null,
        "difficulty": null, "order_index": null, "step_count": 5
    }))
    .unwrap();
    assert_eq!(lesson.difficulty, Difficulty::Beginner);
    assert!(lesson.active);
    assert_eq!(lesson.description, "");
    assert_eq!(lesson.step_count, 5);
}

#[test]
fn lesson_detail_round_trips_into_draft() {
    let detail: LessonDetail = serde_json::from_value(json!({
        "lesson": {"id": "l1", "title": "Vowels", "description": "A-E", "difficulty": "advanced", "order_index": 2},
        "steps": [
            {"id": 11, "lesson_id": "l1", "step_index": 0, "type": "select", "target": "A",
             "prompt": "Show A", "hint": null, "max_attempts": 4}
        ],
        "performance": [{"full_name": "Ana", "score": 3, "finished_at": null,
                         "total_attempts": 5, "correct_attempts": "3"}]
    }))
    .unwrap();
    let draft = detail.to_draft();
    assert_eq!(draft.difficulty, Difficulty::Advanced);
    assert_eq!(draft.steps[0].kind, StepKind::Select);
    assert_eq!(draft.steps[0].step_index, None);
    assert_eq!(draft.steps[0].max_attempts, 4);
    assert_eq!(detail.performance[0].correct_attempts, 3);

    let body = serde_json::to_value(&draft).unwrap();
    assert_eq!(body["steps"][0]["type"], json!("select"));
    assert!(body["steps"][0].get("step_index").is_none());
}

#[test]
fn step_defaults_to_three_attempts() {
    let step: LessonStep = serde_json::from_value(json!({"target": "B", "prompt": "B?"})).unwrap();
    assert_eq!(step.max_attempts, DEFAULT_MAX_ATTEMPTS);
    assert_eq!(step.kind, StepKind::Input);
}

#[test]
fn teacher_classes_accept_string_sums() {
    let classes: TeacherClasses = serde_json::from_value(json!({
        "classes": [{
            "id": 1, "name": "A", "description": null, "teacher_id": 2,
            "student_count": 2, "lesson_count": 1,
            "students": [{"id": 5, "username": "ana", "full_name": "Ana",
                          "completed_lessons": "2", "total_score": "17.0"}]
        }]
    }))
    .unwrap();
    assert_eq!(classes.classes[0].students[0].total_score, 17);
    assert_eq!(classes.classes[0].students[0].completed_lessons, 2);
}

#[test]
fn teacher_dashboard_decodes_accuracy() {
    let dashboard: TeacherDashboard = serde_json::from_value(json!({
        "total_students": 3, "total_lessons": 4, "active_sessions": 1,
        "students": [{"id": 5, "name": "Ana", "username": "ana", "attempts": 10,
                      "corrects": 7, "accuracy": 70.0, "completed": 1, "last_activity": null}]
    }))
    .unwrap();
    assert!((dashboard.students[0].accuracy - 70.0).abs() < f64::EPSILON);
}

#[test]
fn student_detail_decodes_overall_block() {
    let detail: StudentDetail = serde_json::from_value(json!({
        "student": {"id": 5, "full_name": "Ana", "username": "ana"},
        "progress": [{"lesson_id": "l1", "title": "Vowels", "score": 3,
                      "started_at": "2024-01-01 10:00", "finished_at": null,
                      "total_attempts": 4, "correct_attempts": 3}],
        "overall": {"lessons_attempted": 1, "lessons_completed": 0, "total_attempts": 4,
                    "correct_attempts": "3", "overall_accuracy": "75.00"}
    }))
    .unwrap();
    assert!((detail.overall.overall_accuracy - 75.0).abs() < f64::EPSILON);
    assert_eq!(detail.progress[0].finished_at, None);
}

// =============================================================
// Session payloads
// =============================================================

#[test]
fn prompt_reply_distinguishes_step_and_finish() {
    let step: PromptReply = serde_json::from_value(json!({
        "finished": false, "prompt": "Type A", "target": "A", "hint": "first letter",
        "step_index": 0, "max_attempts": 3, "attempts": 1, "score": 0,
        "user_id": 5, "total_steps": 4
    }))
    .unwrap();
    let PromptReply::Step(prompt) = step else {
        panic!("expected step");
    };
    assert_eq!(prompt.attempts, 1);
    assert_eq!(prompt.total_steps, Some(4));

    let done: PromptReply = serde_json::from_value(json!({"finished": true, "score": 4, "user_id": 5})).unwrap();
    assert_eq!(done, PromptReply::Finished { score: 4 });
}

#[test]
fn submit_outcome_handles_bare_finished() {
    let outcome: SubmitOutcome = serde_json::from_value(json!({"finished": true})).unwrap();
    assert!(outcome.finished);
    assert!(!outcome.correct);
    assert_eq!(outcome.points, None);

    let outcome: SubmitOutcome =
        serde_json::from_value(json!({"correct": false, "attempts": 3, "max_attempts": 3, "hint": "It is A"}))
            .unwrap();
    assert_eq!(outcome.hint.as_deref(), Some("It is A"));
    assert_eq!(outcome.max_attempts, Some(3));
}

#[test]
fn student_lessons_decode_completion_flags() {
    let lessons: StudentLessons = serde_json::from_value(json!({
        "lessons": [{"id": "l1", "title": "Vowels", "description": "", "difficulty": "beginner",
                     "order_index": 0, "created_at": "x", "total_steps": 5, "completed": 1, "score": 4}]
    }))
    .unwrap();
    assert!(lessons.lessons[0].completed);
    assert_eq!(lessons.lessons[0].total_steps, 5);
}

// =============================================================
// Device payloads
// =============================================================

#[test]
fn device_payloads_use_bridge_field_names() {
    let status: DeviceStatus =
        serde_json::from_value(json!({"conectado": true, "tiempo_respuesta_ms": 12.5, "error": null})).unwrap();
    assert!(status.connected);
    assert_eq!(status.latency_ms, Some(12.5));

    let cell: CellReply = serde_json::from_value(json!({"estados": [true, false, false, false, false, false]})).unwrap();
    assert!(cell.points.unwrap()[0]);

    let toggle: ToggleReply = serde_json::from_value(json!({"error": "device offline"})).unwrap();
    assert_eq!(toggle.point, None);
    assert_eq!(toggle.error.as_deref(), Some("device offline"));

    let body = serde_json::to_value(LetterCommand { letter: "A".to_owned() }).unwrap();
    assert_eq!(body, json!({"letra": "A"}));
}
