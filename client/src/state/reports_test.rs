use wire::types::{AdminSnapshot, AdminUser, ClassSummary, Role};

use super::*;

fn user(id: i64, role: Role, active: bool) -> AdminUser {
    AdminUser {
        id,
        username: format!("u{id}"),
        full_name: format!("User {id}"),
        role,
        email: None,
        ci: None,
        active,
        created_at: None,
    }
}

fn class(id: i64, teacher_id: Option<i64>, students_count: i64) -> ClassSummary {
    ClassSummary {
        id,
        name: format!("Class {id}"),
        teacher_id,
        teacher_name: None,
        students_count,
    }
}

#[test]
fn empty_snapshot_has_zero_average() {
    let report = AdminReport::from_snapshot(&AdminSnapshot::default());
    assert_eq!(report, AdminReport::default());
    assert_eq!(report.average_class_size_label(), "0.0");
}

#[test]
fn counts_roles_activity_and_class_sizes() {
    let students = vec![user(1, Role::Student, true), user(2, Role::Student, false)];
    let teachers = vec![user(3, Role::Teacher, true)];
    let mut users = students.clone();
    users.extend(teachers.clone());
    let snapshot = AdminSnapshot {
        users,
        students,
        teachers,
        devices: Vec::new(),
        classes: vec![class(1, Some(3), 10), class(2, None, 15)],
    };

    let report = AdminReport::from_snapshot(&snapshot);
    assert_eq!(report.students, 2);
    assert_eq!(report.teachers, 1);
    assert_eq!(report.active_users, 2);
    assert_eq!(report.inactive_users, 1);
    assert_eq!(report.unassigned_classes, 1);
    assert_eq!(report.average_class_size_label(), "12.5");
}
