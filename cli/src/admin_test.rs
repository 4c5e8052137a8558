use std::path::Path;

use super::*;

fn user(id: i64, role: Role) -> AdminUser {
    AdminUser {
        id,
        username: format!("user{id}"),
        full_name: format!("User {id}"),
        role,
        email: Some(format!("user{id}@school.test")),
        ci: None,
        active: true,
        created_at: None,
    }
}

#[test]
fn update_keeps_unspecified_fields() {
    let existing = user(3, Role::Teacher);
    let update = user_update(
        &existing,
        UpdateUserArgs {
            user_id: 3,
            full_name: Some("  Ana Ruiz ".to_owned()),
            active: Some(false),
            ..UpdateUserArgs::default()
        },
    );
    assert_eq!(update.user_id, 3);
    assert_eq!(update.username, "user3");
    assert_eq!(update.full_name, "Ana Ruiz");
    assert_eq!(update.email.as_deref(), Some("user3@school.test"));
    assert_eq!(update.password, None);
    assert!(!update.active);
}

#[test]
fn blank_email_clears_it() {
    let update = user_update(
        &user(3, Role::Student),
        UpdateUserArgs {
            user_id: 3,
            email: Some("  ".to_owned()),
            password: Some(String::new()),
            ..UpdateUserArgs::default()
        },
    );
    assert_eq!(update.email, None);
    assert_eq!(update.password, None);
}

#[test]
fn new_user_is_active_unless_flagged() {
    let created = new_user(NewUserArgs {
        username: " bea ".to_owned(),
        full_name: "Bea".to_owned(),
        password: "longenough".to_owned(),
        role: Role::Student,
        email: Some(String::new()),
        ci: Some("4.123.456-7".to_owned()),
        inactive: false,
    });
    assert_eq!(created.username, "bea");
    assert_eq!(created.email, None);
    assert_eq!(created.ci.as_deref(), Some("4.123.456-7"));
    assert!(created.active);
}

#[test]
fn role_filter_reads_snapshot_slices() {
    let snapshot = AdminSnapshot {
        users: vec![user(1, Role::Admin), user(2, Role::Teacher), user(3, Role::Student)],
        teachers: vec![user(2, Role::Teacher)],
        students: vec![user(3, Role::Student)],
        ..AdminSnapshot::default()
    };
    assert_eq!(users_with_role(snapshot.clone(), None).len(), 3);
    assert_eq!(users_with_role(snapshot.clone(), Some(Role::Admin))[0].id, 1);
    assert_eq!(users_with_role(snapshot, Some(Role::Student))[0].id, 3);
}

#[test]
fn import_requires_csv_extension() {
    assert_eq!(csv_name(Path::new("/tmp/Students.CSV")).unwrap(), "Students.CSV");
    assert!(matches!(csv_name(Path::new("students.xlsx")), Err(CliError::NotCsv(_))));
    assert!(matches!(csv_name(Path::new("csv")), Err(CliError::NotCsv(_))));
}
