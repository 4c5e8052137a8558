use wire::types::{AdminUser, Role};

use super::*;

fn user(username: &str, full_name: &str) -> AdminUser {
    AdminUser {
        id: 1,
        username: username.to_owned(),
        full_name: full_name.to_owned(),
        role: Role::Student,
        email: None,
        ci: None,
        active: true,
        created_at: None,
    }
}

fn roster() -> Vec<AdminUser> {
    vec![user("lmartin", "Lucia Martin"), user("pgomez", "Pedro Gomez"), user("amartinez", "Ana Martinez")]
}

#[test]
fn empty_term_returns_everything_in_order() {
    let users = roster();
    let shown = filter(&users, "");
    assert_eq!(shown.len(), 3);
    assert_eq!(shown[0].username, "lmartin");
}

#[test]
fn term_is_not_trimmed() {
    let users = roster();
    assert!(filter(&users, "   ").is_empty());
    assert!(filter(&users, " lucia").is_empty());
    let names: Vec<_> = filter(&users, "ia mart").iter().map(|u| u.username.as_str()).collect();
    assert_eq!(names, ["lmartin"]);
}

#[test]
fn match_is_case_insensitive_substring() {
    let users = roster();
    let names: Vec<_> = filter(&users, "MARTIN").iter().map(|u| u.username.as_str()).collect();
    assert_eq!(names, ["lmartin", "amartinez"]);
    assert_eq!(filter(&users, "gomez")[0].full_name, "Pedro Gomez");
}

#[test]
fn username_is_searchable() {
    let users = roster();
    assert_eq!(filter(&users, "pgo").len(), 1);
    assert!(filter(&users, "zzz").is_empty());
}

#[test]
fn optional_fields_participate_when_present() {
    let mut with_mail = user("x", "X");
    with_mail.email = Some("Teacher@School.org".to_owned());
    assert!(matches(&with_mail, "school"));
    assert!(!matches(&user("x", "X"), "school"));
}

#[test]
fn filter_does_not_modify_input() {
    let users = roster();
    let before = users.clone();
    let _ = filter(&users, "ana");
    assert_eq!(users, before);
}
