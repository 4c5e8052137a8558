use flows::ValidationError;
use wire::types::Role;

use super::*;

fn filled() -> RegisterForm {
    RegisterForm {
        full_name: " Ana Pérez ".to_owned(),
        username: " ana ".to_owned(),
        password: "s3cretpass".to_owned(),
        confirm: "s3cretpass".to_owned(),
        role: Some(Role::Student),
    }
}

#[test]
fn registration_trims_names() {
    let registration = filled().to_registration().unwrap();
    assert_eq!(registration.username, "ana");
    assert_eq!(registration.full_name, "Ana Pérez");
    assert_eq!(registration.role, Role::Student);
}

#[test]
fn role_is_required() {
    let form = RegisterForm { role: None, ..filled() };
    assert_eq!(form.to_registration(), Err(ValidationError::Required("role")));
}

#[test]
fn short_password_rejected_before_sending() {
    let form = RegisterForm {
        password: "short".to_owned(),
        confirm: "short".to_owned(),
        ..filled()
    };
    assert_eq!(form.to_registration(), Err(ValidationError::PasswordTooShort));
}

#[test]
fn confirmation_must_match() {
    let form = RegisterForm {
        confirm: "different1".to_owned(),
        ..filled()
    };
    assert_eq!(form.to_registration(), Err(ValidationError::PasswordMismatch));
}
