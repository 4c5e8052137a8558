//! Form checks that run before any request is sent.

#[cfg(test)]
#[path = "validate_test.rs"]
mod validate_test;

use wire::types::{CELL_POINTS, LessonDraft, LessonStep, LoginForm, NewDevice, NewUser, Registration, UserUpdate};

pub const MIN_PASSWORD_LEN: usize = 8;
pub const MIN_CLASS_NAME_LEN: usize = 3;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),
    #[error("password must be at least 8 characters")]
    PasswordTooShort,
    #[error("passwords do not match")]
    PasswordMismatch,
    #[error("class name must be at least 3 characters")]
    ClassNameTooShort,
    #[error("add at least one step to the lesson")]
    LessonWithoutSteps,
    #[error("step {0} needs a target and a prompt")]
    IncompleteStep(usize),
    #[error("select at least one student")]
    NoStudentsSelected,
    #[error("enter a single letter from A to Z")]
    InvalidLetter,
    #[error("point must be between 1 and 6")]
    InvalidPoint,
    #[error("the Braille device is not connected")]
    DeviceOffline,
}

fn required(value: &str, field: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required(field));
    }
    Ok(())
}

/// # Errors
///
/// Returns [`ValidationError::PasswordTooShort`] under eight characters.
pub fn password(value: &str) -> Result<(), ValidationError> {
    if value.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort);
    }
    Ok(())
}

/// Trim the username and require both fields.
///
/// # Errors
///
/// Returns [`ValidationError::Required`] for the first blank field.
pub fn login(form: &LoginForm) -> Result<LoginForm, ValidationError> {
    required(&form.username, "username")?;
    if form.password.is_empty() {
        return Err(ValidationError::Required("password"));
    }
    Ok(LoginForm {
        username: form.username.trim().to_owned(),
        password: form.password.clone(),
    })
}

/// # Errors
///
/// Returns the first failing rule.
pub fn registration(form: &Registration) -> Result<(), ValidationError> {
    required(&form.full_name, "full name")?;
    required(&form.username, "username")?;
    password(&form.password)
}

/// # Errors
///
/// Returns the first failing rule.
pub fn new_user(form: &NewUser) -> Result<(), ValidationError> {
    required(&form.full_name, "full name")?;
    required(&form.username, "username")?;
    password(&form.password)
}

/// A blank password on edit keeps the current one.
///
/// # Errors
///
/// Returns the first failing rule.
pub fn user_update(form: &UserUpdate) -> Result<(), ValidationError> {
    required(&form.full_name, "full name")?;
    required(&form.username, "username")?;
    match form.password.as_deref() {
        Some(value) => password(value),
        None => Ok(()),
    }
}

/// Trimmed class name of at least three characters.
///
/// # Errors
///
/// Returns [`ValidationError::ClassNameTooShort`].
pub fn class_name(name: &str) -> Result<String, ValidationError> {
    let name = name.trim();
    if name.chars().count() < MIN_CLASS_NAME_LEN {
        return Err(ValidationError::ClassNameTooShort);
    }
    Ok(name.to_owned())
}

/// `number` is the one-based position shown to users.
///
/// # Errors
///
/// Returns [`ValidationError::IncompleteStep`].
pub fn step(step: &LessonStep, number: usize) -> Result<(), ValidationError> {
    if step.target.trim().is_empty() || step.prompt.trim().is_empty() {
        return Err(ValidationError::IncompleteStep(number));
    }
    Ok(())
}

/// # Errors
///
/// Returns the first failing rule: title, then step count, then each step.
pub fn lesson(draft: &LessonDraft) -> Result<(), ValidationError> {
    required(&draft.title, "lesson title")?;
    if draft.steps.is_empty() {
        return Err(ValidationError::LessonWithoutSteps);
    }
    for (index, item) in draft.steps.iter().enumerate() {
        step(item, index + 1)?;
    }
    Ok(())
}

/// # Errors
///
/// Returns [`ValidationError::Required`] for a blank id or name.
pub fn device(form: &NewDevice) -> Result<(), ValidationError> {
    required(&form.device_id, "device id")?;
    required(&form.name, "device name")
}

/// # Errors
///
/// Returns [`ValidationError::NoStudentsSelected`] for an empty selection.
pub fn student_selection(ids: &[i64]) -> Result<(), ValidationError> {
    if ids.is_empty() {
        return Err(ValidationError::NoStudentsSelected);
    }
    Ok(())
}

/// Accept exactly one ASCII letter, returned upper-cased.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidLetter`].
pub fn letter(input: &str) -> Result<char, ValidationError> {
    let mut chars = input.trim().chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) if ch.is_ascii_alphabetic() => Ok(ch.to_ascii_uppercase()),
        _ => Err(ValidationError::InvalidLetter),
    }
}

/// Map a one-based point number to its zero-based index.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidPoint`] outside `1..=6`.
pub fn point(number: usize) -> Result<usize, ValidationError> {
    if (1..=CELL_POINTS).contains(&number) {
        return Ok(number - 1);
    }
    Err(ValidationError::InvalidPoint)
}
