//! Editable drafts behind the management modals.
//!
//! DESIGN
//! ======
//! Inputs bind to plain `String` fields; conversion into the request types
//! happens once, at submit. Blank optional inputs become `None` so the
//! backends see absent values rather than empty strings.

#[cfg(test)]
#[path = "forms_test.rs"]
mod forms_test;

use flows::ValidationError;
use flows::validate;
use wire::types::{
    AdminUser, Difficulty, LessonDetail, LessonDraft, LessonStep, NewClass, NewDevice, NewUser, PersonalData, Role,
    UserProfile, UserUpdate,
};

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

// =============================================================================
// USERS
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserForm {
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub ci: String,
    pub password: String,
    pub active: bool,
}

impl Default for UserForm {
    fn default() -> Self {
        Self {
            username: String::new(),
            full_name: String::new(),
            email: String::new(),
            ci: String::new(),
            password: String::new(),
            active: true,
        }
    }
}

impl UserForm {
    /// Prefill from an existing row. The password stays blank.
    pub fn from_user(user: &AdminUser) -> Self {
        Self {
            username: user.username.clone(),
            full_name: user.full_name.clone(),
            email: user.email.clone().unwrap_or_default(),
            ci: user.ci.clone().unwrap_or_default(),
            password: String::new(),
            active: user.active,
        }
    }

    pub fn to_new_user(&self, role: Role) -> NewUser {
        NewUser {
            username: self.username.trim().to_owned(),
            full_name: self.full_name.trim().to_owned(),
            role,
            password: self.password.clone(),
            email: optional(&self.email),
            ci: optional(&self.ci),
            active: self.active,
        }
    }

    /// A blank password keeps the current one.
    pub fn to_update(&self, user_id: i64) -> UserUpdate {
        UserUpdate {
            user_id,
            username: self.username.trim().to_owned(),
            full_name: self.full_name.trim().to_owned(),
            email: optional(&self.email),
            password: (!self.password.is_empty()).then(|| self.password.clone()),
            active: self.active,
        }
    }
}

// =============================================================================
// CLASSES
// =============================================================================

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClassForm {
    pub name: String,
    pub teacher_id: Option<i64>,
}

impl ClassForm {
    /// # Errors
    ///
    /// Returns [`ValidationError::ClassNameTooShort`].
    pub fn to_new_class(&self) -> Result<NewClass, ValidationError> {
        Ok(NewClass {
            name: validate::class_name(&self.name)?,
            teacher_id: self.teacher_id,
        })
    }
}

/// Parse a `<select>` value: empty means "no teacher".
pub fn parse_teacher_choice(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}

// =============================================================================
// DEVICES
// =============================================================================

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DeviceForm {
    pub device_id: String,
    pub name: String,
}

impl DeviceForm {
    pub fn to_new_device(&self) -> NewDevice {
        NewDevice {
            device_id: self.device_id.trim().to_owned(),
            name: self.name.trim().to_owned(),
        }
    }
}

// =============================================================================
// LESSONS
// =============================================================================

/// The lesson editor is two pages: details first, then steps.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EditorPage {
    #[default]
    Details,
    Steps,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LessonForm {
    pub page: EditorPage,
    pub draft: LessonDraft,
    /// Step being typed before it is added to the draft.
    pub pending_step: LessonStep,
}

impl LessonForm {
    /// Blank lesson placed after the existing ones.
    pub fn new_lesson(existing: usize) -> Self {
        Self {
            draft: LessonDraft {
                order_index: i64::try_from(existing).unwrap_or(i64::MAX),
                difficulty: Difficulty::Beginner,
                ..LessonDraft::default()
            },
            ..Self::default()
        }
    }

    pub fn from_detail(detail: &LessonDetail) -> Self {
        Self {
            draft: detail.to_draft(),
            ..Self::default()
        }
    }

    /// # Errors
    ///
    /// The title is required before moving on to steps.
    pub fn next_page(&mut self) -> Result<(), ValidationError> {
        if self.draft.title.trim().is_empty() {
            return Err(ValidationError::Required("lesson title"));
        }
        self.page = EditorPage::Steps;
        Ok(())
    }

    pub fn previous_page(&mut self) {
        self.page = EditorPage::Details;
    }

    /// Append the pending step and reset the step inputs.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::IncompleteStep`] when target or prompt is blank.
    pub fn add_step(&mut self) -> Result<(), ValidationError> {
        validate::step(&self.pending_step, self.draft.steps.len() + 1)?;
        let mut step = std::mem::take(&mut self.pending_step);
        step.target = step.target.trim().to_owned();
        step.prompt = step.prompt.trim().to_owned();
        step.hint = step.hint.trim().to_owned();
        self.draft.steps.push(step);
        Ok(())
    }

    pub fn remove_step(&mut self, index: usize) {
        if index < self.draft.steps.len() {
            self.draft.steps.remove(index);
        }
    }
}

// =============================================================================
// PROFILE
// =============================================================================

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProfileForm {
    pub full_name: String,
    pub email: String,
}

impl ProfileForm {
    pub fn from_profile(user: &UserProfile) -> Self {
        Self {
            full_name: user.full_name.clone(),
            email: user.email.clone().unwrap_or_default(),
        }
    }

    /// # Errors
    ///
    /// The full name is required.
    pub fn to_personal_data(&self) -> Result<PersonalData, ValidationError> {
        if self.full_name.trim().is_empty() {
            return Err(ValidationError::Required("full name"));
        }
        Ok(PersonalData {
            full_name: self.full_name.trim().to_owned(),
            email: optional(&self.email),
        })
    }

    /// The cached profile after a successful update.
    pub fn apply_to(&self, user: &UserProfile) -> UserProfile {
        UserProfile {
            full_name: self.full_name.trim().to_owned(),
            email: optional(&self.email),
            ..user.clone()
        }
    }
}
