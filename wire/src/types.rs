//! Payload types exchanged with the TouchGlyph backends.
//!
//! SYSTEM CONTEXT
//! ==============
//! The backends serialize database rows directly, so the same logical value
//! can arrive as a number, a numeric string (`SUM(...)` columns), a `0/1`
//! flag, or `null`. Deserialization here is deliberately lenient about those
//! representations; serialization always emits the shape the backend reads.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

// =============================================================================
// USERS
// =============================================================================

/// Role stored in the session; gates which dashboards are reachable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Teacher,
    #[default]
    Student,
}

impl Role {
    pub const ALL: [Self; 3] = [Self::Admin, Self::Teacher, Self::Student];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Teacher => "teacher",
            Self::Student => "student",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Admin => "Administrator",
            Self::Teacher => "Teacher",
            Self::Student => "Student",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "teacher" => Ok(Self::Teacher),
            "student" => Ok(Self::Student),
            other => Err(format!("unknown role `{other}`")),
        }
    }
}

/// Authenticated user profile as returned by login and cached in storage.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(deserialize_with = "de_i64")]
    pub id: i64,
    pub username: String,
    #[serde(default, deserialize_with = "de_string")]
    pub full_name: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "de_opt_string")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "de_opt_string")]
    pub created_at: Option<String>,
}

impl UserProfile {
    /// Full name, or the username when no name is stored.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.full_name.trim().is_empty() {
            &self.username
        } else {
            &self.full_name
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default, deserialize_with = "de_string")]
    pub token_type: String,
    pub user: UserProfile,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub username: String,
    pub full_name: String,
    pub password: String,
    pub role: Role,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalData {
    pub full_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Generic acknowledgement body (`{"message": "..."}`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ack {
    #[serde(default, deserialize_with = "de_opt_string")]
    pub message: Option<String>,
}

// =============================================================================
// ADMIN
// =============================================================================

/// A user row as listed by the admin service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminUser {
    #[serde(deserialize_with = "de_i64")]
    pub id: i64,
    pub username: String,
    #[serde(default, deserialize_with = "de_string")]
    pub full_name: String,
    pub role: Role,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub email: Option<String>,
    #[serde(default, alias = "CI", deserialize_with = "de_opt_string")]
    pub ci: Option<String>,
    #[serde(default = "default_true", deserialize_with = "de_flag")]
    pub active: bool,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub created_at: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    #[serde(deserialize_with = "de_string")]
    pub id: String,
    #[serde(default, deserialize_with = "de_string")]
    pub name: String,
    /// Milliseconds since the Unix epoch.
    #[serde(default, deserialize_with = "de_opt_i64")]
    pub last_seen: Option<i64>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassSummary {
    #[serde(deserialize_with = "de_i64")]
    pub id: i64,
    pub name: String,
    #[serde(default, deserialize_with = "de_opt_i64")]
    pub teacher_id: Option<i64>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub teacher_name: Option<String>,
    #[serde(default, deserialize_with = "de_i64")]
    pub students_count: i64,
}

/// Everything the admin dashboard shows, fetched in one `GET /admin`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminSnapshot {
    pub users: Vec<AdminUser>,
    pub students: Vec<AdminUser>,
    pub teachers: Vec<AdminUser>,
    pub devices: Vec<Device>,
    pub classes: Vec<ClassSummary>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NewUser {
    pub username: String,
    pub full_name: String,
    pub role: Role,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ci: Option<String>,
    /// The create endpoint compares against the string `"1"`.
    #[serde(serialize_with = "ser_flag_string")]
    pub active: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct UserUpdate {
    pub user_id: i64,
    pub username: String,
    pub full_name: String,
    pub email: Option<String>,
    /// `None` keeps the current password.
    pub password: Option<String>,
    #[serde(serialize_with = "ser_flag_int")]
    pub active: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewClass {
    pub name: String,
    pub teacher_id: Option<i64>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDevice {
    pub device_id: String,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDetails {
    pub class: ClassInfo,
    #[serde(default)]
    pub students: Vec<EnrolledStudent>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassInfo {
    #[serde(deserialize_with = "de_i64")]
    pub id: i64,
    pub name: String,
    #[serde(default, deserialize_with = "de_opt_i64")]
    pub teacher_id: Option<i64>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub teacher_name: Option<String>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub created_at: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrolledStudent {
    #[serde(deserialize_with = "de_i64")]
    pub id: i64,
    pub username: String,
    #[serde(default, deserialize_with = "de_string")]
    pub full_name: String,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub enrolled_at: Option<String>,
}

// =============================================================================
// LESSONS
// =============================================================================

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub const ALL: [Self; 3] = [Self::Beginner, Self::Intermediate, Self::Advanced];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }

    /// Parse a stored value; anything unrecognized is treated as beginner.
    #[must_use]
    pub fn parse_lenient(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "intermediate" => Self::Intermediate,
            "advanced" => Self::Advanced,
            _ => Self::Beginner,
        }
    }
}

impl<'de> Deserialize<'de> for Difficulty {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().map(Self::parse_lenient).unwrap_or_default())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    #[default]
    Input,
    Select,
    Match,
}

impl StepKind {
    pub const ALL: [Self; 3] = [Self::Input, Self::Select, Self::Match];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Select => "select",
            Self::Match => "match",
        }
    }

    #[must_use]
    pub fn parse_lenient(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "select" => Self::Select,
            "match" => Self::Match,
            _ => Self::Input,
        }
    }
}

impl<'de> Deserialize<'de> for StepKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().map(Self::parse_lenient).unwrap_or_default())
    }
}

pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonStep {
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "de_opt_i64")]
    pub step_index: Option<i64>,
    #[serde(rename = "type", default)]
    pub kind: StepKind,
    #[serde(default, deserialize_with = "de_string")]
    pub target: String,
    #[serde(default, deserialize_with = "de_string")]
    pub prompt: String,
    #[serde(default, deserialize_with = "de_string")]
    pub hint: String,
    #[serde(default = "default_max_attempts", deserialize_with = "de_u32")]
    pub max_attempts: u32,
}

impl Default for LessonStep {
    fn default() -> Self {
        Self {
            step_index: None,
            kind: StepKind::Input,
            target: String::new(),
            prompt: String::new(),
            hint: String::new(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

/// Lesson row as listed by the teacher service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonSummary {
    #[serde(deserialize_with = "de_string")]
    pub id: String,
    pub title: String,
    #[serde(default, deserialize_with = "de_string")]
    pub description: String,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default, deserialize_with = "de_i64")]
    pub order_index: i64,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub created_at: Option<String>,
    #[serde(default = "default_true", deserialize_with = "de_flag")]
    pub active: bool,
    #[serde(default, deserialize_with = "de_i64")]
    pub step_count: i64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonList {
    #[serde(default)]
    pub lessons: Vec<LessonSummary>,
}

/// Create/update body for a lesson with all of its steps.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonDraft {
    pub title: String,
    pub description: String,
    pub difficulty: Difficulty,
    pub order_index: i64,
    pub steps: Vec<LessonStep>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonCreated {
    #[serde(default, deserialize_with = "de_opt_string")]
    pub message: Option<String>,
    #[serde(deserialize_with = "de_string")]
    pub lesson_id: String,
    #[serde(default, deserialize_with = "de_opt_i64")]
    pub steps_created: Option<i64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LessonDetail {
    pub lesson: LessonSummary,
    #[serde(default)]
    pub steps: Vec<LessonStep>,
    #[serde(default)]
    pub performance: Vec<LessonPerformance>,
}

impl LessonDetail {
    /// Editable draft seeded from the stored lesson.
    #[must_use]
    pub fn to_draft(&self) -> LessonDraft {
        LessonDraft {
            title: self.lesson.title.clone(),
            description: self.lesson.description.clone(),
            difficulty: self.lesson.difficulty,
            order_index: self.lesson.order_index,
            steps: self
                .steps
                .iter()
                .map(|step| LessonStep {
                    step_index: None,
                    ..step.clone()
                })
                .collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LessonPerformance {
    #[serde(default, deserialize_with = "de_string")]
    pub full_name: String,
    #[serde(default, deserialize_with = "de_i64")]
    pub score: i64,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub finished_at: Option<String>,
    #[serde(default, deserialize_with = "de_i64")]
    pub total_attempts: i64,
    #[serde(default, deserialize_with = "de_i64")]
    pub correct_attempts: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonAssignment {
    pub class_id: i64,
    /// `YYYY-MM-DD`; omitted means no due date.
    pub due_date: Option<String>,
}

// =============================================================================
// TEACHER
// =============================================================================

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TeacherDashboard {
    #[serde(default, deserialize_with = "de_i64")]
    pub total_students: i64,
    #[serde(default, deserialize_with = "de_i64")]
    pub total_lessons: i64,
    #[serde(default, deserialize_with = "de_i64")]
    pub active_sessions: i64,
    #[serde(default)]
    pub students: Vec<StudentActivity>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StudentActivity {
    #[serde(deserialize_with = "de_i64")]
    pub id: i64,
    #[serde(default, deserialize_with = "de_string")]
    pub name: String,
    #[serde(default, deserialize_with = "de_string")]
    pub username: String,
    #[serde(default, deserialize_with = "de_i64")]
    pub attempts: i64,
    #[serde(default, deserialize_with = "de_i64")]
    pub corrects: i64,
    #[serde(default, deserialize_with = "de_f64")]
    pub accuracy: f64,
    #[serde(default, deserialize_with = "de_i64")]
    pub completed: i64,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub last_activity: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeacherClasses {
    #[serde(default)]
    pub classes: Vec<TeacherClass>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeacherClass {
    #[serde(deserialize_with = "de_i64")]
    pub id: i64,
    pub name: String,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "de_i64")]
    pub student_count: i64,
    #[serde(default, deserialize_with = "de_i64")]
    pub lesson_count: i64,
    #[serde(default)]
    pub students: Vec<ClassStudent>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassStudent {
    #[serde(deserialize_with = "de_i64")]
    pub id: i64,
    #[serde(default, deserialize_with = "de_string")]
    pub username: String,
    #[serde(default, deserialize_with = "de_string")]
    pub full_name: String,
    #[serde(default, deserialize_with = "de_i64")]
    pub completed_lessons: i64,
    #[serde(default, deserialize_with = "de_i64")]
    pub total_score: i64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassRoster {
    #[serde(default)]
    pub students: Vec<ClassStudent>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StudentDetail {
    pub student: StudentIdentity,
    #[serde(default)]
    pub progress: Vec<LessonProgress>,
    #[serde(default)]
    pub overall: OverallProgress,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentIdentity {
    #[serde(deserialize_with = "de_i64")]
    pub id: i64,
    #[serde(default, deserialize_with = "de_string")]
    pub full_name: String,
    #[serde(default, deserialize_with = "de_string")]
    pub username: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonProgress {
    #[serde(default, deserialize_with = "de_string")]
    pub lesson_id: String,
    #[serde(default, deserialize_with = "de_string")]
    pub title: String,
    #[serde(default, deserialize_with = "de_i64")]
    pub score: i64,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub started_at: Option<String>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub finished_at: Option<String>,
    #[serde(default, deserialize_with = "de_i64")]
    pub total_attempts: i64,
    #[serde(default, deserialize_with = "de_i64")]
    pub correct_attempts: i64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverallProgress {
    #[serde(deserialize_with = "de_i64")]
    pub lessons_attempted: i64,
    #[serde(deserialize_with = "de_i64")]
    pub lessons_completed: i64,
    #[serde(deserialize_with = "de_i64")]
    pub total_attempts: i64,
    #[serde(deserialize_with = "de_i64")]
    pub correct_attempts: i64,
    #[serde(deserialize_with = "de_f64")]
    pub overall_accuracy: f64,
}

// =============================================================================
// STUDENT SESSIONS
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentLesson {
    #[serde(deserialize_with = "de_string")]
    pub id: String,
    pub title: String,
    #[serde(default, deserialize_with = "de_string")]
    pub description: String,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default, deserialize_with = "de_i64")]
    pub order_index: i64,
    #[serde(default, deserialize_with = "de_i64")]
    pub total_steps: i64,
    #[serde(default, deserialize_with = "de_flag")]
    pub completed: bool,
    #[serde(default, deserialize_with = "de_i64")]
    pub score: i64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentLessons {
    #[serde(default)]
    pub lessons: Vec<StudentLesson>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartSession {
    pub student_id: i64,
    pub lesson_id: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStarted {
    #[serde(deserialize_with = "de_string")]
    pub session_id: String,
}

/// Current step of a running session as served by `session_prompt`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prompt {
    #[serde(default, deserialize_with = "de_string")]
    pub prompt: String,
    #[serde(default, deserialize_with = "de_string")]
    pub target: String,
    #[serde(default, deserialize_with = "de_string")]
    pub hint: String,
    #[serde(default, deserialize_with = "de_u32")]
    pub step_index: u32,
    #[serde(default = "default_max_attempts", deserialize_with = "de_u32")]
    pub max_attempts: u32,
    #[serde(default, deserialize_with = "de_u32")]
    pub attempts: u32,
    #[serde(default, deserialize_with = "de_i64")]
    pub score: i64,
    #[serde(default, deserialize_with = "de_opt_u32")]
    pub total_steps: Option<u32>,
}

/// Either the next step or the end of the lesson.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PromptReply {
    Step(Prompt),
    Finished { score: i64 },
}

impl<'de> Deserialize<'de> for PromptReply {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        if value.get("finished").is_some_and(truthy) {
            let score = value.get("score").and_then(value_as_i64).unwrap_or(0);
            return Ok(Self::Finished { score });
        }
        serde_json::from_value(value).map(Self::Step).map_err(D::Error::custom)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub answer: String,
}

/// Verdict for one submitted answer.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmitOutcome {
    #[serde(deserialize_with = "de_flag")]
    pub correct: bool,
    #[serde(deserialize_with = "de_u32")]
    pub attempts: u32,
    #[serde(deserialize_with = "de_opt_u32")]
    pub max_attempts: Option<u32>,
    #[serde(deserialize_with = "de_opt_string")]
    pub hint: Option<String>,
    #[serde(deserialize_with = "de_flag")]
    pub finished: bool,
    /// Points awarded for a correct answer, when the backend reports them.
    #[serde(deserialize_with = "de_opt_i64")]
    pub points: Option<i64>,
}

// =============================================================================
// DEVICE
// =============================================================================

pub const CELL_POINTS: usize = 6;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceStatus {
    #[serde(rename = "conectado", default, deserialize_with = "de_flag")]
    pub connected: bool,
    #[serde(rename = "tiempo_respuesta_ms", default, deserialize_with = "de_opt_f64")]
    pub latency_ms: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub error: Option<String>,
}

/// Raw cell state reply (`{"estados": [...]}` or `{"error": "..."}`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellReply {
    #[serde(rename = "estados", default)]
    pub points: Option<Vec<bool>>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub error: Option<String>,
}

/// Raw toggle reply (`{"estado": bool}` or `{"error": "..."}`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleReply {
    #[serde(rename = "estado", default)]
    pub point: Option<bool>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub error: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LetterCommand {
    #[serde(rename = "letra")]
    pub letter: String,
}

// =============================================================================
// LENIENT DECODING
// =============================================================================

fn default_true() -> bool {
    true
}

fn default_max_attempts() -> u32 {
    DEFAULT_MAX_ATTEMPTS
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => matches!(s.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"),
        _ => false,
    }
}

#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
fn value_as_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => {
            if let Some(int) = number.as_i64() {
                return Some(int);
            }
            number
                .as_f64()
                .filter(|f| f.is_finite() && f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64)
                .map(|f| f as i64)
        }
        Value::String(s) => {
            let trimmed = s.trim();
            trimmed
                .parse::<i64>()
                .ok()
                .or_else(|| value_as_i64(&Value::from(trimmed.parse::<f64>().ok()?)))
        }
        _ => None,
    }
}

fn value_as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn de_opt_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        value => value_as_i64(&value)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("expected integer-compatible value, got {value}"))),
    }
}

fn de_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(de_opt_i64(deserializer)?.unwrap_or(0))
}

fn de_opt_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    de_opt_i64(deserializer)?
        .map(|value| u32::try_from(value).map_err(|_| D::Error::custom(format!("value {value} out of range for u32"))))
        .transpose()
}

fn de_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(de_opt_u32(deserializer)?.unwrap_or(0))
}

fn de_opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        value => value_as_f64(&value)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("expected number, got {value}"))),
    }
}

fn de_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(de_opt_f64(deserializer)?.unwrap_or(0.0))
}

fn de_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(truthy(&Value::deserialize(deserializer)?))
}

fn de_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        other => Err(D::Error::custom(format!("expected string, got {other}"))),
    }
}

fn de_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(de_opt_string(deserializer)?.unwrap_or_default())
}

fn ser_flag_string<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(if *value { "1" } else { "0" })
}

fn ser_flag_int<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u8(u8::from(*value))
}
