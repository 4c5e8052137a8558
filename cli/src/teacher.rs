//! Teacher commands: dashboard, classes, student progress and lessons.
//!
//! Lessons are edited as JSON documents: `export-lesson` prints a lesson as
//! a draft, `create-lesson`/`update-lesson` read one back from a file.

#[cfg(test)]
#[path = "teacher_test.rs"]
mod teacher_test;

use std::path::{Path, PathBuf};

use clap::Subcommand;
use flows::{Route, validate};
use wire::types::{LessonAssignment, LessonDraft};

use crate::{CliError, Context, print_json};

#[derive(Subcommand, Debug)]
pub(crate) enum TeacherCommand {
    /// Totals and per-student activity.
    Dashboard,
    /// Classes taught by the signed-in teacher.
    Classes,
    Roster {
        class_id: i64,
    },
    /// One student's progress per lesson.
    Student {
        student_id: i64,
    },
    Lessons,
    Lesson {
        lesson_id: String,
    },
    /// Print a lesson as an editable draft.
    ExportLesson {
        lesson_id: String,
    },
    CreateLesson {
        #[arg(long)]
        file: PathBuf,
    },
    UpdateLesson {
        lesson_id: String,
        #[arg(long)]
        file: PathBuf,
    },
    DeleteLesson {
        lesson_id: String,
    },
    /// Assign a lesson to a class.
    Assign {
        lesson_id: String,
        #[arg(long = "class")]
        class_id: i64,
        /// Due date as `YYYY-MM-DD`.
        #[arg(long)]
        due: Option<String>,
    },
}

/// Parse and validate a lesson draft.
pub(crate) fn parse_draft(raw: &str) -> Result<LessonDraft, CliError> {
    let draft: LessonDraft = serde_json::from_str(raw)?;
    validate::lesson(&draft)?;
    Ok(draft)
}

fn read_draft(path: &Path) -> Result<LessonDraft, CliError> {
    let raw = std::fs::read_to_string(path).map_err(|source| CliError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    parse_draft(&raw)
}

pub(crate) fn assignment(class_id: i64, due: Option<String>) -> LessonAssignment {
    LessonAssignment {
        class_id,
        due_date: due.map(|d| d.trim().to_owned()).filter(|d| !d.is_empty()),
    }
}

pub(crate) async fn run(ctx: &Context, command: TeacherCommand) -> Result<(), CliError> {
    let user = ctx.require(Route::Teacher)?;
    let api = ctx.api();
    let teacher = api.teacher();
    match command {
        TeacherCommand::Dashboard => print_json(&teacher.dashboard().await?),
        TeacherCommand::Classes => print_json(&teacher.classes(user.id).await?),
        TeacherCommand::Roster { class_id } => print_json(&teacher.class_students(class_id).await?),
        TeacherCommand::Student { student_id } => print_json(&teacher.student_detail(student_id).await?),
        TeacherCommand::Lessons => print_json(&teacher.lessons().await?),
        TeacherCommand::Lesson { lesson_id } => print_json(&teacher.lesson(&lesson_id).await?),
        TeacherCommand::ExportLesson { lesson_id } => print_json(&teacher.lesson(&lesson_id).await?.to_draft()),
        TeacherCommand::CreateLesson { file } => {
            let draft = read_draft(&file)?;
            let created = teacher.create_lesson(&draft).await?;
            tracing::info!(lesson_id = %created.lesson_id, steps = draft.steps.len(), "lesson created");
            print_json(&created)
        }
        TeacherCommand::UpdateLesson { lesson_id, file } => {
            let draft = read_draft(&file)?;
            print_json(&teacher.update_lesson(&lesson_id, &draft).await?)
        }
        TeacherCommand::DeleteLesson { lesson_id } => print_json(&teacher.delete_lesson(&lesson_id).await?),
        TeacherCommand::Assign { lesson_id, class_id, due } => {
            print_json(&teacher.assign_lesson(&lesson_id, &assignment(class_id, due)).await?)
        }
    }
}
