//! Admin commands: users, classes, devices and the CSV student import.
//!
//! Every list comes from the admin snapshot (`GET /admin`), the same single
//! call the admin dashboard renders from.

#[cfg(test)]
#[path = "admin_test.rs"]
mod admin_test;

use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use flows::{Route, validate};
use wire::types::{AdminSnapshot, AdminUser, NewClass, NewDevice, NewUser, Role, UserUpdate};

use crate::{CliError, Context, print_json};

#[derive(Subcommand, Debug)]
pub(crate) enum AdminCommand {
    /// Users, students, teachers, classes and devices in one document.
    Snapshot,
    /// List users, optionally of one role.
    Users {
        #[arg(long)]
        role: Option<Role>,
    },
    CreateUser(NewUserArgs),
    /// Change a user; omitted fields keep their current value.
    UpdateUser(UpdateUserArgs),
    DeleteUser {
        user_id: i64,
    },
    Classes,
    CreateClass {
        #[arg(long)]
        name: String,
        #[arg(long)]
        teacher: Option<i64>,
    },
    /// Reassign a class's teacher; omit `--teacher` to leave it unassigned.
    AssignTeacher {
        class_id: i64,
        #[arg(long)]
        teacher: Option<i64>,
    },
    DeleteClass {
        class_id: i64,
    },
    /// A class with its enrolled students.
    Class {
        class_id: i64,
    },
    AddStudents {
        class_id: i64,
        #[arg(required = true)]
        student_ids: Vec<i64>,
    },
    Devices,
    CreateDevice {
        #[arg(long)]
        device_id: String,
        #[arg(long)]
        name: String,
    },
    /// Create students in bulk from a CSV file.
    Import {
        file: PathBuf,
    },
}

#[derive(Args, Debug)]
pub(crate) struct NewUserArgs {
    #[arg(long)]
    username: String,
    #[arg(long)]
    full_name: String,
    #[arg(long, env = "TOUCHGLYPH_NEW_PASSWORD", hide_env_values = true)]
    password: String,
    #[arg(long)]
    role: Role,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    ci: Option<String>,
    #[arg(long)]
    inactive: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct UpdateUserArgs {
    user_id: i64,
    #[arg(long)]
    username: Option<String>,
    #[arg(long)]
    full_name: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long, env = "TOUCHGLYPH_NEW_PASSWORD", hide_env_values = true)]
    password: Option<String>,
    #[arg(long)]
    active: Option<bool>,
}

fn blank_to_none(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_owned()).filter(|v| !v.is_empty())
}

pub(crate) fn new_user(args: NewUserArgs) -> NewUser {
    NewUser {
        username: args.username.trim().to_owned(),
        full_name: args.full_name.trim().to_owned(),
        role: args.role,
        password: args.password,
        email: blank_to_none(args.email),
        ci: blank_to_none(args.ci),
        active: !args.inactive,
    }
}

/// Merge the given overrides onto the stored user.
pub(crate) fn user_update(existing: &AdminUser, args: UpdateUserArgs) -> UserUpdate {
    UserUpdate {
        user_id: existing.id,
        username: args.username.map_or_else(|| existing.username.clone(), |v| v.trim().to_owned()),
        full_name: args.full_name.map_or_else(|| existing.full_name.clone(), |v| v.trim().to_owned()),
        email: match args.email {
            Some(email) => blank_to_none(Some(email)),
            None => existing.email.clone(),
        },
        password: args.password.filter(|p| !p.is_empty()),
        active: args.active.unwrap_or(existing.active),
    }
}

pub(crate) fn users_with_role(snapshot: AdminSnapshot, role: Option<Role>) -> Vec<AdminUser> {
    match role {
        None => snapshot.users,
        Some(Role::Student) => snapshot.students,
        Some(Role::Teacher) => snapshot.teachers,
        Some(Role::Admin) => snapshot.users.into_iter().filter(|user| user.role == Role::Admin).collect(),
    }
}

pub(crate) fn csv_name(path: &Path) -> Result<String, CliError> {
    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    let name = path.file_name().and_then(|name| name.to_str()).filter(|_| is_csv);
    name.map(ToOwned::to_owned).ok_or_else(|| CliError::NotCsv(path.to_path_buf()))
}

pub(crate) async fn run(ctx: &Context, command: AdminCommand) -> Result<(), CliError> {
    ctx.require(Route::Admin)?;
    let api = ctx.api();
    let admin = api.admin();
    match command {
        AdminCommand::Snapshot => print_json(&admin.snapshot().await?),
        AdminCommand::Users { role } => print_json(&users_with_role(admin.snapshot().await?, role)),
        AdminCommand::CreateUser(args) => {
            let user = new_user(args);
            validate::new_user(&user)?;
            print_json(&admin.create_user(&user).await?)
        }
        AdminCommand::UpdateUser(args) => {
            let snapshot = admin.snapshot().await?;
            let existing = snapshot
                .users
                .iter()
                .find(|user| user.id == args.user_id)
                .ok_or_else(|| CliError::NotFound(format!("user {}", args.user_id)))?;
            let update = user_update(existing, args);
            validate::user_update(&update)?;
            print_json(&admin.update_user(&update).await?)
        }
        AdminCommand::DeleteUser { user_id } => print_json(&admin.delete_user(user_id).await?),
        AdminCommand::Classes => print_json(&admin.snapshot().await?.classes),
        AdminCommand::CreateClass { name, teacher } => {
            let class = NewClass {
                name: validate::class_name(&name)?,
                teacher_id: teacher,
            };
            print_json(&admin.create_class(&class).await?)
        }
        AdminCommand::AssignTeacher { class_id, teacher } => print_json(&admin.assign_teacher(class_id, teacher).await?),
        AdminCommand::DeleteClass { class_id } => print_json(&admin.delete_class(class_id).await?),
        AdminCommand::Class { class_id } => print_json(&admin.class_details(class_id).await?),
        AdminCommand::AddStudents { class_id, student_ids } => {
            validate::student_selection(&student_ids)?;
            print_json(&admin.add_students(class_id, &student_ids).await?)
        }
        AdminCommand::Devices => print_json(&admin.snapshot().await?.devices),
        AdminCommand::CreateDevice { device_id, name } => {
            let device = NewDevice {
                device_id: device_id.trim().to_owned(),
                name: name.trim().to_owned(),
            };
            validate::device(&device)?;
            print_json(&admin.create_device(&device).await?)
        }
        AdminCommand::Import { file } => {
            let name = csv_name(&file)?;
            let bytes = std::fs::read(&file).map_err(|source| CliError::ReadFile {
                path: file.clone(),
                source,
            })?;
            tracing::info!(file = %file.display(), size = bytes.len(), "importing students");
            print_json(&admin.import_students(&name, bytes).await?)
        }
    }
}
