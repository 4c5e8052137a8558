//! `touchglyph`: terminal client for the TouchGlyph Braille-learning platform.
//!
//! SYSTEM CONTEXT
//! ==============
//! Same backends, same session rules and same lesson and device state
//! machines as the web client, driven from a terminal. The login session is
//! kept in a JSON file (`--session-file`), so consecutive invocations act
//! as one signed-in user until `logout` or a rejected token clears it.
//!
//! Data commands print pretty JSON on stdout. Logs go to stderr and follow
//! `RUST_LOG`.

mod admin;
mod auth;
mod device;
mod storage;
mod student;
mod teacher;
mod transport;

#[cfg(test)]
#[path = "main_test.rs"]
mod main_test;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use flows::{Resolution, Route, SessionStorage, SessionStore, ValidationError};
use serde::Serialize;
use tracing_subscriber::EnvFilter;
use wire::types::{Role, UserProfile};
use wire::{ApiClient, Backend, Endpoints, RequestError};

use crate::storage::FileStorage;
use crate::transport::ReqwestTransport;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("not signed in; run `touchglyph login` first")]
    NotSignedIn,
    #[error("{path} is not available to the {role} role")]
    Forbidden { path: &'static str, role: Role },
    #[error(transparent)]
    Request(#[from] RequestError),
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("session file {}: {source}", path.display())]
    Session { path: PathBuf, source: std::io::Error },
    #[error("{}: {source}", path.display())]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("{} is not a .csv file", .0.display())]
    NotCsv(PathBuf),
    #[error("{0} not found")]
    NotFound(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "touchglyph", about = "TouchGlyph Braille-learning platform CLI")]
struct Cli {
    #[command(flatten)]
    endpoints: EndpointArgs,

    /// Where the login session is stored.
    #[arg(long, env = "TOUCHGLYPH_SESSION_FILE", global = true)]
    session_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

/// Base URL overrides; unset backends keep their local default.
#[derive(Args, Debug, Default)]
struct EndpointArgs {
    #[arg(long, env = "TOUCHGLYPH_AUTH_URL", global = true)]
    auth_url: Option<String>,
    #[arg(long, env = "TOUCHGLYPH_ADMIN_URL", global = true)]
    admin_url: Option<String>,
    #[arg(long, env = "TOUCHGLYPH_TEACHER_URL", global = true)]
    teacher_url: Option<String>,
    #[arg(long, env = "TOUCHGLYPH_STUDENT_URL", global = true)]
    student_url: Option<String>,
    #[arg(long, env = "TOUCHGLYPH_DEVICE_URL", global = true)]
    device_url: Option<String>,
}

impl EndpointArgs {
    fn resolve(&self) -> Endpoints {
        let mut endpoints = Endpoints::default();
        let overrides = [
            (Backend::Auth, &self.auth_url),
            (Backend::Admin, &self.admin_url),
            (Backend::Teacher, &self.teacher_url),
            (Backend::Student, &self.student_url),
            (Backend::Device, &self.device_url),
        ];
        for (backend, value) in overrides {
            if let Some(base) = value.as_deref().map(str::trim).filter(|base| !base.is_empty()) {
                endpoints.set(backend, base.to_owned());
            }
        }
        endpoints
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check whether the auth service answers.
    Ping,
    Login(auth::LoginArgs),
    Register(auth::RegisterArgs),
    Logout,
    /// Print the signed-in profile.
    Whoami,
    /// Update the signed-in user's name and email.
    Profile(auth::ProfileArgs),
    #[command(subcommand)]
    Admin(admin::AdminCommand),
    #[command(subcommand)]
    Teacher(teacher::TeacherCommand),
    #[command(subcommand)]
    Student(student::StudentCommand),
    #[command(subcommand)]
    Device(device::DeviceCommand),
}

type Api<'a> = ApiClient<ReqwestTransport, &'a SessionStore<FileStorage>>;

struct Context {
    endpoints: Endpoints,
    transport: ReqwestTransport,
    session: SessionStore<FileStorage>,
}

impl Context {
    fn api(&self) -> Api<'_> {
        ApiClient::new(self.transport.clone(), &self.session, self.endpoints.clone())
    }

    fn user(&self) -> Result<UserProfile, CliError> {
        signed_in(&self.session)
    }

    fn require(&self, route: Route) -> Result<UserProfile, CliError> {
        authorize(&self.session, route)
    }
}

fn signed_in<S: SessionStorage>(session: &SessionStore<S>) -> Result<UserProfile, CliError> {
    session
        .user()
        .filter(|_| session.is_authenticated())
        .ok_or(CliError::NotSignedIn)
}

/// Apply the route guard to a terminal command.
fn authorize<S: SessionStorage>(session: &SessionStore<S>, route: Route) -> Result<UserProfile, CliError> {
    let user = signed_in(session)?;
    match route.resolve(Some(user.role)) {
        Resolution::Render => Ok(user),
        Resolution::Redirect(_) => Err(CliError::Forbidden {
            path: route.path(),
            role: user.role,
        }),
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    init_tracing();
    let cli = Cli::parse();
    let session_path = cli.session_file.clone().unwrap_or_else(storage::default_path);
    let ctx = Context {
        endpoints: cli.endpoints.resolve(),
        transport: ReqwestTransport::new(),
        session: SessionStore::new(FileStorage::open(session_path)?),
    };

    match cli.command {
        Command::Ping => auth::ping(&ctx).await,
        Command::Login(args) => auth::login(&ctx, args).await,
        Command::Register(args) => auth::register(&ctx, args).await,
        Command::Logout => auth::logout(&ctx),
        Command::Whoami => auth::whoami(&ctx),
        Command::Profile(args) => auth::update_profile(&ctx, args).await,
        Command::Admin(command) => admin::run(&ctx, command).await,
        Command::Teacher(command) => teacher::run(&ctx, command).await,
        Command::Student(command) => student::run(&ctx, command).await,
        Command::Device(command) => device::run(&ctx, command).await,
    }
}
