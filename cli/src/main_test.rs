use flows::MemoryStorage;
use wire::types::LoginResponse;

use super::*;

fn store_with(role: Role) -> SessionStore<MemoryStorage> {
    let store = SessionStore::new(MemoryStorage::new());
    store
        .sign_in(&LoginResponse {
            access_token: "tok".to_owned(),
            token_type: "bearer".to_owned(),
            user: UserProfile {
                id: 12,
                username: "marta".to_owned(),
                full_name: "Marta Díaz".to_owned(),
                role,
                email: None,
                created_at: None,
            },
        })
        .unwrap();
    store
}

#[test]
fn parses_nested_subcommands() {
    let cli = Cli::try_parse_from(["touchglyph", "student", "play", "ab12cd34"]).unwrap();
    assert!(matches!(
        cli.command,
        Command::Student(student::StudentCommand::Play { ref lesson_id }) if lesson_id == "ab12cd34"
    ));

    let cli = Cli::try_parse_from(["touchglyph", "device", "toggle", "4"]).unwrap();
    assert!(matches!(cli.command, Command::Device(device::DeviceCommand::Toggle { point: 4 })));
}

#[test]
fn unknown_role_is_rejected_by_parser() {
    let parsed = Cli::try_parse_from(["touchglyph", "admin", "users", "--role", "janitor"]);
    assert!(parsed.is_err());
}

#[test]
fn endpoint_flags_override_defaults() {
    let args = EndpointArgs {
        device_url: Some(" http://bridge.local:5004 ".to_owned()),
        teacher_url: Some("   ".to_owned()),
        ..EndpointArgs::default()
    };
    let endpoints = args.resolve();
    assert_eq!(endpoints.base(Backend::Device), "http://bridge.local:5004");
    assert_eq!(endpoints.base(Backend::Teacher), Endpoints::default().teacher);
}

#[test]
fn authorize_requires_a_session() {
    let store = SessionStore::new(MemoryStorage::new());
    assert!(matches!(authorize(&store, Route::Lessons), Err(CliError::NotSignedIn)));
}

#[test]
fn authorize_applies_role_guard() {
    let teacher = store_with(Role::Teacher);
    assert_eq!(authorize(&teacher, Route::Teacher).unwrap().id, 12);
    assert!(authorize(&teacher, Route::Devices).is_ok());
    assert!(matches!(
        authorize(&teacher, Route::Admin),
        Err(CliError::Forbidden {
            path: "/admin",
            role: Role::Teacher
        })
    ));
}
