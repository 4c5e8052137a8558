use flows::{MemoryStorage, Resolution, Route, SessionStore};
use wire::types::{LoginResponse, Role, UserProfile};

use super::*;

fn signed_in(role: Role) -> SessionState {
    let store = SessionStore::new(MemoryStorage::new());
    store
        .sign_in(&LoginResponse {
            access_token: "tok".to_owned(),
            token_type: "bearer".to_owned(),
            user: UserProfile {
                id: 3,
                username: "prof".to_owned(),
                full_name: String::new(),
                role,
                email: None,
                created_at: None,
            },
        })
        .unwrap();
    SessionState::from_store(&store)
}

#[test]
fn unknown_session_resolves_nothing() {
    let state = SessionState::default();
    assert_eq!(state.resolve(Route::Admin), None);
    assert!(!state.allows(Route::Login));
}

#[test]
fn empty_store_is_signed_out() {
    let state = SessionState::from_store(&SessionStore::new(MemoryStorage::new()));
    assert_eq!(state, SessionState::signed_out());
    assert_eq!(state.resolve(Route::Lessons), Some(Resolution::Redirect(Route::Login)));
}

#[test]
fn teacher_is_sent_away_from_admin() {
    let state = signed_in(Role::Teacher);
    assert_eq!(state.resolve(Route::Admin), Some(Resolution::Redirect(Route::Teacher)));
    assert!(state.allows(Route::Teacher));
    assert_eq!(state.user_id(), Some(3));
}

#[test]
fn display_name_falls_back_to_username() {
    assert_eq!(signed_in(Role::Student).display_name(), "prof");
    assert_eq!(SessionState::signed_out().display_name(), "");
}
