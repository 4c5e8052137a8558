use wire::types::{Role, UserProfile};

use super::*;

fn signed_in(role: Role) -> SessionState {
    SessionState {
        user: Some(UserProfile {
            id: 1,
            username: "u".to_owned(),
            full_name: "User".to_owned(),
            role,
            email: None,
            created_at: None,
        }),
        loaded: true,
    }
}

#[test]
fn no_redirect_while_session_unknown() {
    assert_eq!(redirect_target(&SessionState::default(), Route::Admin), None);
}

#[test]
fn signed_out_users_go_to_login() {
    let state = SessionState::signed_out();
    assert_eq!(redirect_target(&state, Route::Lessons), Some(Route::Login));
    assert_eq!(redirect_target(&state, Route::Login), None);
}

#[test]
fn wrong_role_lands_on_own_home() {
    assert_eq!(redirect_target(&signed_in(Role::Student), Route::Admin), Some(Route::Dashboard));
    assert_eq!(redirect_target(&signed_in(Role::Teacher), Route::Admin), Some(Route::Teacher));
    assert_eq!(redirect_target(&signed_in(Role::Admin), Route::Admin), None);
}

#[test]
fn signed_in_users_skip_login() {
    assert_eq!(redirect_target(&signed_in(Role::Admin), Route::Login), Some(Route::Admin));
}
