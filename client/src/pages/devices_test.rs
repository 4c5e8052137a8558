use wire::types::{Role, UserProfile};

use super::*;

fn with_role(role: Role) -> SessionState {
    SessionState {
        user: Some(UserProfile {
            id: 9,
            username: "ana".to_owned(),
            full_name: "Ana".to_owned(),
            role,
            email: None,
            created_at: None,
        }),
        loaded: true,
    }
}

#[test]
fn home_follows_role() {
    assert_eq!(home_path(&with_role(Role::Student)), Route::landing(Role::Student).path());
    assert_eq!(home_path(&with_role(Role::Admin)), Route::landing(Role::Admin).path());
    assert_eq!(home_path(&SessionState::signed_out()), Route::Login.path());
}
