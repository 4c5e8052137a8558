use wire::types::{LoginResponse, Role, UserProfile};

use super::*;

fn profile(role: Role) -> UserProfile {
    UserProfile {
        id: 7,
        username: "ana".to_owned(),
        full_name: "Ana Rojas".to_owned(),
        role,
        email: None,
        created_at: None,
    }
}

fn login(role: Role) -> LoginResponse {
    LoginResponse {
        access_token: "tok-1".to_owned(),
        token_type: "bearer".to_owned(),
        user: profile(role),
    }
}

#[test]
fn empty_storage_is_signed_out() {
    let store = SessionStore::new(MemoryStorage::new());
    assert!(!store.is_authenticated());
    assert_eq!(store.role(), None);
    assert_eq!(store.bearer(), None);
}

#[test]
fn sign_in_persists_token_and_profile() {
    let store = SessionStore::new(MemoryStorage::new());
    store.sign_in(&login(Role::Teacher)).unwrap();
    assert!(store.is_authenticated());
    assert_eq!(store.role(), Some(Role::Teacher));
    assert_eq!(store.token().as_deref(), Some("tok-1"));
    assert_eq!(store.user().unwrap().username, "ana");
}

#[test]
fn token_without_profile_is_not_a_session() {
    let storage = MemoryStorage::new();
    storage.set(TOKEN_KEY, "tok-1");
    let store = SessionStore::new(&storage);
    assert!(!store.is_authenticated());

    storage.set(USER_KEY, "{not json");
    assert!(!store.is_authenticated());
    assert_eq!(store.role(), None);
}

#[test]
fn empty_token_counts_as_missing() {
    let storage = MemoryStorage::new();
    storage.set(TOKEN_KEY, "");
    storage.set(USER_KEY, &serde_json::to_string(&profile(Role::Admin)).unwrap());
    assert!(!SessionStore::new(&storage).is_authenticated());
}

#[test]
fn logout_clears_every_session_key() {
    let storage = MemoryStorage::new();
    let store = SessionStore::new(&storage);
    store.sign_in(&login(Role::Student)).unwrap();
    store.update_profile(&profile(Role::Student)).unwrap();
    storage.set(TEMP_USER_KEY, "{}");
    storage.set("unrelated", "kept");

    store.logout();

    for key in ALL_KEYS {
        assert_eq!(storage.get(key), None, "{key} survived logout");
    }
    assert_eq!(storage.get("unrelated").as_deref(), Some("kept"));
    assert!(!store.is_authenticated());
}

#[test]
fn unauthorized_callback_logs_out() {
    let storage = MemoryStorage::new();
    let store = SessionStore::new(&storage);
    store.sign_in(&login(Role::Admin)).unwrap();
    store.on_unauthorized();
    assert!(storage.is_empty());
}

#[test]
fn update_profile_replaces_cached_user() {
    let store = SessionStore::new(MemoryStorage::new());
    store.sign_in(&login(Role::Teacher)).unwrap();
    let mut edited = profile(Role::Teacher);
    edited.full_name = "Ana M. Rojas".to_owned();
    store.update_profile(&edited).unwrap();
    assert_eq!(store.user().unwrap().full_name, "Ana M. Rojas");
}
