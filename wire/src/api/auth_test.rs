use futures::executor::block_on;
use serde_json::json;

use super::*;
use crate::testing::{RecordingTransport, TestCredentials};
use crate::types::Role;
use crate::{Endpoints, Method};

#[test]
fn request_builders_target_auth_paths() {
    assert_eq!(ping_request().path, "/");
    let login = login_request(&LoginForm {
        username: "ana".to_owned(),
        password: "pw".to_owned(),
    });
    assert_eq!((login.backend, login.method, login.path.as_str()), (Backend::Auth, Method::Post, "/login/"));
    assert_eq!(login.json_body(), Some(&json!({"username": "ana", "password": "pw"})));

    let personal = personal_data_request(
        12,
        &PersonalData {
            full_name: "Ana Diaz".to_owned(),
            email: None,
        },
    );
    assert_eq!(personal.method, Method::Put);
    assert_eq!(personal.path, "/usuarios/12/datos-personales/");
}

#[test]
fn register_sends_role_in_lowercase() {
    let request = register_request(&Registration {
        username: "ana".to_owned(),
        full_name: "Ana".to_owned(),
        password: "longenough".to_owned(),
        role: Role::Teacher,
    });
    assert_eq!(request.path, "/usuarios/");
    assert_eq!(request.json_body().unwrap()["role"], json!("teacher"));
}

#[test]
fn login_decodes_token_and_profile() {
    let transport = RecordingTransport::new().respond(
        200,
        r#"{"access_token":"t1","token_type":"bearer","user":{"id":1,"username":"root","full_name":"Root","role":"admin"}}"#,
    );
    let api = ApiClient::new(transport, TestCredentials::default(), Endpoints::default());
    let reply = block_on(api.auth().login(&LoginForm {
        username: "root".to_owned(),
        password: "pw".to_owned(),
    }))
    .unwrap();
    assert_eq!(reply.access_token, "t1");
    assert_eq!(reply.user.role, Role::Admin);
}

#[test]
fn friendly_registration_error_rewrites_duplicates() {
    let duplicate = RequestError::from_status(400, r#"{"detail":"Usuario ya registrado"}"#);
    assert_eq!(
        friendly_registration_error(&duplicate),
        "That username is already taken. Choose another one."
    );
    let other = RequestError::from_status(500, "");
    assert_eq!(friendly_registration_error(&other), "request failed with status 500");
}
