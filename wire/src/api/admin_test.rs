use futures::executor::block_on;

use super::*;
use crate::testing::{RecordingTransport, TestCredentials};
use crate::types::Role;
use crate::{Body, Endpoints, Method};

#[test]
fn mutations_are_posts_with_id_bodies() {
    let delete = delete_user_request(4);
    assert_eq!((delete.method, delete.path.as_str()), (Method::Post, "/admin/delete_user"));
    assert_eq!(delete.json_body(), Some(&json!({"user_id": 4})));

    let assign = assign_teacher_request(2, None);
    assert_eq!(assign.json_body(), Some(&json!({"class_id": 2, "teacher_id": null})));

    let delete_class = delete_class_request(9);
    assert_eq!(delete_class.json_body(), Some(&json!({"class_id": 9})));

    let add = add_students_request(9, &[5, 6]);
    assert_eq!(add.path, "/admin/add_students_to_class");
    assert_eq!(add.json_body(), Some(&json!({"class_id": 9, "student_ids": [5, 6]})));
}

#[test]
fn class_details_is_a_get_with_id_in_path() {
    let request = class_details_request(17);
    assert_eq!(request.method, Method::Get);
    assert_eq!(request.path, "/admin/get_class_details/17");
}

#[test]
fn import_uses_multipart_csv_field() {
    let request = import_students_request("alumnos.csv", b"username,full_name\nana,Ana\n".to_vec());
    let Body::Multipart(parts) = &request.body else {
        panic!("expected multipart body");
    };
    assert_eq!(parts.len(), 1);
    assert_eq!(parts[0].name, CSV_FIELD);
    assert_eq!(parts[0].file_name.as_deref(), Some("alumnos.csv"));
    assert_eq!(parts[0].content_type.as_deref(), Some("text/csv"));
}

#[test]
fn create_user_posts_to_admin_backend_with_bearer() {
    let api = ApiClient::new(
        RecordingTransport::new().respond(201, r#"{"message":"User created successfully","username":"ana"}"#),
        TestCredentials::with_token("admin-token"),
        Endpoints::default(),
    );
    let ack = block_on(api.admin().create_user(&NewUser {
        username: "ana".to_owned(),
        full_name: "Ana".to_owned(),
        role: Role::Student,
        password: "longenough".to_owned(),
        email: None,
        ci: None,
        active: true,
    }))
    .unwrap();
    assert_eq!(ack.message.as_deref(), Some("User created successfully"));

    let sent = api.transport().last();
    assert_eq!(sent.url, "http://localhost:5000/admin/create_user");
    assert_eq!(sent.authorization().as_deref(), Some("Bearer admin-token"));
}

#[test]
fn duplicate_username_surfaces_flask_error() {
    let api = ApiClient::new(
        RecordingTransport::new().respond(400, r#"{"error":"Username already exists"}"#),
        TestCredentials::with_token("t"),
        Endpoints::default(),
    );
    let err = block_on(api.admin().delete_user(1)).unwrap_err();
    assert_eq!(err.to_string(), "Username already exists");
}
