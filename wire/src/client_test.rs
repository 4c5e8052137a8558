use futures::executor::block_on;
use serde_json::json;

use super::*;
use crate::testing::{RecordingTransport, TestCredentials};

fn client(
    transport: RecordingTransport,
    credentials: TestCredentials,
) -> ApiClient<RecordingTransport, TestCredentials> {
    ApiClient::new(transport, credentials, Endpoints::default())
}

// =============================================================
// Auth policy
// =============================================================

#[test]
fn bearer_attached_to_every_backend_when_session_exists() {
    let api = client(RecordingTransport::new(), TestCredentials::with_token("tok"));
    for backend in Backend::ALL {
        block_on(api.call(ApiRequest::get(backend, "/x"))).unwrap();
        let sent = api.transport().last();
        assert_eq!(sent.authorization().as_deref(), Some("Bearer tok"));
        assert!(sent.url.starts_with(api.endpoints().base(backend)));
    }
}

#[test]
fn no_bearer_without_session() {
    let api = client(RecordingTransport::new(), TestCredentials::default());
    block_on(api.call(ApiRequest::get(Backend::Admin, "/admin"))).unwrap();
    assert_eq!(api.transport().last().authorization(), None);
}

#[test]
fn unauthorized_with_bearer_triggers_reauth_then_errors() {
    let transport = RecordingTransport::new().respond(401, r#"{"error":"expired"}"#);
    let api = client(transport, TestCredentials::with_token("stale"));
    let err = block_on(api.call(ApiRequest::get(Backend::Teacher, "/api/teacher/dashboard"))).unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(err.to_string(), "expired");
    assert_eq!(api.credentials().unauthorized.get(), 1);
}

#[test]
fn unauthorized_without_bearer_is_plain_error() {
    let transport = RecordingTransport::new().respond(401, r#"{"detail":"Incorrect username or password"}"#);
    let api = client(transport, TestCredentials::default());
    let err = block_on(api.call(ApiRequest::post(Backend::Auth, "/login/"))).unwrap_err();
    assert_eq!(err.to_string(), "Incorrect username or password");
    assert_eq!(api.credentials().unauthorized.get(), 0);
}

#[test]
fn forbidden_does_not_trigger_reauth() {
    let transport = RecordingTransport::new().respond(403, r#"{"error":"nope"}"#);
    let api = client(transport, TestCredentials::with_token("tok"));
    let err = block_on(api.call(ApiRequest::get(Backend::Admin, "/admin"))).unwrap_err();
    assert_eq!(err.status(), Some(403));
    assert_eq!(api.credentials().unauthorized.get(), 0);
}

// =============================================================
// Body handling
// =============================================================

#[test]
fn empty_success_body_is_null() {
    let transport = RecordingTransport::new().respond(204, "");
    let api = client(transport, TestCredentials::default());
    assert_eq!(block_on(api.call(ApiRequest::get(Backend::Device, "/api/clear"))).unwrap(), Value::Null);
}

#[test]
fn non_json_success_body_is_decode_error() {
    let transport = RecordingTransport::new().respond(200, "<html/>");
    let api = client(transport, TestCredentials::default());
    let err = block_on(api.call(ApiRequest::get(Backend::Auth, "/"))).unwrap_err();
    assert!(matches!(err, RequestError::Decode(_)));
}

#[test]
fn network_failure_propagates() {
    let transport = RecordingTransport::new().fail(RequestError::Network("refused".to_owned()));
    let api = client(transport, TestCredentials::with_token("tok"));
    let err = block_on(api.call(ApiRequest::get(Backend::Device, "/api/estado"))).unwrap_err();
    assert_eq!(err, RequestError::Network("refused".to_owned()));
    assert_eq!(api.credentials().unauthorized.get(), 0);
}

#[test]
fn call_as_decodes_typed_body() {
    #[derive(serde::Deserialize)]
    struct Reply {
        ok: bool,
    }
    let transport = RecordingTransport::new().respond(200, r#"{"ok":true}"#);
    let api = client(transport, TestCredentials::default());
    let reply: Reply = block_on(api.call_as(ApiRequest::post(Backend::Student, "/api/skip/1"))).unwrap();
    assert!(reply.ok);
}

#[test]
fn reachable_reflects_status_and_network() {
    let transport = RecordingTransport::new()
        .respond(200, "{}")
        .respond(500, "")
        .fail(RequestError::Network("down".to_owned()));
    let api = client(transport, TestCredentials::default());
    assert!(block_on(api.reachable(ApiRequest::get(Backend::Auth, "/"))));
    assert!(!block_on(api.reachable(ApiRequest::get(Backend::Auth, "/"))));
    assert!(!block_on(api.reachable(ApiRequest::get(Backend::Auth, "/"))));
}

#[test]
fn json_builder_sets_body() {
    let request = ApiRequest::post(Backend::Device, "/api/letra").json(&json!({"letra": "A"}));
    assert_eq!(request.json_body(), Some(&json!({"letra": "A"})));
    assert_eq!(request.method, Method::Post);
}
