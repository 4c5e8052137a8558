use futures::executor::block_on;
use serde_json::json;

use super::*;
use crate::testing::{RecordingTransport, TestCredentials};
use crate::{Endpoints, Method};

fn api(transport: RecordingTransport) -> ApiClient<RecordingTransport, TestCredentials> {
    ApiClient::new(transport, TestCredentials::default(), Endpoints::default())
}

#[test]
fn command_paths() {
    assert_eq!(device_status_request().path, "/api/device_status");
    assert_eq!(cell_request().path, "/api/estado");
    assert_eq!(toggle_request(0).path, "/api/toggle/0");
    assert_eq!(toggle_request(5).method, Method::Get);
    assert_eq!(clear_request().path, "/api/clear");
    let letter = letter_request('B');
    assert_eq!((letter.method, letter.path.as_str()), (Method::Post, "/api/letra"));
    assert_eq!(letter.json_body(), Some(&json!({"letra": "B"})));
}

#[test]
fn cell_from_reply_requires_six_points() {
    let ok = CellReply {
        points: Some(vec![true, false, false, false, false, true]),
        error: None,
    };
    assert_eq!(cell_from_reply(ok).unwrap(), [true, false, false, false, false, true]);

    let short = CellReply {
        points: Some(vec![true]),
        error: None,
    };
    assert!(matches!(cell_from_reply(short), Err(RequestError::Decode(_))));

    let missing = CellReply::default();
    assert!(matches!(cell_from_reply(missing), Err(RequestError::Decode(_))));
}

#[test]
fn error_field_becomes_rejection() {
    let reply = CellReply {
        points: None,
        error: Some("ESP32 not responding".to_owned()),
    };
    assert_eq!(
        cell_from_reply(reply),
        Err(RequestError::Rejected("ESP32 not responding".to_owned()))
    );
}

#[test]
fn toggle_returns_device_reported_state() {
    let client = api(RecordingTransport::new().respond(200, r#"{"estado":true}"#));
    assert!(block_on(client.device().toggle(2)).unwrap());
    assert_eq!(client.transport().last().url, "http://localhost:5004/api/toggle/2");

    let client = api(RecordingTransport::new().respond(200, r#"{"error":"busy"}"#));
    assert_eq!(
        block_on(client.device().toggle(2)),
        Err(RequestError::Rejected("busy".to_owned()))
    );
}

#[test]
fn status_reads_latency() {
    let client = api(RecordingTransport::new().respond(200, r#"{"conectado":false,"error":"timeout"}"#));
    let status = block_on(client.device().status()).unwrap();
    assert!(!status.connected);
    assert_eq!(status.error.as_deref(), Some("timeout"));
    assert_eq!(status.latency_ms, None);
}
