use super::*;

#[test]
fn from_status_prefers_error_field() {
    let err = RequestError::from_status(400, r#"{"error":"Username already exists"}"#);
    assert_eq!(
        err,
        RequestError::Status {
            status: 400,
            message: "Username already exists".to_owned()
        }
    );
    assert_eq!(err.to_string(), "Username already exists");
}

#[test]
fn from_status_reads_detail_string() {
    let err = RequestError::from_status(401, r#"{"detail":"Incorrect username or password"}"#);
    assert_eq!(err.to_string(), "Incorrect username or password");
    assert!(err.is_unauthorized());
}

#[test]
fn from_status_reads_first_validation_detail() {
    let body = r#"{"detail":[{"loc":["body","password"],"msg":"field required","type":"missing"}]}"#;
    let err = RequestError::from_status(422, body);
    assert_eq!(err.to_string(), "field required");
}

#[test]
fn from_status_falls_back_to_generic_message() {
    assert_eq!(
        RequestError::from_status(500, "<html>boom</html>").to_string(),
        "request failed with status 500"
    );
    assert_eq!(
        RequestError::from_status(404, r#"{"message":"nope"}"#).to_string(),
        "request failed with status 404"
    );
    assert_eq!(RequestError::from_status(503, "").to_string(), "request failed with status 503");
}

#[test]
fn network_error_reads_as_unreachable() {
    let err = RequestError::Network("connection refused".to_owned());
    assert_eq!(err.to_string(), "server unreachable: connection refused");
    assert_eq!(err.status(), None);
    assert!(!err.is_unauthorized());
}
