use wire::Backend;

use super::*;

#[test]
fn parse_app_config_fills_missing_backends_with_defaults() {
    let endpoints = parse_app_config(r#"{"device":"http://10.0.0.5:5004"}"#).unwrap();
    assert_eq!(endpoints.base(Backend::Device), "http://10.0.0.5:5004");
    assert_eq!(endpoints.base(Backend::Auth), Endpoints::default().base(Backend::Auth));
}

#[test]
fn parse_app_config_rejects_garbage() {
    assert_eq!(parse_app_config("<html>"), None);
}
