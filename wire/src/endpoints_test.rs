use std::collections::HashMap;

use super::*;

#[test]
fn defaults_point_at_local_services() {
    let endpoints = Endpoints::default();
    assert_eq!(endpoints.base(Backend::Auth), "http://127.0.0.1:8000/api");
    assert_eq!(endpoints.base(Backend::Admin), "http://localhost:5000");
    assert_eq!(endpoints.base(Backend::Teacher), "http://localhost:5002");
    assert_eq!(endpoints.base(Backend::Student), "http://localhost:5003");
    assert_eq!(endpoints.base(Backend::Device), "http://localhost:5004");
}

#[test]
fn url_joins_with_single_slash() {
    let mut endpoints = Endpoints::default();
    endpoints.set(Backend::Admin, "http://admin.test/".to_owned());
    assert_eq!(endpoints.url(Backend::Admin, "/admin"), "http://admin.test/admin");
    assert_eq!(endpoints.url(Backend::Admin, "admin"), "http://admin.test/admin");
    assert_eq!(endpoints.url(Backend::Admin, ""), "http://admin.test");
}

#[test]
fn url_keeps_base_path_prefix() {
    let endpoints = Endpoints::default();
    assert_eq!(endpoints.url(Backend::Auth, "/login/"), "http://127.0.0.1:8000/api/login/");
    assert_eq!(endpoints.url(Backend::Auth, "/"), "http://127.0.0.1:8000/api/");
}

#[test]
fn from_lookup_overrides_only_present_values() {
    let env: HashMap<&str, &str> = [
        ("TOUCHGLYPH_TEACHER_URL", "https://teach.example.com"),
        ("TOUCHGLYPH_DEVICE_URL", "   "),
    ]
    .into_iter()
    .collect();
    let endpoints = Endpoints::from_lookup(|key| env.get(key).map(|v| (*v).to_owned()));
    assert_eq!(endpoints.teacher, "https://teach.example.com");
    assert_eq!(endpoints.device, Endpoints::default().device);
    assert_eq!(endpoints.auth, Endpoints::default().auth);
}

#[test]
fn partial_config_document_fills_defaults() {
    let endpoints: Endpoints = serde_json::from_str(r#"{"admin":"http://a:1"}"#).unwrap();
    assert_eq!(endpoints.admin, "http://a:1");
    assert_eq!(endpoints.student, "http://localhost:5003");
}

#[test]
fn backend_names_and_env_vars_are_distinct() {
    let names: std::collections::HashSet<_> = Backend::ALL.iter().map(|b| b.as_str()).collect();
    let vars: std::collections::HashSet<_> = Backend::ALL.iter().map(|b| b.env_var()).collect();
    assert_eq!(names.len(), 5);
    assert_eq!(vars.len(), 5);
}
