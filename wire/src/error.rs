//! Request failure taxonomy shared by every API client.
//!
//! ERROR HANDLING
//! ==============
//! Backends disagree on where the human-readable message lives: the Flask
//! services answer `{"error": "..."}`, the auth service answers
//! `{"detail": "..."}` (or a list of validation entries). [`RequestError::from_status`]
//! normalizes both so views only ever display `to_string()`.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use serde_json::Value;

/// Error returned by every API client call.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RequestError {
    /// The request never produced an HTTP response.
    #[error("server unreachable: {0}")]
    Network(String),
    /// The backend answered with a non-2xx status.
    #[error("{message}")]
    Status { status: u16, message: String },
    /// The response body did not match the expected shape.
    #[error("invalid response: {0}")]
    Decode(String),
    /// A 2xx reply that carries an `error` field instead of a result.
    #[error("{0}")]
    Rejected(String),
}

impl RequestError {
    /// Build a status error, pulling the message out of the response body.
    #[must_use]
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|value| body_message(&value))
            .unwrap_or_else(|| generic_status_message(status));
        Self::Status { status, message }
    }

    /// HTTP status code, when the backend answered at all.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Network(_) | Self::Decode(_) | Self::Rejected(_) => None,
        }
    }

    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}

fn body_message(value: &Value) -> Option<String> {
    if let Some(error) = value.get("error").and_then(Value::as_str) {
        return Some(error.to_owned());
    }
    match value.get("detail")? {
        Value::String(detail) => Some(detail.clone()),
        // FastAPI validation errors: [{"loc": [...], "msg": "...", ...}]
        Value::Array(items) => items
            .iter()
            .find_map(|item| item.get("msg").and_then(Value::as_str))
            .map(str::to_owned),
        _ => None,
    }
}

fn generic_status_message(status: u16) -> String {
    format!("request failed with status {status}")
}
