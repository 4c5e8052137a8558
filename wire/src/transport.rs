//! Transport seam between typed clients and a concrete HTTP stack.
//!
//! DESIGN
//! ======
//! Requests and responses are plain data. Implementations only move bytes;
//! status interpretation, auth headers, and JSON decoding stay in
//! [`crate::ApiClient`] so every transport behaves identically.

use async_trait::async_trait;
use serde_json::Value;

use crate::RequestError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

/// One part of a `multipart/form-data` body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormPart {
    pub name: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl FormPart {
    /// A file field, as sent by the CSV import form.
    #[must_use]
    pub fn file(name: &str, file_name: &str, content_type: &str, bytes: Vec<u8>) -> Self {
        Self {
            name: name.to_owned(),
            file_name: Some(file_name.to_owned()),
            content_type: Some(content_type.to_owned()),
            bytes,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum Body {
    #[default]
    Empty,
    Json(Value),
    Multipart(Vec<FormPart>),
}

/// Fully resolved request handed to a [`Transport`].
#[derive(Clone, Debug, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    /// Bearer token to send in `Authorization`, if any.
    pub bearer: Option<String>,
    pub body: Body,
}

impl HttpRequest {
    /// `Authorization` header value for this request.
    #[must_use]
    pub fn authorization(&self) -> Option<String> {
        self.bearer.as_ref().map(|token| format!("Bearer {token}"))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one request and returns the raw response.
///
/// Not `Send`: browser futures are tied to the JS event loop.
#[async_trait(?Send)]
pub trait Transport {
    /// # Errors
    ///
    /// Returns [`RequestError::Network`] when no response was received.
    async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, RequestError>;
}

#[async_trait(?Send)]
impl<T: Transport + ?Sized> Transport for &T {
    async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, RequestError> {
        (**self).send(request).await
    }
}
