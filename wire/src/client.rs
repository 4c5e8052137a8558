//! Generic API client applying the shared auth policy.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every typed client in [`crate::api`] funnels through [`ApiClient::call`].
//! That is the only place that attaches `Authorization`, interprets status
//! codes, and decodes bodies.
//!
//! ERROR HANDLING
//! ==============
//! A 401 on a request that carried a bearer token means the stored session is
//! no longer accepted: [`Credentials::on_unauthorized`] runs (clear storage,
//! send the user to login) and the error is still returned to the caller. A
//! 401 on an anonymous request (bad login) is an ordinary error.

#[cfg(test)]
#[path = "client_test.rs"]
mod client_test;

use std::rc::Rc;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::api::{AdminApi, AuthApi, DeviceApi, StudentApi, TeacherApi};
use crate::{Backend, Body, Endpoints, FormPart, HttpRequest, Method, RequestError, Transport};

/// Source of the bearer token and sink for re-authentication events.
pub trait Credentials {
    /// Token to send, or `None` when no session exists.
    fn bearer(&self) -> Option<String>;

    /// Called after an authenticated request was rejected with 401.
    fn on_unauthorized(&self);
}

/// Credentials for anonymous use: never sends a token.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoCredentials;

impl Credentials for NoCredentials {
    fn bearer(&self) -> Option<String> {
        None
    }

    fn on_unauthorized(&self) {}
}

impl<C: Credentials + ?Sized> Credentials for &C {
    fn bearer(&self) -> Option<String> {
        (**self).bearer()
    }

    fn on_unauthorized(&self) {
        (**self).on_unauthorized();
    }
}

impl<C: Credentials + ?Sized> Credentials for Rc<C> {
    fn bearer(&self) -> Option<String> {
        (**self).bearer()
    }

    fn on_unauthorized(&self) {
        (**self).on_unauthorized();
    }
}

impl<C: Credentials + ?Sized> Credentials for Arc<C> {
    fn bearer(&self) -> Option<String> {
        (**self).bearer()
    }

    fn on_unauthorized(&self) {
        (**self).on_unauthorized();
    }
}

/// Backend-relative request built by a typed client.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub backend: Backend,
    pub method: Method,
    pub path: String,
    pub body: Body,
}

impl ApiRequest {
    #[must_use]
    pub fn new(backend: Backend, method: Method, path: impl Into<String>) -> Self {
        Self {
            backend,
            method,
            path: path.into(),
            body: Body::Empty,
        }
    }

    #[must_use]
    pub fn get(backend: Backend, path: impl Into<String>) -> Self {
        Self::new(backend, Method::Get, path)
    }

    #[must_use]
    pub fn post(backend: Backend, path: impl Into<String>) -> Self {
        Self::new(backend, Method::Post, path)
    }

    #[must_use]
    pub fn put(backend: Backend, path: impl Into<String>) -> Self {
        Self::new(backend, Method::Put, path)
    }

    #[must_use]
    pub fn delete(backend: Backend, path: impl Into<String>) -> Self {
        Self::new(backend, Method::Delete, path)
    }

    /// Attach a JSON body. Serialization of the crate's payload types cannot
    /// fail; anything else degrades to `null`.
    #[must_use]
    pub fn json<B: Serialize>(mut self, body: &B) -> Self {
        self.body = Body::Json(serde_json::to_value(body).unwrap_or(Value::Null));
        self
    }

    #[must_use]
    pub fn multipart(mut self, parts: Vec<FormPart>) -> Self {
        self.body = Body::Multipart(parts);
        self
    }

    /// JSON body, if one is attached.
    #[must_use]
    pub fn json_body(&self) -> Option<&Value> {
        match &self.body {
            Body::Json(value) => Some(value),
            Body::Empty | Body::Multipart(_) => None,
        }
    }
}

/// Transport + credentials + endpoints, shared by all typed clients.
#[derive(Clone, Debug)]
pub struct ApiClient<T, C> {
    transport: T,
    credentials: C,
    endpoints: Endpoints,
}

impl<T: Transport, C: Credentials> ApiClient<T, C> {
    pub fn new(transport: T, credentials: C, endpoints: Endpoints) -> Self {
        Self {
            transport,
            credentials,
            endpoints,
        }
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn credentials(&self) -> &C {
        &self.credentials
    }

    /// Resolve a backend-relative request against the endpoints and the
    /// current session.
    pub fn prepare(&self, request: ApiRequest) -> HttpRequest {
        HttpRequest {
            method: request.method,
            url: self.endpoints.url(request.backend, &request.path),
            bearer: self.credentials.bearer(),
            body: request.body,
        }
    }

    /// Send a request and return the parsed JSON body (`null` when empty).
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::Network`] when the backend is unreachable,
    /// [`RequestError::Status`] for non-2xx responses, and
    /// [`RequestError::Decode`] when a 2xx body is not JSON.
    pub async fn call(&self, request: ApiRequest) -> Result<Value, RequestError> {
        let http = self.prepare(request);
        let response = self.transport.send(&http).await?;

        if !response.is_success() {
            if response.status == 401 && http.bearer.is_some() {
                self.credentials.on_unauthorized();
            }
            return Err(RequestError::from_status(response.status, &response.body));
        }

        if response.body.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&response.body).map_err(|e| RequestError::Decode(e.to_string()))
    }

    /// Like [`Self::call`] but decodes into `R`.
    ///
    /// # Errors
    ///
    /// Same as [`Self::call`], plus [`RequestError::Decode`] when the JSON does
    /// not match `R`.
    pub async fn call_as<R: DeserializeOwned>(&self, request: ApiRequest) -> Result<R, RequestError> {
        let value = self.call(request).await?;
        serde_json::from_value(value).map_err(|e| RequestError::Decode(e.to_string()))
    }

    /// Returns `true` when the backend answers 2xx at all.
    pub async fn reachable(&self, request: ApiRequest) -> bool {
        let http = self.prepare(request);
        matches!(self.transport.send(&http).await, Ok(response) if response.is_success())
    }

    pub fn auth(&self) -> AuthApi<'_, T, C> {
        AuthApi::new(self)
    }

    pub fn admin(&self) -> AdminApi<'_, T, C> {
        AdminApi::new(self)
    }

    pub fn teacher(&self) -> TeacherApi<'_, T, C> {
        TeacherApi::new(self)
    }

    pub fn student(&self) -> StudentApi<'_, T, C> {
        StudentApi::new(self)
    }

    pub fn device(&self) -> DeviceApi<'_, T, C> {
        DeviceApi::new(self)
    }
}
