//! Auth/core service: reachability, login, registration, personal data.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::types::{Ack, LoginForm, LoginResponse, PersonalData, Registration, UserProfile};
use crate::{ApiClient, ApiRequest, Backend, Credentials, RequestError, Transport};

#[must_use]
pub fn ping_request() -> ApiRequest {
    ApiRequest::get(Backend::Auth, "/")
}

#[must_use]
pub fn login_request(form: &LoginForm) -> ApiRequest {
    ApiRequest::post(Backend::Auth, "/login/").json(form)
}

#[must_use]
pub fn register_request(registration: &Registration) -> ApiRequest {
    ApiRequest::post(Backend::Auth, "/usuarios/").json(registration)
}

#[must_use]
pub fn personal_data_request(user_id: i64, data: &PersonalData) -> ApiRequest {
    ApiRequest::put(Backend::Auth, format!("/usuarios/{user_id}/datos-personales/")).json(data)
}

/// Rewrite the auth service's duplicate-user errors into a friendly message.
#[must_use]
pub fn friendly_registration_error(error: &RequestError) -> String {
    let message = error.to_string();
    let lowered = message.to_lowercase();
    if lowered.contains("ya registrado") || lowered.contains("already exists") || lowered.contains("already registered") {
        "That username is already taken. Choose another one.".to_owned()
    } else {
        message
    }
}

pub struct AuthApi<'a, T, C> {
    client: &'a ApiClient<T, C>,
}

impl<'a, T: Transport, C: Credentials> AuthApi<'a, T, C> {
    pub(crate) fn new(client: &'a ApiClient<T, C>) -> Self {
        Self { client }
    }

    /// `true` when the auth service answers `GET /`.
    pub async fn ping(&self) -> bool {
        self.client.reachable(ping_request()).await
    }

    /// # Errors
    ///
    /// Bad credentials come back as [`RequestError::Status`] with the
    /// service's `detail` message.
    pub async fn login(&self, form: &LoginForm) -> Result<LoginResponse, RequestError> {
        self.client.call_as(login_request(form)).await
    }

    /// # Errors
    ///
    /// Propagates any [`RequestError`]; see [`friendly_registration_error`].
    pub async fn register(&self, registration: &Registration) -> Result<UserProfile, RequestError> {
        self.client.call_as(register_request(registration)).await
    }

    /// # Errors
    ///
    /// Propagates any [`RequestError`].
    pub async fn update_personal_data(&self, user_id: i64, data: &PersonalData) -> Result<Ack, RequestError> {
        self.client.call_as(personal_data_request(user_id, data)).await
    }
}
