//! Admin service: users, classes, enrollment, devices, CSV import.

#[cfg(test)]
#[path = "admin_test.rs"]
mod admin_test;

use serde_json::json;

use crate::types::{Ack, AdminSnapshot, ClassDetails, NewClass, NewDevice, NewUser, UserUpdate};
use crate::{ApiClient, ApiRequest, Backend, Credentials, FormPart, RequestError, Transport};

/// Multipart field name the import endpoint reads.
pub const CSV_FIELD: &str = "csv_file";

#[must_use]
pub fn snapshot_request() -> ApiRequest {
    ApiRequest::get(Backend::Admin, "/admin")
}

#[must_use]
pub fn create_user_request(user: &NewUser) -> ApiRequest {
    ApiRequest::post(Backend::Admin, "/admin/create_user").json(user)
}

#[must_use]
pub fn update_user_request(update: &UserUpdate) -> ApiRequest {
    ApiRequest::post(Backend::Admin, "/admin/update_user").json(update)
}

#[must_use]
pub fn delete_user_request(user_id: i64) -> ApiRequest {
    ApiRequest::post(Backend::Admin, "/admin/delete_user").json(&json!({ "user_id": user_id }))
}

#[must_use]
pub fn create_class_request(class: &NewClass) -> ApiRequest {
    ApiRequest::post(Backend::Admin, "/admin/create_class").json(class)
}

#[must_use]
pub fn assign_teacher_request(class_id: i64, teacher_id: Option<i64>) -> ApiRequest {
    ApiRequest::post(Backend::Admin, "/admin/assign_teacher")
        .json(&json!({ "class_id": class_id, "teacher_id": teacher_id }))
}

#[must_use]
pub fn delete_class_request(class_id: i64) -> ApiRequest {
    ApiRequest::post(Backend::Admin, "/admin/delete_class").json(&json!({ "class_id": class_id }))
}

#[must_use]
pub fn class_details_request(class_id: i64) -> ApiRequest {
    ApiRequest::get(Backend::Admin, format!("/admin/get_class_details/{class_id}"))
}

#[must_use]
pub fn add_students_request(class_id: i64, student_ids: &[i64]) -> ApiRequest {
    ApiRequest::post(Backend::Admin, "/admin/add_students_to_class")
        .json(&json!({ "class_id": class_id, "student_ids": student_ids }))
}

#[must_use]
pub fn create_device_request(device: &NewDevice) -> ApiRequest {
    ApiRequest::post(Backend::Admin, "/admin/create_device").json(device)
}

#[must_use]
pub fn import_students_request(file_name: &str, csv: Vec<u8>) -> ApiRequest {
    ApiRequest::post(Backend::Admin, "/admin/import_students")
        .multipart(vec![FormPart::file(CSV_FIELD, file_name, "text/csv", csv)])
}

pub struct AdminApi<'a, T, C> {
    client: &'a ApiClient<T, C>,
}

impl<'a, T: Transport, C: Credentials> AdminApi<'a, T, C> {
    pub(crate) fn new(client: &'a ApiClient<T, C>) -> Self {
        Self { client }
    }

    /// # Errors
    ///
    /// Propagates any [`RequestError`].
    pub async fn snapshot(&self) -> Result<AdminSnapshot, RequestError> {
        self.client.call_as(snapshot_request()).await
    }

    /// # Errors
    ///
    /// Duplicate usernames come back as [`RequestError::Status`].
    pub async fn create_user(&self, user: &NewUser) -> Result<Ack, RequestError> {
        self.client.call_as(create_user_request(user)).await
    }

    /// # Errors
    ///
    /// Propagates any [`RequestError`].
    pub async fn update_user(&self, update: &UserUpdate) -> Result<Ack, RequestError> {
        self.client.call_as(update_user_request(update)).await
    }

    /// # Errors
    ///
    /// Propagates any [`RequestError`].
    pub async fn delete_user(&self, user_id: i64) -> Result<Ack, RequestError> {
        self.client.call_as(delete_user_request(user_id)).await
    }

    /// # Errors
    ///
    /// Propagates any [`RequestError`].
    pub async fn create_class(&self, class: &NewClass) -> Result<Ack, RequestError> {
        self.client.call_as(create_class_request(class)).await
    }

    /// # Errors
    ///
    /// Propagates any [`RequestError`].
    pub async fn assign_teacher(&self, class_id: i64, teacher_id: Option<i64>) -> Result<Ack, RequestError> {
        self.client.call_as(assign_teacher_request(class_id, teacher_id)).await
    }

    /// # Errors
    ///
    /// Propagates any [`RequestError`].
    pub async fn delete_class(&self, class_id: i64) -> Result<Ack, RequestError> {
        self.client.call_as(delete_class_request(class_id)).await
    }

    /// # Errors
    ///
    /// Propagates any [`RequestError`].
    pub async fn class_details(&self, class_id: i64) -> Result<ClassDetails, RequestError> {
        self.client.call_as(class_details_request(class_id)).await
    }

    /// # Errors
    ///
    /// Propagates any [`RequestError`].
    pub async fn add_students(&self, class_id: i64, student_ids: &[i64]) -> Result<Ack, RequestError> {
        self.client.call_as(add_students_request(class_id, student_ids)).await
    }

    /// # Errors
    ///
    /// Propagates any [`RequestError`].
    pub async fn create_device(&self, device: &NewDevice) -> Result<Ack, RequestError> {
        self.client.call_as(create_device_request(device)).await
    }

    /// # Errors
    ///
    /// Propagates any [`RequestError`].
    pub async fn import_students(&self, file_name: &str, csv: Vec<u8>) -> Result<Ack, RequestError> {
        self.client.call_as(import_students_request(file_name, csv)).await
    }
}
