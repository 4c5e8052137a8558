//! Teacher service: dashboard, classes, student progress, lesson authoring.

#[cfg(test)]
#[path = "teacher_test.rs"]
mod teacher_test;

use crate::types::{
    Ack, ClassRoster, LessonAssignment, LessonCreated, LessonDetail, LessonDraft, LessonList, LessonSummary,
    StudentDetail, TeacherClasses, TeacherDashboard,
};
use crate::{ApiClient, ApiRequest, Backend, Credentials, RequestError, Transport};

#[must_use]
pub fn dashboard_request() -> ApiRequest {
    ApiRequest::get(Backend::Teacher, "/api/teacher/dashboard")
}

#[must_use]
pub fn classes_request(teacher_id: i64) -> ApiRequest {
    ApiRequest::get(Backend::Teacher, format!("/api/teacher/classes/{teacher_id}"))
}

#[must_use]
pub fn class_students_request(class_id: i64) -> ApiRequest {
    ApiRequest::get(Backend::Teacher, format!("/api/teacher/class/{class_id}/students"))
}

#[must_use]
pub fn student_detail_request(student_id: i64) -> ApiRequest {
    ApiRequest::get(Backend::Teacher, format!("/api/teacher/student/{student_id}"))
}

#[must_use]
pub fn lessons_request() -> ApiRequest {
    ApiRequest::get(Backend::Teacher, "/api/teacher/lessons")
}

#[must_use]
pub fn create_lesson_request(draft: &LessonDraft) -> ApiRequest {
    ApiRequest::post(Backend::Teacher, "/api/teacher/lessons").json(draft)
}

#[must_use]
pub fn lesson_request(lesson_id: &str) -> ApiRequest {
    ApiRequest::get(Backend::Teacher, lesson_path(lesson_id))
}

#[must_use]
pub fn update_lesson_request(lesson_id: &str, draft: &LessonDraft) -> ApiRequest {
    ApiRequest::put(Backend::Teacher, lesson_path(lesson_id)).json(draft)
}

#[must_use]
pub fn delete_lesson_request(lesson_id: &str) -> ApiRequest {
    ApiRequest::delete(Backend::Teacher, lesson_path(lesson_id))
}

#[must_use]
pub fn assign_lesson_request(lesson_id: &str, assignment: &LessonAssignment) -> ApiRequest {
    ApiRequest::post(Backend::Teacher, format!("{}/assign-to-class", lesson_path(lesson_id))).json(assignment)
}

fn lesson_path(lesson_id: &str) -> String {
    format!("/api/teacher/lesson/{lesson_id}")
}

pub struct TeacherApi<'a, T, C> {
    client: &'a ApiClient<T, C>,
}

impl<'a, T: Transport, C: Credentials> TeacherApi<'a, T, C> {
    pub(crate) fn new(client: &'a ApiClient<T, C>) -> Self {
        Self { client }
    }

    /// # Errors
    ///
    /// Propagates any [`RequestError`].
    pub async fn dashboard(&self) -> Result<TeacherDashboard, RequestError> {
        self.client.call_as(dashboard_request()).await
    }

    /// # Errors
    ///
    /// Propagates any [`RequestError`].
    pub async fn classes(&self, teacher_id: i64) -> Result<TeacherClasses, RequestError> {
        self.client.call_as(classes_request(teacher_id)).await
    }

    /// # Errors
    ///
    /// Propagates any [`RequestError`].
    pub async fn class_students(&self, class_id: i64) -> Result<ClassRoster, RequestError> {
        self.client.call_as(class_students_request(class_id)).await
    }

    /// # Errors
    ///
    /// Propagates any [`RequestError`].
    pub async fn student_detail(&self, student_id: i64) -> Result<StudentDetail, RequestError> {
        self.client.call_as(student_detail_request(student_id)).await
    }

    /// # Errors
    ///
    /// Propagates any [`RequestError`].
    pub async fn lessons(&self) -> Result<Vec<LessonSummary>, RequestError> {
        let list: LessonList = self.client.call_as(lessons_request()).await?;
        Ok(list.lessons)
    }

    /// # Errors
    ///
    /// Server-side validation failures come back as [`RequestError::Status`].
    pub async fn create_lesson(&self, draft: &LessonDraft) -> Result<LessonCreated, RequestError> {
        self.client.call_as(create_lesson_request(draft)).await
    }

    /// # Errors
    ///
    /// Propagates any [`RequestError`].
    pub async fn lesson(&self, lesson_id: &str) -> Result<LessonDetail, RequestError> {
        self.client.call_as(lesson_request(lesson_id)).await
    }

    /// # Errors
    ///
    /// Propagates any [`RequestError`].
    pub async fn update_lesson(&self, lesson_id: &str, draft: &LessonDraft) -> Result<Ack, RequestError> {
        self.client.call_as(update_lesson_request(lesson_id, draft)).await
    }

    /// # Errors
    ///
    /// Propagates any [`RequestError`].
    pub async fn delete_lesson(&self, lesson_id: &str) -> Result<Ack, RequestError> {
        self.client.call_as(delete_lesson_request(lesson_id)).await
    }

    /// # Errors
    ///
    /// Propagates any [`RequestError`].
    pub async fn assign_lesson(&self, lesson_id: &str, assignment: &LessonAssignment) -> Result<Ack, RequestError> {
        self.client.call_as(assign_lesson_request(lesson_id, assignment)).await
    }
}
