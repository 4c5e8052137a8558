//! Student service: assigned lessons and the exercise session endpoints.

#[cfg(test)]
#[path = "student_test.rs"]
mod student_test;

use crate::types::{Answer, PromptReply, SessionStarted, StartSession, StudentLesson, StudentLessons, SubmitOutcome};
use crate::{ApiClient, ApiRequest, Backend, Credentials, RequestError, Transport};

#[must_use]
pub fn student_lessons_request(student_id: i64) -> ApiRequest {
    ApiRequest::get(Backend::Student, format!("/api/student/lessons/{student_id}"))
}

#[must_use]
pub fn start_session_request(student_id: i64, lesson_id: &str) -> ApiRequest {
    ApiRequest::post(Backend::Student, "/api/student/start-session").json(&StartSession {
        student_id,
        lesson_id: lesson_id.to_owned(),
    })
}

#[must_use]
pub fn prompt_request(session_id: &str) -> ApiRequest {
    ApiRequest::get(Backend::Student, format!("/api/session_prompt/{session_id}"))
}

#[must_use]
pub fn submit_request(session_id: &str, answer: &str) -> ApiRequest {
    ApiRequest::post(Backend::Student, format!("/api/submit/{session_id}")).json(&Answer {
        answer: answer.to_owned(),
    })
}

#[must_use]
pub fn skip_request(session_id: &str) -> ApiRequest {
    ApiRequest::post(Backend::Student, format!("/api/skip/{session_id}"))
}

pub struct StudentApi<'a, T, C> {
    client: &'a ApiClient<T, C>,
}

impl<'a, T: Transport, C: Credentials> StudentApi<'a, T, C> {
    pub(crate) fn new(client: &'a ApiClient<T, C>) -> Self {
        Self { client }
    }

    /// # Errors
    ///
    /// Propagates any [`RequestError`].
    pub async fn lessons(&self, student_id: i64) -> Result<Vec<StudentLesson>, RequestError> {
        let list: StudentLessons = self.client.call_as(student_lessons_request(student_id)).await?;
        Ok(list.lessons)
    }

    /// Start (or resume) the student's session for a lesson.
    ///
    /// # Errors
    ///
    /// Propagates any [`RequestError`].
    pub async fn start_session(&self, student_id: i64, lesson_id: &str) -> Result<String, RequestError> {
        let started: SessionStarted = self.client.call_as(start_session_request(student_id, lesson_id)).await?;
        Ok(started.session_id)
    }

    /// # Errors
    ///
    /// Propagates any [`RequestError`].
    pub async fn prompt(&self, session_id: &str) -> Result<PromptReply, RequestError> {
        self.client.call_as(prompt_request(session_id)).await
    }

    /// # Errors
    ///
    /// Propagates any [`RequestError`].
    pub async fn submit(&self, session_id: &str, answer: &str) -> Result<SubmitOutcome, RequestError> {
        self.client.call_as(submit_request(session_id, answer)).await
    }

    /// # Errors
    ///
    /// Propagates any [`RequestError`].
    pub async fn skip(&self, session_id: &str) -> Result<(), RequestError> {
        self.client.call(skip_request(session_id)).await.map(|_| ())
    }
}
