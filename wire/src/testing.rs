//! Test doubles for transport and credentials.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use async_trait::async_trait;

use crate::{Credentials, HttpRequest, HttpResponse, RequestError, Transport};

/// Records every request and replays queued responses (default `200 {}`).
#[derive(Default)]
pub(crate) struct RecordingTransport {
    requests: RefCell<Vec<HttpRequest>>,
    responses: RefCell<VecDeque<Result<HttpResponse, RequestError>>>,
}

impl RecordingTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn respond(self, status: u16, body: &str) -> Self {
        self.responses.borrow_mut().push_back(Ok(HttpResponse {
            status,
            body: body.to_owned(),
        }));
        self
    }

    pub(crate) fn fail(self, error: RequestError) -> Self {
        self.responses.borrow_mut().push_back(Err(error));
        self
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }

    pub(crate) fn last(&self) -> HttpRequest {
        self.requests.borrow().last().cloned().expect("no request recorded")
    }
}

#[async_trait(?Send)]
impl Transport for RecordingTransport {
    async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, RequestError> {
        self.requests.borrow_mut().push(request.clone());
        self.responses.borrow_mut().pop_front().unwrap_or_else(|| {
            Ok(HttpResponse {
                status: 200,
                body: "{}".to_owned(),
            })
        })
    }
}

#[derive(Default)]
pub(crate) struct TestCredentials {
    pub(crate) token: Option<String>,
    pub(crate) unauthorized: Cell<u32>,
}

impl TestCredentials {
    pub(crate) fn with_token(token: &str) -> Self {
        Self {
            token: Some(token.to_owned()),
            unauthorized: Cell::new(0),
        }
    }
}

impl Credentials for TestCredentials {
    fn bearer(&self) -> Option<String> {
        self.token.clone()
    }

    fn on_unauthorized(&self) {
        self.unauthorized.set(self.unauthorized.get() + 1);
    }
}
