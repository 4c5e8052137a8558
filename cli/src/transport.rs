//! `reqwest` implementation of the wire transport.

#[cfg(test)]
#[path = "transport_test.rs"]
mod transport_test;

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::multipart::{Form, Part};
use wire::{Body, FormPart, HttpRequest, HttpResponse, Method, RequestError, Transport};

#[derive(Clone, Debug, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

fn method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Delete => reqwest::Method::DELETE,
    }
}

fn form(parts: &[FormPart]) -> Result<Form, RequestError> {
    let mut form = Form::new();
    for part in parts {
        let mut field = Part::bytes(part.bytes.clone());
        if let Some(file_name) = &part.file_name {
            field = field.file_name(file_name.clone());
        }
        if let Some(content_type) = &part.content_type {
            field = field
                .mime_str(content_type)
                .map_err(|error| RequestError::Network(error.to_string()))?;
        }
        form = form.part(part.name.clone(), field);
    }
    Ok(form)
}

#[async_trait(?Send)]
impl Transport for ReqwestTransport {
    async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, RequestError> {
        let mut builder = self.client.request(method(request.method), &request.url);
        if let Some(authorization) = request.authorization() {
            builder = builder.header(AUTHORIZATION, authorization);
        }
        builder = match &request.body {
            Body::Empty => builder,
            Body::Json(value) => builder.json(value),
            Body::Multipart(parts) => builder.multipart(form(parts)?),
        };

        tracing::debug!(method = request.method.as_str(), url = %request.url, "sending request");
        let response = builder
            .send()
            .await
            .map_err(|error| RequestError::Network(error.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|error| RequestError::Network(error.to_string()))?;
        tracing::debug!(status, url = %request.url, "response received");
        Ok(HttpResponse { status, body })
    }
}
