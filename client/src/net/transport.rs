//! `gloo-net` implementation of [`wire::Transport`].
//!
//! Client-side (hydrate): real `fetch` calls. Server-side (SSR): every send
//! fails with a network error since the backends are only contacted from
//! the browser.

use async_trait::async_trait;
use wire::{HttpRequest, HttpResponse, RequestError, Transport};

#[derive(Clone, Copy, Debug, Default)]
pub struct GlooTransport;

#[async_trait(?Send)]
impl Transport for GlooTransport {
    async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, RequestError> {
        #[cfg(feature = "hydrate")]
        {
            browser::send(request).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = request;
            Err(RequestError::Network("not available on server".to_owned()))
        }
    }
}

#[cfg(feature = "hydrate")]
mod browser {
    use gloo_net::http::{Method as HttpMethod, RequestBuilder};
    use wasm_bindgen::JsValue;
    use wire::{Body, FormPart, HttpRequest, HttpResponse, Method, RequestError};

    fn network(error: impl ToString) -> RequestError {
        RequestError::Network(error.to_string())
    }

    fn js_error(value: &JsValue) -> RequestError {
        RequestError::Network(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }

    fn method(method: Method) -> HttpMethod {
        match method {
            Method::Get => HttpMethod::GET,
            Method::Post => HttpMethod::POST,
            Method::Put => HttpMethod::PUT,
            Method::Delete => HttpMethod::DELETE,
        }
    }

    fn form_data(parts: &[FormPart]) -> Result<web_sys::FormData, RequestError> {
        let form = web_sys::FormData::new().map_err(|e| js_error(&e))?;
        for part in parts {
            let chunks = js_sys::Array::new();
            chunks.push(&js_sys::Uint8Array::from(part.bytes.as_slice()));
            let options = web_sys::BlobPropertyBag::new();
            if let Some(content_type) = &part.content_type {
                options.set_type(content_type);
            }
            let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&chunks, &options)
                .map_err(|e| js_error(&e))?;
            match &part.file_name {
                Some(file_name) => form.append_with_blob_and_filename(&part.name, &blob, file_name),
                None => form.append_with_blob(&part.name, &blob),
            }
            .map_err(|e| js_error(&e))?;
        }
        Ok(form)
    }

    pub(super) async fn send(request: &HttpRequest) -> Result<HttpResponse, RequestError> {
        let mut builder = RequestBuilder::new(&request.url).method(method(request.method));
        if let Some(authorization) = request.authorization() {
            builder = builder.header("Authorization", &authorization);
        }
        let built = match &request.body {
            Body::Empty => builder.build(),
            Body::Json(value) => builder.json(value),
            // The browser sets the multipart boundary itself.
            Body::Multipart(parts) => builder.body(form_data(parts)?),
        }
        .map_err(network)?;

        let response = built.send().await.map_err(network)?;
        let status = response.status();
        let body = response.text().await.map_err(network)?;
        Ok(HttpResponse { status, body })
    }
}
