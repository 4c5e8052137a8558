//! Braille device bridge: connectivity and the six-point cell.
//!
//! The bridge answers 200 even when the actuator refuses a command, putting
//! the reason in an `error` field; those replies become
//! [`RequestError::Rejected`].

#[cfg(test)]
#[path = "device_test.rs"]
mod device_test;

use crate::types::{CELL_POINTS, CellReply, DeviceStatus, LetterCommand, ToggleReply};
use crate::{ApiClient, ApiRequest, Backend, Credentials, RequestError, Transport};

/// State of the six cell points, index 0 = point 1.
pub type BrailleCell = [bool; CELL_POINTS];

#[must_use]
pub fn device_status_request() -> ApiRequest {
    ApiRequest::get(Backend::Device, "/api/device_status")
}

#[must_use]
pub fn cell_request() -> ApiRequest {
    ApiRequest::get(Backend::Device, "/api/estado")
}

/// `point` is zero-based.
#[must_use]
pub fn toggle_request(point: usize) -> ApiRequest {
    ApiRequest::get(Backend::Device, format!("/api/toggle/{point}"))
}

#[must_use]
pub fn clear_request() -> ApiRequest {
    ApiRequest::get(Backend::Device, "/api/clear")
}

#[must_use]
pub fn letter_request(letter: char) -> ApiRequest {
    ApiRequest::post(Backend::Device, "/api/letra").json(&LetterCommand {
        letter: letter.to_string(),
    })
}

/// Turn a cell reply into exactly six points.
///
/// # Errors
///
/// Returns [`RequestError::Rejected`] when the bridge reported an error and
/// [`RequestError::Decode`] when the point list is missing or the wrong size.
pub fn cell_from_reply(reply: CellReply) -> Result<BrailleCell, RequestError> {
    if let Some(error) = reply.error {
        return Err(RequestError::Rejected(error));
    }
    let points = reply
        .points
        .ok_or_else(|| RequestError::Decode("missing `estados`".to_owned()))?;
    BrailleCell::try_from(points.as_slice())
        .map_err(|_| RequestError::Decode(format!("expected {CELL_POINTS} points, got {}", points.len())))
}

pub struct DeviceApi<'a, T, C> {
    client: &'a ApiClient<T, C>,
}

impl<'a, T: Transport, C: Credentials> DeviceApi<'a, T, C> {
    pub(crate) fn new(client: &'a ApiClient<T, C>) -> Self {
        Self { client }
    }

    /// # Errors
    ///
    /// Propagates any [`RequestError`].
    pub async fn status(&self) -> Result<DeviceStatus, RequestError> {
        self.client.call_as(device_status_request()).await
    }

    /// # Errors
    ///
    /// See [`cell_from_reply`].
    pub async fn cell(&self) -> Result<BrailleCell, RequestError> {
        cell_from_reply(self.client.call_as(cell_request()).await?)
    }

    /// Toggle one point and return its new state as reported by the device.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::Rejected`] when the bridge refused the toggle.
    pub async fn toggle(&self, point: usize) -> Result<bool, RequestError> {
        let reply: ToggleReply = self.client.call_as(toggle_request(point)).await?;
        if let Some(error) = reply.error {
            return Err(RequestError::Rejected(error));
        }
        reply
            .point
            .ok_or_else(|| RequestError::Decode("missing `estado`".to_owned()))
    }

    /// # Errors
    ///
    /// See [`cell_from_reply`].
    pub async fn send_letter(&self, letter: char) -> Result<BrailleCell, RequestError> {
        cell_from_reply(self.client.call_as(letter_request(letter)).await?)
    }

    /// # Errors
    ///
    /// See [`cell_from_reply`].
    pub async fn clear(&self) -> Result<BrailleCell, RequestError> {
        cell_from_reply(self.client.call_as(clear_request()).await?)
    }
}
