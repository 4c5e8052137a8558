//! Braille device panel state.
//!
//! SYSTEM CONTEXT
//! ==============
//! The device bridge owns the truth about the six actuator points. The panel
//! only mirrors what the bridge last reported: after a status check, after a
//! cell read, and after every command reply. Nothing is flipped locally
//! before the device confirms it.
//!
//! Commands are refused while the last status check said the device is
//! offline. Refresh is always allowed since it is how the panel finds out
//! the device came back.

#[cfg(test)]
#[path = "device_test.rs"]
mod device_test;

use std::time::Duration;

use wire::RequestError;
use wire::api::BrailleCell;
use wire::types::{CELL_POINTS, DeviceStatus};

use crate::validate::{self, ValidationError};

/// Screen order of the cell: left column (1, 2, 3) beside right column
/// (4, 5, 6), laid out row by row.
pub const VISUAL_ORDER: [usize; CELL_POINTS] = [0, 3, 1, 4, 2, 5];

pub const POLL_INTERVAL: Duration = Duration::from_secs(30);

/// What a key press on the panel asks for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    /// Zero-based point index.
    Toggle(usize),
    SendLetter,
    Clear,
    Refresh,
}

/// Map a `KeyboardEvent.key` value to a panel action.
#[must_use]
pub fn key_action(key: &str) -> Option<KeyAction> {
    match key {
        "Enter" => Some(KeyAction::SendLetter),
        "Escape" => Some(KeyAction::Clear),
        "r" | "R" => Some(KeyAction::Refresh),
        _ => {
            let mut chars = key.chars();
            let digit = chars.next()?.to_digit(10)?;
            if chars.next().is_some() {
                return None;
            }
            let number = usize::try_from(digit).ok()?;
            validate::point(number).ok().map(KeyAction::Toggle)
        }
    }
}

/// A command accepted by the panel, ready to send to the bridge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanelCommand {
    Toggle(usize),
    SendLetter(char),
    Clear,
    Refresh,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DevicePanel {
    points: BrailleCell,
    status: Option<DeviceStatus>,
    letter: String,
    checking: bool,
    busy: bool,
    error: Option<String>,
}

impl DevicePanel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn points(&self) -> BrailleCell {
        self.points
    }

    pub fn is_connected(&self) -> bool {
        self.status.as_ref().is_some_and(|status| status.connected)
    }

    pub fn latency_ms(&self) -> Option<f64> {
        self.status.as_ref().and_then(|status| status.latency_ms)
    }

    pub fn letter(&self) -> &str {
        &self.letter
    }

    pub fn set_letter(&mut self, input: impl Into<String>) {
        self.letter = input.into().to_uppercase();
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    // ---- status polling ----

    /// Claim the single status-check slot. `false` while one is in flight.
    pub fn begin_status_check(&mut self) -> bool {
        if self.checking {
            return false;
        }
        self.checking = true;
        true
    }

    /// Record a status reply. Returns `true` when the cell should be read.
    pub fn apply_status(&mut self, status: DeviceStatus) -> bool {
        self.checking = false;
        let connected = status.connected;
        self.status = Some(status);
        connected
    }

    /// The bridge itself could not be reached.
    pub fn status_failed(&mut self, error: &RequestError) {
        self.checking = false;
        self.status = Some(DeviceStatus {
            connected: false,
            latency_ms: None,
            error: Some(error.to_string()),
        });
    }

    // ---- commands ----

    /// Validate a key action against the current state.
    ///
    /// # Errors
    ///
    /// See [`Self::command`].
    pub fn key_command(&self, action: KeyAction) -> Result<PanelCommand, ValidationError> {
        match action {
            KeyAction::Toggle(point) => self.command(PanelCommand::Toggle(point)),
            KeyAction::SendLetter => self.letter_command(),
            KeyAction::Clear => self.command(PanelCommand::Clear),
            KeyAction::Refresh => self.command(PanelCommand::Refresh),
        }
    }

    /// Validate the letter field and turn it into a send command.
    ///
    /// # Errors
    ///
    /// [`ValidationError::DeviceOffline`] first, then
    /// [`ValidationError::InvalidLetter`].
    pub fn letter_command(&self) -> Result<PanelCommand, ValidationError> {
        self.ensure_connected()?;
        validate::letter(&self.letter).map(PanelCommand::SendLetter)
    }

    /// # Errors
    ///
    /// Returns [`ValidationError::DeviceOffline`] for anything but refresh
    /// while disconnected, and [`ValidationError::InvalidPoint`] for an index
    /// outside the cell.
    pub fn command(&self, command: PanelCommand) -> Result<PanelCommand, ValidationError> {
        match command {
            PanelCommand::Refresh => return Ok(command),
            PanelCommand::Toggle(point) if point >= CELL_POINTS => return Err(ValidationError::InvalidPoint),
            PanelCommand::SendLetter(letter) => {
                validate::letter(&letter.to_string())?;
            }
            PanelCommand::Toggle(_) | PanelCommand::Clear => {}
        }
        self.ensure_connected()?;
        Ok(command)
    }

    fn ensure_connected(&self) -> Result<(), ValidationError> {
        if self.is_connected() {
            Ok(())
        } else {
            Err(ValidationError::DeviceOffline)
        }
    }

    pub fn begin_command(&mut self) {
        self.busy = true;
        self.error = None;
    }

    /// Mirror the whole cell as reported by the device.
    pub fn apply_cell(&mut self, points: BrailleCell) {
        self.busy = false;
        self.points = points;
    }

    /// Mirror one toggled point. `point` is zero-based.
    pub fn apply_toggle(&mut self, point: usize, state: bool) {
        self.busy = false;
        if let Some(slot) = self.points.get_mut(point) {
            *slot = state;
        }
    }

    /// The letter reached the device: mirror its cell and clear the field.
    pub fn apply_letter(&mut self, points: BrailleCell) {
        self.apply_cell(points);
        self.letter.clear();
    }

    pub fn command_failed(&mut self, error: &RequestError) {
        self.busy = false;
        self.error = Some(error.to_string());
    }

    // ---- display ----

    /// One-based numbers of the raised points.
    pub fn active_points(&self) -> Vec<usize> {
        self.points
            .iter()
            .enumerate()
            .filter(|(_, raised)| **raised)
            .map(|(index, _)| index + 1)
            .collect()
    }

    pub fn active_points_label(&self) -> String {
        let active = self.active_points();
        if active.is_empty() {
            return "Active points: none".to_owned();
        }
        let list = active.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ");
        format!("Active points: {list}")
    }

    pub fn status_label(&self) -> String {
        match &self.status {
            None => "Checking connection...".to_owned(),
            Some(status) if status.connected => match status.latency_ms {
                Some(ms) => format!("Connected - {ms:.0}ms"),
                None => "Connected".to_owned(),
            },
            Some(status) => format!(
                "Disconnected - {}",
                status.error.as_deref().unwrap_or("connection error")
            ),
        }
    }

    /// `(point index, raised)` pairs in screen order.
    pub fn visual_cells(&self) -> [(usize, bool); CELL_POINTS] {
        VISUAL_ORDER.map(|index| (index, self.points[index]))
    }
}
