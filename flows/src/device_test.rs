use wire::RequestError;
use wire::types::DeviceStatus;

use super::*;

fn online(ms: f64) -> DeviceStatus {
    DeviceStatus {
        connected: true,
        latency_ms: Some(ms),
        error: None,
    }
}

fn connected_panel() -> DevicePanel {
    let mut panel = DevicePanel::new();
    assert!(panel.begin_status_check());
    assert!(panel.apply_status(online(12.4)));
    panel
}

#[test]
fn keys_map_to_actions() {
    assert_eq!(key_action("1"), Some(KeyAction::Toggle(0)));
    assert_eq!(key_action("6"), Some(KeyAction::Toggle(5)));
    assert_eq!(key_action("7"), None);
    assert_eq!(key_action("0"), None);
    assert_eq!(key_action("12"), None);
    assert_eq!(key_action("Enter"), Some(KeyAction::SendLetter));
    assert_eq!(key_action("Escape"), Some(KeyAction::Clear));
    assert_eq!(key_action("r"), Some(KeyAction::Refresh));
    assert_eq!(key_action("R"), Some(KeyAction::Refresh));
    assert_eq!(key_action("x"), None);
}

#[test]
fn visual_order_is_two_columns_of_three() {
    let mut panel = connected_panel();
    panel.apply_cell([true, false, false, true, false, false]);
    let order: Vec<usize> = panel.visual_cells().iter().map(|(i, _)| *i).collect();
    assert_eq!(order, [0, 3, 1, 4, 2, 5]);
    assert_eq!(panel.visual_cells()[1], (3, true));
}

#[test]
fn only_one_status_check_in_flight() {
    let mut panel = DevicePanel::new();
    assert!(panel.begin_status_check());
    assert!(!panel.begin_status_check());
    panel.status_failed(&RequestError::Network("refused".to_owned()));
    assert!(panel.begin_status_check());
}

#[test]
fn commands_refused_while_disconnected() {
    let mut panel = DevicePanel::new();
    assert_eq!(panel.command(PanelCommand::Clear), Err(ValidationError::DeviceOffline));

    panel.apply_status(DeviceStatus {
        connected: false,
        latency_ms: None,
        error: Some("timeout".to_owned()),
    });
    assert_eq!(
        panel.key_command(KeyAction::Toggle(2)),
        Err(ValidationError::DeviceOffline)
    );
    panel.set_letter("a");
    assert_eq!(panel.letter_command(), Err(ValidationError::DeviceOffline));
    assert_eq!(panel.command(PanelCommand::Refresh), Ok(PanelCommand::Refresh));
}

#[test]
fn letter_must_be_a_to_z() {
    let mut panel = connected_panel();
    panel.set_letter(" b ");
    assert_eq!(panel.letter_command(), Ok(PanelCommand::SendLetter('B')));
    panel.set_letter("7");
    assert_eq!(panel.letter_command(), Err(ValidationError::InvalidLetter));
    panel.set_letter("");
    assert_eq!(
        panel.key_command(KeyAction::SendLetter),
        Err(ValidationError::InvalidLetter)
    );
}

#[test]
fn replies_are_mirrored_not_predicted() {
    let mut panel = connected_panel();
    assert_eq!(panel.command(PanelCommand::Toggle(3)), Ok(PanelCommand::Toggle(3)));
    panel.begin_command();
    assert_eq!(panel.points(), [false; 6]);
    panel.apply_toggle(3, true);
    assert_eq!(panel.points(), [false, false, false, true, false, false]);
    panel.apply_toggle(3, false);
    assert_eq!(panel.points(), [false; 6]);
    assert!(!panel.is_busy());
}

#[test]
fn letter_reply_replaces_cell_and_clears_field() {
    let mut panel = connected_panel();
    panel.set_letter("c");
    assert_eq!(panel.letter(), "C");
    panel.apply_letter([true, false, false, true, false, false]);
    assert_eq!(panel.letter(), "");
    assert_eq!(panel.active_points_label(), "Active points: 1, 4");
}

#[test]
fn failed_command_keeps_points() {
    let mut panel = connected_panel();
    panel.apply_cell([true, true, false, false, false, false]);
    panel.begin_command();
    panel.command_failed(&RequestError::Rejected("ESP32 not responding".to_owned()));
    assert_eq!(panel.points(), [true, true, false, false, false, false]);
    assert_eq!(panel.error(), Some("ESP32 not responding"));
}

#[test]
fn labels() {
    let mut panel = DevicePanel::new();
    assert_eq!(panel.status_label(), "Checking connection...");
    assert_eq!(panel.active_points_label(), "Active points: none");

    panel.apply_status(online(12.4));
    assert_eq!(panel.status_label(), "Connected - 12ms");

    panel.status_failed(&RequestError::Network("refused".to_owned()));
    assert_eq!(panel.status_label(), "Disconnected - server unreachable: refused");
    assert!(!panel.is_connected());
}

#[test]
fn toggle_index_outside_cell_is_rejected() {
    let panel = connected_panel();
    assert_eq!(panel.command(PanelCommand::Toggle(6)), Err(ValidationError::InvalidPoint));
}
