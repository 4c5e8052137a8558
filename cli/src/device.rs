//! Braille device commands.
//!
//! Each invocation checks the bridge first, so commands are refused while
//! the device is offline exactly as on the web panel. `watch` repeats the
//! check on an interval until Ctrl-C.

#[cfg(test)]
#[path = "device_test.rs"]
mod device_test;

use std::time::Duration;

use clap::Subcommand;
use flows::device::{POLL_INTERVAL, VISUAL_ORDER};
use flows::{DevicePanel, PanelCommand, Route, validate};
use wire::api::BrailleCell;
use wire::RequestError;

use crate::{Api, CliError, Context};

#[derive(Subcommand, Debug)]
pub(crate) enum DeviceCommand {
    /// Connection state and latency.
    Status,
    /// Current cell as reported by the device.
    Points,
    /// Toggle one point (1-6).
    Toggle { point: usize },
    /// Show a letter on the cell.
    Letter { letter: String },
    /// Lower every point.
    Clear,
    /// Poll the device until interrupted.
    Watch {
        /// Seconds between checks.
        #[arg(long, default_value_t = POLL_INTERVAL.as_secs())]
        interval: u64,
    },
}

/// The cell as two columns of three, raised points filled.
pub(crate) fn render_cell(points: BrailleCell) -> String {
    VISUAL_ORDER
        .chunks(2)
        .map(|row| {
            row.iter()
                .map(|&index| if points[index] { '●' } else { '○' })
                .map(String::from)
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn report(panel: &DevicePanel) {
    println!("{}", panel.status_label());
    if panel.is_connected() {
        println!("{}\n{}", render_cell(panel.points()), panel.active_points_label());
    }
    if let Some(error) = panel.error() {
        println!("Error: {error}");
    }
}

/// Status check, then a cell read when the device is connected.
async fn refresh(api: &Api<'_>, panel: &mut DevicePanel) {
    if !panel.begin_status_check() {
        return;
    }
    let connected = match api.device().status().await {
        Ok(status) => panel.apply_status(status),
        Err(error) => {
            tracing::warn!(%error, "device status check failed");
            panel.status_failed(&error);
            false
        }
    };
    if connected {
        match api.device().cell().await {
            Ok(points) => panel.apply_cell(points),
            Err(error) => panel.command_failed(&error),
        }
    }
}

async fn execute(api: &Api<'_>, panel: &mut DevicePanel, command: PanelCommand) -> Result<(), RequestError> {
    if command == PanelCommand::Refresh {
        refresh(api, panel).await;
        return Ok(());
    }
    panel.begin_command();
    let device = api.device();
    let result = match command {
        PanelCommand::Toggle(point) => device.toggle(point).await.map(|state| panel.apply_toggle(point, state)),
        PanelCommand::SendLetter(letter) => device.send_letter(letter).await.map(|points| panel.apply_letter(points)),
        PanelCommand::Clear => device.clear().await.map(|points| panel.apply_cell(points)),
        PanelCommand::Refresh => Ok(()),
    };
    if let Err(error) = &result {
        panel.command_failed(error);
    }
    result
}

async fn watch(api: &Api<'_>, panel: &mut DevicePanel, interval: Duration) -> Result<(), CliError> {
    loop {
        refresh(api, panel).await;
        report(panel);
        tokio::select! {
            () = tokio::time::sleep(interval) => println!(),
            result = tokio::signal::ctrl_c() => return result.map_err(CliError::from),
        }
    }
}

pub(crate) async fn run(ctx: &Context, command: DeviceCommand) -> Result<(), CliError> {
    ctx.require(Route::Devices)?;
    let api = ctx.api();
    let mut panel = DevicePanel::new();

    if let DeviceCommand::Watch { interval } = command {
        return watch(&api, &mut panel, Duration::from_secs(interval.max(1))).await;
    }

    refresh(&api, &mut panel).await;
    let command = match command {
        DeviceCommand::Status => {
            println!("{}", panel.status_label());
            return Ok(());
        }
        DeviceCommand::Points | DeviceCommand::Watch { .. } => {
            report(&panel);
            return Ok(());
        }
        DeviceCommand::Toggle { point } => panel.command(PanelCommand::Toggle(validate::point(point)?))?,
        DeviceCommand::Letter { letter } => {
            panel.set_letter(letter);
            panel.letter_command()?
        }
        DeviceCommand::Clear => panel.command(PanelCommand::Clear)?,
    };
    execute(&api, &mut panel, command).await?;
    report(&panel);
    Ok(())
}
