use std::thread;

use clap::{Parser, ValueEnum};
use mcp2221a_config::gpio::{GpPin, LogicLevel, PinDirection};
use mcp2221a_config::settings::GpPinSettings;
use mcp2221a_config::{MCP2221A, RESET_POWER_UP_DELAY};

#[derive(Debug, Parser)]
pub(crate) enum FlashCommand {
    /// Show the power-up GP pin settings.
    ReadGp,
    /// Change the power-up settings for one pin.
    ///
    /// The current settings are read first, so the other pins keep theirs.
    SetGp {
        /// Pin number (0-3).
        #[arg(value_parser = clap::value_parser!(u8).range(0..=3))]
        pin: u8,
        /// 3-bit pin function code; 0 selects GPIO operation.
        #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=7))]
        designation: u8,
        /// GPIO direction at power-up.
        #[arg(long, value_enum, default_value = "output")]
        direction: Direction,
        /// Output level at power-up.
        #[arg(long, value_enum, default_value = "low")]
        level: Level,
        /// Reset the device afterwards and read the settings back.
        #[arg(long)]
        reset: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub(crate) enum Direction {
    Output,
    Input,
}

impl From<Direction> for PinDirection {
    fn from(value: Direction) -> Self {
        match value {
            Direction::Output => PinDirection::Output,
            Direction::Input => PinDirection::Input,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub(crate) enum Level {
    Low,
    High,
}

impl From<Level> for LogicLevel {
    fn from(value: Level) -> Self {
        match value {
            Level::Low => LogicLevel::Low,
            Level::High => LogicLevel::High,
        }
    }
}

pub(crate) fn action(
    mut device: MCP2221A,
    (vid, pid): (u16, u16),
    command: FlashCommand,
) -> anyhow::Result<()> {
    match command {
        FlashCommand::ReadGp => print_gp_settings(&mut device)?,
        FlashCommand::SetGp {
            pin,
            designation,
            direction,
            level,
            reset,
        } => {
            let pin = GpPin::try_from(pin)?;
            let mut settings = device.flash_read_gp_settings()?;
            *settings.pin_mut(pin) = GpPinSettings {
                designation,
                direction: direction.into(),
                output_value: level.into(),
            };
            device.flash_write_gp_settings(settings)?;
            if reset {
                log::debug!("resetting device to apply flash settings");
                device.reset()?;
                thread::sleep(RESET_POWER_UP_DELAY);
                let mut device = MCP2221A::connect_with_vid_and_pid(vid, pid)?;
                print_gp_settings(&mut device)?;
            } else {
                println!("Settings written; they take effect after the next reset.");
            }
        }
    }
    Ok(())
}

fn print_gp_settings(device: &mut MCP2221A) -> anyhow::Result<()> {
    let settings = device.flash_read_gp_settings()?;
    for pin in GpPin::ALL {
        println!("{pin}: {}", settings.pin(pin));
    }
    Ok(())
}
