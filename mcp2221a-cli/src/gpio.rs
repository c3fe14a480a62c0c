use std::thread;
use std::time::Duration;

use clap::Parser;
use mcp2221a_config::MCP2221A;
use mcp2221a_config::gpio::{GpPin, LogicLevel, PinDirection};

#[derive(Debug, Parser)]
pub(crate) enum GpioCommand {
    /// Read the current value of every pin.
    Read {
        /// Keep polling at 50 ms intervals until interrupted.
        #[arg(long)]
        watch: bool,
    },
    /// Drive one pin as a GPIO output.
    Write {
        /// Pin number (0-3).
        #[arg(value_parser = clap::value_parser!(u8).range(0..=3))]
        pin: u8,
        /// Level to drive (0 or 1).
        #[arg(value_parser = clap::value_parser!(u8).range(0..=1))]
        level: u8,
    },
    /// Put every pin into GPIO output mode (in SRAM, until reset).
    AllOutput,
    /// Put every pin into GPIO input mode (in SRAM, until reset).
    AllInput,
}

pub(crate) fn action(device: &mut MCP2221A, command: GpioCommand) -> anyhow::Result<()> {
    match command {
        GpioCommand::Read { watch } => loop {
            let values = device.gpio_read()?;
            for pin in GpPin::ALL {
                match values.pin(pin) {
                    0xEE => println!("{pin}: not configured for GPIO"),
                    value => println!("{pin}: {value}"),
                }
            }
            if !watch {
                break;
            }
            thread::sleep(Duration::from_millis(50));
        },
        GpioCommand::Write { pin, level } => {
            let pin = GpPin::try_from(pin)?;
            device.gpio_write(pin, LogicLevel::from(level == 1))?;
        }
        GpioCommand::AllOutput => device.sram_set_all_gpio(PinDirection::Output)?,
        GpioCommand::AllInput => device.sram_set_all_gpio(PinDirection::Input)?,
    }
    Ok(())
}
