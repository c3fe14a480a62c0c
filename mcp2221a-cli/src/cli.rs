use crate::flash::FlashCommand;
use crate::gpio::GpioCommand;
use crate::usb::UsbCommand;
use crate::util;

use clap::Parser;

/// CLI for the MCP2221A USB configuration interface
///
/// Reads and writes the flash configuration of the Microchip MCP2221A
/// (USB descriptor strings and GP pin power-up settings), drives and
/// samples the GP pins as GPIO, shows the live SRAM pin configuration,
/// and resets the chip.
///
/// Flash settings only take effect after a reset; the gpio and sram
/// commands work on the volatile run-time state instead.
#[derive(Debug, Parser)]
#[command(version, about)]
pub(crate) struct Cli {
    /// Device vendor ID in hexadecimal
    #[arg(short, long = "vid", default_value = "0x4D8", value_parser = util::from_hex)]
    pub(crate) vid: u16,
    /// Device product ID in hexadecimal
    #[arg(short, long = "pid", default_value = "0xDD", value_parser = util::from_hex)]
    pub(crate) pid: u16,
    #[command(subcommand)]
    pub(crate) command: Commands,
}

#[derive(Debug, Parser)]
pub(crate) enum Commands {
    /// Read the full device status snapshot.
    Status,
    /// Read or drive the GPIO pins.
    #[command(subcommand)]
    Gpio(GpioCommand),
    /// Read or change the USB descriptor strings stored in flash.
    #[command(subcommand)]
    Usb(UsbCommand),
    /// Read or change the power-up GP pin settings stored in flash.
    #[command(subcommand)]
    Flash(FlashCommand),
    /// Show the live GP pin configuration held in SRAM.
    Sram,
    /// Reset the MCP2221A.
    Reset,
}
