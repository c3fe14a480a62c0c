use clap::Parser;
use mcp2221a_config::{DescriptorString, MCP2221A};

#[derive(Debug, Parser)]
pub(crate) enum UsbCommand {
    /// Print the three USB descriptor strings.
    Read,
    /// Change the manufacturer descriptor string.
    SetManufacturer {
        /// New string (ASCII, at most 29 characters).
        value: DescriptorString,
    },
    /// Change the product descriptor string.
    SetProduct {
        /// New string (ASCII, at most 29 characters).
        value: DescriptorString,
    },
    /// Change the serial number descriptor string.
    SetSerialNumber {
        /// New string (ASCII, at most 29 characters).
        value: DescriptorString,
    },
}

pub(crate) fn action(device: &mut MCP2221A, command: UsbCommand) -> anyhow::Result<()> {
    match command {
        UsbCommand::Read => {
            println!("Manufacturer: {}", device.read_usb_manufacturer()?);
            println!("Product: {}", device.read_usb_product()?);
            println!("Serial number: {}", device.read_usb_serial_number()?);
            return Ok(());
        }
        UsbCommand::SetManufacturer { value } => device.write_usb_manufacturer(&value)?,
        UsbCommand::SetProduct { value } => device.write_usb_product(&value)?,
        UsbCommand::SetSerialNumber { value } => device.write_usb_serial_number(&value)?,
    }
    println!("Descriptor written; it takes effect after the next reset.");
    Ok(())
}
