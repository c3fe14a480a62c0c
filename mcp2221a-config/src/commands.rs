use crate::Error;
use crate::transport::REPORT_SIZE;

/// HID commands understood by the MCP2221A configuration interface.
pub(crate) enum Command {
    /// Poll for the status of the device.
    ///
    /// Bytes 46-49 of the response carry the hardware and firmware revision
    /// as ASCII character pairs. See section 3.1.1 of the datasheet.
    Status,
    /// Read one section of the flash configuration.
    ///
    /// The section selector goes in byte 1 of the request. See section
    /// 3.1.2 of the datasheet.
    ///
    /// Flash settings determine power-up values; the chip copies them into
    /// SRAM at reset. See section 1.4.3.
    ReadFlash(FlashSection),
    /// Write one section of the flash configuration.
    ///
    /// See section 3.1.3 of the datasheet. The chip settings section is
    /// deliberately absent: it carries the security and password fields,
    /// and a bad write can lock the chip for good.
    WriteFlash(FlashWriteSection),
    /// Change GPIO pin output values and directions.
    ///
    /// See section 3.1.11 of the datasheet.
    SetGpioOutputValues,
    /// Retrieve the current GPIO pin values.
    ///
    /// See section 3.1.12 of the datasheet.
    GetGpioValues,
    /// Configure the run-time chip and GP pin settings.
    ///
    /// See section 3.1.13 of the datasheet.
    SetSramSettings,
    /// Retrieve the run-time chip and GP pin settings.
    ///
    /// See section 3.1.14 of the datasheet.
    GetSramSettings,
    /// Force a reset of the device.
    ///
    /// See section 3.1.15 of the datasheet. The request carries a magic
    /// byte sequence so that a stray report cannot reset the chip, and the
    /// device re-enumerates instead of responding.
    ResetChip,
}

/// Sections of the flash configuration that can be read.
#[derive(Clone, Copy)]
pub(crate) enum FlashSection {
    /// Chip configuration power-up settings.
    ChipSettings,
    /// GP pin power-up settings.
    GpSettings,
    /// USB manufacturer string descriptor used during USB enumeration.
    UsbManufacturer,
    /// USB product string descriptor used during USB enumeration.
    UsbProduct,
    /// USB serial number string descriptor used during USB enumeration.
    UsbSerialNumber,
    /// Factory-programmed serial number. Read-only.
    FactorySerialNumber,
}

/// Sections of the flash configuration that can be written.
#[derive(Clone, Copy)]
pub(crate) enum FlashWriteSection {
    /// GP pin power-up settings.
    GpSettings,
    /// USB manufacturer string descriptor.
    UsbManufacturer,
    /// USB product string descriptor.
    UsbProduct,
    /// USB serial number string descriptor.
    UsbSerialNumber,
}

impl Command {
    /// Command prefix to be applied to the buffer sent to the MCP2221A.
    ///
    /// In most cases this just writes the command code to byte 0 of the
    /// outgoing buffer. The flash commands have a section selector in
    /// byte 1, and Reset Chip is four bytes in total.
    fn buffer_prefix(&self) -> &[u8] {
        match self {
            Command::Status => &[0x10],
            Command::ReadFlash(section) => match section {
                FlashSection::ChipSettings => &[0xB0, 0x00],
                FlashSection::GpSettings => &[0xB0, 0x01],
                FlashSection::UsbManufacturer => &[0xB0, 0x02],
                FlashSection::UsbProduct => &[0xB0, 0x03],
                FlashSection::UsbSerialNumber => &[0xB0, 0x04],
                FlashSection::FactorySerialNumber => &[0xB0, 0x05],
            },
            Command::WriteFlash(section) => match section {
                FlashWriteSection::GpSettings => &[0xB1, 0x01],
                FlashWriteSection::UsbManufacturer => &[0xB1, 0x02],
                FlashWriteSection::UsbProduct => &[0xB1, 0x03],
                FlashWriteSection::UsbSerialNumber => &[0xB1, 0x04],
            },
            Command::SetGpioOutputValues => &[0x50],
            Command::GetGpioValues => &[0x51],
            Command::SetSramSettings => &[0x60],
            Command::GetSramSettings => &[0x61],
            Command::ResetChip => &[0x70, 0xAB, 0xCD, 0xEF],
        }
    }

    /// Returns true if the command has no response buffer to read.
    fn has_no_response(&self) -> bool {
        matches!(self, Self::ResetChip)
    }

    /// Check the status byte (byte 1) of a response.
    ///
    /// The commands do not agree on how failure is reported. Flash reads
    /// require an explicit success code; flash writes only define the two
    /// rejection codes; Get GPIO Values and Set SRAM Settings must succeed
    /// outright. Status and Get SRAM Settings carry no meaningful status
    /// byte, and Set GPIO Output Values reports failure through per-pin
    /// marker bytes that the caller checks instead.
    fn check_response_status(&self, response: &[u8; REPORT_SIZE]) -> Result<(), Error> {
        match self {
            Command::ReadFlash(_) => match response[1] {
                0x00 => Ok(()),
                0x02 => Err(Error::CommandNotSupported),
                0x03 => Err(Error::CommandNotAllowed),
                code => Err(Error::CommandFailed(code)),
            },
            Command::WriteFlash(_) => match response[1] {
                0x02 => Err(Error::CommandNotSupported),
                0x03 => Err(Error::CommandNotAllowed),
                _ => Ok(()),
            },
            Command::GetGpioValues | Command::SetSramSettings => match response[1] {
                0x00 => Ok(()),
                code => Err(Error::CommandFailed(code)),
            },
            _ => Ok(()),
        }
    }
}

/// One outgoing report and the command it carries.
///
/// The buffer is sized to match the report tables in the datasheet. Byte 0
/// is always the command code; the flash commands put their section selector
/// in byte 1, and everything else is payload at command-specific offsets.
pub(crate) struct Report {
    /// Underlying HID command.
    command: Command,
    /// Outgoing buffer, zero-filled apart from the command prefix.
    pub(crate) write_buffer: [u8; REPORT_SIZE],
}

impl Report {
    pub(crate) fn new(command: Command) -> Self {
        let mut buffer = [0u8; REPORT_SIZE];
        let prefix = command.buffer_prefix();
        buffer[..prefix.len()].copy_from_slice(prefix);
        Self {
            command,
            write_buffer: buffer,
        }
    }

    /// The command code in byte 0, echoed by the device in its response.
    pub(crate) fn command_code(&self) -> u8 {
        self.write_buffer[0]
    }

    /// Returns true if the command has no response buffer to read.
    pub(crate) fn has_no_response(&self) -> bool {
        self.command.has_no_response()
    }

    /// Check the status byte of the paired response.
    pub(crate) fn check_response_status(&self, response: &[u8; REPORT_SIZE]) -> Result<(), Error> {
        self.command.check_response_status(response)
    }

    /// Write a single data byte in the outgoing report.
    ///
    /// The command code at index 0 cannot be overwritten with this method.
    pub(crate) fn set_data_byte(&mut self, byte_index: usize, value: u8) {
        assert!(byte_index < REPORT_SIZE, "Byte index {byte_index} too large.");
        assert!(byte_index != 0, "Cannot write to command byte index.");
        self.write_buffer[byte_index] = value;
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn flash_read_request_carries_section_selector() {
        let report = Report::new(Command::ReadFlash(FlashSection::FactorySerialNumber));
        assert_eq!(report.write_buffer[0], 0xB0);
        assert_eq!(report.write_buffer[1], 0x05);
        assert!(report.write_buffer[2..].iter().all(|&b| b == 0));
    }

    #[test]
    fn reset_request_carries_magic_sequence() {
        let report = Report::new(Command::ResetChip);
        assert_eq!(report.write_buffer[..4], [0x70, 0xAB, 0xCD, 0xEF]);
        assert!(report.has_no_response());
    }

    #[test]
    fn status_request_is_opcode_then_zeros() {
        let report = Report::new(Command::Status);
        assert_eq!(report.write_buffer[0], 0x10);
        assert!(report.write_buffer[1..].iter().all(|&b| b == 0));
    }

    #[test]
    fn flash_write_only_rejection_codes_are_errors() {
        let command = Command::WriteFlash(FlashWriteSection::UsbProduct);
        let mut response = [0u8; REPORT_SIZE];
        response[0] = 0xB1;

        response[1] = 0x02;
        assert!(matches!(
            command.check_response_status(&response),
            Err(Error::CommandNotSupported)
        ));
        response[1] = 0x03;
        assert!(matches!(
            command.check_response_status(&response),
            Err(Error::CommandNotAllowed)
        ));
        response[1] = 0x00;
        assert!(command.check_response_status(&response).is_ok());
    }

    #[test]
    fn flash_read_requires_explicit_success() {
        let command = Command::ReadFlash(FlashSection::ChipSettings);
        let mut response = [0u8; REPORT_SIZE];
        response[0] = 0xB0;
        response[1] = 0x41;
        assert!(matches!(
            command.check_response_status(&response),
            Err(Error::CommandFailed(0x41))
        ));
    }
}
