//! Device status snapshot.

use crate::settings::ChipSettings;
use crate::transport::REPORT_SIZE;

/// Two-part revision number.
///
/// Used for the hardware and firmware revisions reported by the Status
/// command, which arrive as pairs of ASCII characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Revision {
    /// Major component of the revision number. (x.0)
    pub major: char,
    /// Minor component of the revision number. (0.x)
    pub minor: char,
}

impl Revision {
    fn new(major: char, minor: char) -> Self {
        Self { major, minor }
    }
}

impl std::fmt::Display for Revision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Hardware and firmware revisions from one Status response.
///
/// Bytes 46-49 of the response, per table 3-2 of the datasheet.
pub(crate) fn revisions_from_buffer(buf: &[u8; REPORT_SIZE]) -> (Revision, Revision) {
    (
        Revision::new(buf[46] as char, buf[47] as char),
        Revision::new(buf[48] as char, buf[49] as char),
    )
}

/// Full identity and configuration snapshot of the device.
///
/// Composed from several transactions: the Status command for the revision
/// numbers, the three descriptor-string reads, the factory serial number
/// read, and the chip-settings read. See [`MCP2221A::status`].
///
/// [`MCP2221A::status`]: crate::MCP2221A::status
#[derive(Debug)]
pub struct DeviceStatus {
    /// MCP2221A hardware revision.
    pub hardware_revision: Revision,
    /// MCP2221A firmware revision.
    pub firmware_revision: Revision,
    /// USB manufacturer descriptor string.
    pub usb_manufacturer: String,
    /// USB product descriptor string.
    pub usb_product: String,
    /// USB serial number descriptor string.
    pub usb_serial_number: String,
    /// Factory-programmed chip serial number.
    pub factory_serial_number: String,
    /// Chip configuration settings stored in flash.
    pub chip_settings: ChipSettings,
}

impl std::fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "MCP2221A HW revision: {}", self.hardware_revision)?;
        writeln!(f, "MCP2221A Firmware revision: {}", self.firmware_revision)?;
        writeln!(f, "USB Manufacturer Descriptor String: {}", self.usb_manufacturer)?;
        writeln!(f, "USB Product Descriptor String: {}", self.usb_product)?;
        writeln!(f, "USB Serial Number Descriptor String: {}", self.usb_serial_number)?;
        writeln!(f, "Chip factory serial number: {}", self.factory_serial_number)?;
        write!(f, "{}", self.chip_settings)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn revisions_come_from_bytes_46_to_49() {
        let mut buf = [0u8; REPORT_SIZE];
        buf[46] = b'A';
        buf[47] = b'6';
        buf[48] = b'1';
        buf[49] = b'2';
        let (hardware, firmware) = revisions_from_buffer(&buf);
        assert_eq!(hardware.to_string(), "A.6");
        assert_eq!(firmware.to_string(), "1.2");
    }
}
