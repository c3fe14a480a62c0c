use thiserror::Error;

use crate::gpio::GpPin;

/// Wrapper for problems when communicating with the MCP2221A.
#[derive(Debug, Error)]
pub enum Error {
    /// The USB HID transport failed.
    ///
    /// Covers the device not being found, the interface not being claimable,
    /// and read/write failures or timeouts. Always fatal to the current
    /// transaction; the driver does not retry.
    #[error("USB HID transport failure: {0}")]
    Transport(#[from] hidapi::HidError),
    /// The command code echoed by the MCP2221A was not the command code
    /// written to it.
    ///
    /// This means the request/response pairing on the wire has been lost.
    /// Discard the device handle and reconnect.
    #[error("sent command code {sent:#04x} but response echoed {received:#04x}")]
    MismatchedCommandCodeEcho {
        /// Command code that was sent to the MCP2221A.
        sent: u8,
        /// Command code echoed from the MCP2221A.
        received: u8,
    },
    /// A command issued to the MCP2221A did not complete successfully.
    ///
    /// The enclosed `u8` is the value returned in place of the success
    /// code (0).
    #[error("command failed with status code {0:#04x}")]
    CommandFailed(u8),
    /// An unsupported command was issued to the MCP2221A.
    ///
    /// This can occur when reading or writing the flash data.
    #[error("flash command not supported by the device")]
    CommandNotSupported,
    /// A disallowed command was issued to the MCP2221A.
    ///
    /// This can occur when writing the flash data, and indicates that the
    /// chip configuration has been locked.
    #[error("flash command not allowed by the device")]
    CommandNotAllowed,
    /// The MCP2221A rejected a GPIO output change for this pin.
    ///
    /// The usual cause is that the pin is not configured for GPIO operation.
    #[error("device rejected the GPIO change for {pin}")]
    GpioChangeRejected {
        /// Pin the rejection marker was reported for.
        pin: GpPin,
    },
    /// A chip-settings field held a code with no known meaning.
    ///
    /// Indicates a corrupted response or an unknown chip revision.
    #[error("no meaning for code {code:#04x} of chip setting {setting:?}")]
    UnknownSettingCode {
        /// Name of the setting being decoded.
        setting: &'static str,
        /// Masked code read from the response.
        code: u8,
    },
    /// A string descriptor response did not carry the 0x03 type tag.
    #[error("string descriptor type tag was {found:#04x}, expected 0x03")]
    UnexpectedDescriptorTag {
        /// Value found in place of the type tag.
        found: u8,
    },
    /// A string structure declared a length that does not fit the report.
    #[error("string length byte {0:#04x} is out of range")]
    BadStringLength(u8),
    /// Descriptor strings hold at most 29 characters.
    #[error("descriptor string longer than 29 characters")]
    DescriptorTooLong,
    /// Descriptor strings written by this driver must be ASCII.
    #[error("descriptor string contains non-ASCII characters")]
    DescriptorNotAscii,
    /// GP pin numbers run from 0 to 3.
    #[error("{0} is not a GP pin number (expected 0-3)")]
    InvalidPinNumber(u8),
}
