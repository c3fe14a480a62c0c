use std::time::Duration;

use crate::Error;
use crate::commands::{Command, Report};
use crate::status::{DeviceStatus, revisions_from_buffer};
use crate::transport::{HidTransport, REPORT_SIZE, Transport};

mod flash;
mod gpio;
mod sram;

/// Minimum time to wait after [`MCP2221A::reset`] before reconnecting.
///
/// The datasheet gives a maximum power-up time of 140 ms (section 4.2.3);
/// one second leaves a comfortable margin for USB re-enumeration on top.
pub const RESET_POWER_UP_DELAY: Duration = Duration::from_secs(1);

/// Driver for the MCP2221A configuration interface.
///
/// Create one with [`MCP2221A::connect`] (or
/// [`MCP2221A::connect_with_vid_and_pid`] if the USB IDs stored in flash
/// have been changed), then call the operation methods:
///
/// - `flash_*` and the USB descriptor methods read and write the
///   persistent configuration, which takes effect at power-up;
/// - `gpio_*` and `sram_*` work on the volatile run-time state, which is
///   lost when the chip resets;
/// - [`status`](MCP2221A::status) composes a full identity snapshot;
/// - [`reset`](MCP2221A::reset) restarts the chip so that flash changes
///   take effect.
///
/// Every operation is one strict request/response exchange: the driver
/// writes a single 64-byte report, blocks for the single 64-byte response,
/// and checks that the response echoes the command code before decoding
/// anything else. Operations take `&mut self`, so a second request cannot
/// be issued before the paired response has been read. There are no
/// retries; callers decide whether to re-issue a failed transaction.
///
/// The driver is generic over its [`Transport`] so the protocol can be
/// exercised without hardware; see [`MCP2221A::with_transport`].
#[derive(Debug)]
pub struct MCP2221A<T = HidTransport> {
    transport: T,
}

impl MCP2221A<HidTransport> {
    /// Connect to the first device found with the default vendor and
    /// product ID.
    ///
    /// The default VID is 0x4D8 and PID 0xDD for both the original MCP2221
    /// and the (more common) MCP2221A.
    ///
    /// # Errors
    ///
    /// An error will be returned if the USB device cannot be opened.
    pub fn connect() -> Result<Self, Error> {
        Ok(Self::with_transport(HidTransport::open()?))
    }

    /// Connect to the first device found with the given vendor and
    /// product ID.
    ///
    /// # Errors
    ///
    /// An error will be returned if the USB device cannot be opened.
    pub fn connect_with_vid_and_pid(vendor_id: u16, product_id: u16) -> Result<Self, Error> {
        Ok(Self::with_transport(HidTransport::open_with_vid_and_pid(
            vendor_id, product_id,
        )?))
    }
}

impl<T: Transport> MCP2221A<T> {
    /// Build a driver over an already-open transport.
    pub fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    /// Write the given command to the device and read the 64-byte response.
    ///
    /// Returning an optional buffer is not great for the callers'
    /// ergonomics, but it is the most straightforward way of representing
    /// the non-response from Reset Chip.
    fn transfer(&mut self, command: &Report) -> Result<Option<[u8; REPORT_SIZE]>, Error> {
        self.transport.send(&command.write_buffer)?;
        if command.has_no_response() {
            return Ok(None);
        }

        let response = self.transport.receive()?;
        if response[0] != command.command_code() {
            return Err(Error::MismatchedCommandCodeEcho {
                sent: command.command_code(),
                received: response[0],
            });
        }
        command.check_response_status(&response)?;
        Ok(Some(response))
    }

    /// Read the full device status snapshot.
    ///
    /// This composes several transactions: the Status command for the
    /// hardware and firmware revisions, the three USB descriptor-string
    /// reads, the factory serial number read, and the chip-settings read.
    pub fn status(&mut self) -> Result<DeviceStatus, Error> {
        let buf = self
            .transfer(&Report::new(Command::Status))?
            .expect("Always has response buffer.");
        let (hardware_revision, firmware_revision) = revisions_from_buffer(&buf);
        Ok(DeviceStatus {
            hardware_revision,
            firmware_revision,
            usb_manufacturer: self.read_usb_manufacturer()?,
            usb_product: self.read_usb_product()?,
            usb_serial_number: self.read_usb_serial_number()?,
            factory_serial_number: self.read_factory_serial_number()?,
            chip_settings: self.flash_read_chip_settings()?,
        })
    }

    /// Reset the MCP2221A.
    ///
    /// This is needed after changing settings in flash memory, which only
    /// take effect on power-up. The request carries a magic byte sequence
    /// so a corrupted report cannot reset the chip by accident, and no
    /// response is read.
    ///
    /// Resetting causes the device to re-enumerate with the USB host, so
    /// this method consumes the driver. Wait at least
    /// [`RESET_POWER_UP_DELAY`] before connecting again.
    pub fn reset(mut self) -> Result<(), Error> {
        self.transfer(&Report::new(Command::ResetChip))?;
        Ok(())
    }
}
