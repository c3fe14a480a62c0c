//! The HID seam between the protocol engine and the physical device.

use hidapi::{HidApi, HidDevice};

use crate::error::Error;

/// Size in bytes of every report exchanged with the MCP2221A.
pub const REPORT_SIZE: usize = 64;

/// Microchip's USB vendor ID (0x4D8).
pub const MICROCHIP_VID: u16 = 0x04D8;

/// Default USB product ID of the MCP2221 and MCP2221A (0xDD).
pub const MCP2221A_PID: u16 = 0x00DD;

/// Blocking exchange of fixed-size reports with an MCP2221A.
///
/// The protocol is strictly synchronous: the driver calls [`send`] and then
/// [`receive`] exactly once per transaction, and never issues a second
/// request before the paired response has been read. Implementations only
/// need to move one 64-byte buffer in each direction.
///
/// Device discovery, interface claiming and timeouts are the transport's
/// business; a failure in any of them surfaces as [`Error::Transport`].
///
/// [`send`]: Transport::send
/// [`receive`]: Transport::receive
pub trait Transport {
    /// Write one report to the device.
    fn send(&mut self, report: &[u8; REPORT_SIZE]) -> Result<(), Error>;

    /// Block until the device produces one report.
    fn receive(&mut self) -> Result<[u8; REPORT_SIZE], Error>;
}

/// [`Transport`] over the hidapi library.
///
/// This is the transport used against real hardware. Opening the device
/// claims it exclusively (on Linux, hidraw access may require a udev rule
/// or elevated privileges).
#[derive(Debug)]
pub struct HidTransport {
    device: HidDevice,
}

impl HidTransport {
    /// Open the first device with the default vendor and product ID.
    ///
    /// The defaults are [`MICROCHIP_VID`] and [`MCP2221A_PID`], shared by
    /// the original MCP2221 and the (more common) MCP2221A.
    pub fn open() -> Result<Self, Error> {
        Self::open_with_vid_and_pid(MICROCHIP_VID, MCP2221A_PID)
    }

    /// Open the first device with the given vendor and product ID.
    ///
    /// Use this if the IDs stored in the chip's flash have been changed.
    pub fn open_with_vid_and_pid(vendor_id: u16, product_id: u16) -> Result<Self, Error> {
        let hidapi = HidApi::new()?;
        let device = hidapi.open(vendor_id, product_id)?;
        Ok(Self { device })
    }
}

impl Transport for HidTransport {
    fn send(&mut self, report: &[u8; REPORT_SIZE]) -> Result<(), Error> {
        // hidapi requires the USB HID report number in front of the data
        // bytes. The MCP2221A does not use report numbers, so it is 0.
        let mut buffer = [0u8; REPORT_SIZE + 1];
        buffer[1..].copy_from_slice(report);
        let written = self.device.write(&buffer)?;
        assert_eq!(written, REPORT_SIZE + 1, "Didn't write full report.");
        Ok(())
    }

    fn receive(&mut self) -> Result<[u8; REPORT_SIZE], Error> {
        let mut buffer = [0u8; REPORT_SIZE];
        let read = self.device.read(&mut buffer)?;
        assert_eq!(read, REPORT_SIZE, "Didn't read full report.");
        Ok(buffer)
    }
}
