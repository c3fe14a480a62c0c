use super::MCP2221A;
use crate::Error;
use crate::commands::{Command, Report};
use crate::gpio::PinDirection;
use crate::settings::{GpPinSettings, GpSettings};
use crate::transport::Transport;

/// Flag for byte 7 of Set SRAM Settings: load the per-pin GP settings
/// from bytes 8-11.
const ALTER_GP_SETTINGS: u8 = 0x80;

impl<T: Transport> MCP2221A<T> {
    /// Configure every GP pin as GPIO with the given direction.
    ///
    /// The change is made in SRAM only: it takes effect immediately and is
    /// lost when the chip resets, at which point the flash power-up
    /// settings are loaded again. Use this before driving pins with
    /// [`MCP2221A::gpio_write`] or sampling them with
    /// [`MCP2221A::gpio_read`] when the power-up settings designate them
    /// for other functions.
    ///
    /// # Datasheet
    ///
    /// See section 3.1.13 for the underlying Set SRAM Settings HID
    /// command; byte 7 bit 7 enables loading the four GP mode bytes.
    pub fn sram_set_all_gpio(&mut self, direction: PinDirection) -> Result<(), Error> {
        let mut command = Report::new(Command::SetSramSettings);
        command.set_data_byte(7, ALTER_GP_SETTINGS);
        let mode = GpPinSettings::gpio(direction).packed();
        for pin in 0..4 {
            command.set_data_byte(8 + pin, mode);
        }
        self.transfer(&command)?;
        Ok(())
    }

    /// Read the live GP pin configuration from SRAM.
    ///
    /// This is the configuration the pins are currently running with, as
    /// opposed to the power-up values in flash. The packed per-pin bytes
    /// sit at response bytes 22-25.
    ///
    /// Note that changes made through the Set GPIO Output Values command
    /// ([`MCP2221A::gpio_write`]) are not always reflected here; prefer
    /// [`MCP2221A::gpio_read`] for the pins' current levels.
    ///
    /// # Datasheet
    ///
    /// See section 3.1.14 for the underlying Get SRAM Settings HID command
    /// and table 3-39 for the response layout.
    pub fn sram_read_gp_settings(&mut self) -> Result<GpSettings, Error> {
        let buf = self
            .transfer(&Report::new(Command::GetSramSettings))?
            .expect("Always has response buffer.");
        Ok(GpSettings::from_sram_buffer(&buf))
    }
}
