use super::MCP2221A;
use crate::Error;
use crate::commands::{Command, Report};
use crate::gpio::{GpPin, GpioValues, LogicLevel, PinDirection};
use crate::transport::Transport;

/// Value for an "alter" byte that makes the device load the byte after it.
const LOAD_NEW_VALUE: u8 = 0xFF;
/// Marker the device places in a response sub-field it refused to change.
const REJECTED: u8 = 0xEE;

impl<T: Transport> MCP2221A<T> {
    /// Read the current value of every GP pin.
    ///
    /// For input pins the value is the level read at the pin; for output
    /// pins it is the level currently driven. Pins that are not configured
    /// for GPIO operation read as the `0xEE` marker byte.
    ///
    /// # Datasheet
    ///
    /// See section 3.1.12 for the underlying Get GPIO Values HID command.
    pub fn gpio_read(&mut self) -> Result<GpioValues, Error> {
        let buf = self
            .transfer(&Report::new(Command::GetGpioValues))?
            .expect("Always has response buffer.");
        Ok(GpioValues::from_buffer(&buf))
    }

    /// Drive one pin as a GPIO output at the given level.
    ///
    /// The request carries a four-byte block per pin: an alter-output
    /// enable, the new output value, an alter-direction enable, and the
    /// new direction. This method fills in the block for the chosen pin
    /// (forcing it to output) and leaves the other pins' blocks zeroed,
    /// which means "no change".
    ///
    /// The change is volatile: it alters the pin's SRAM state and is lost
    /// when the chip resets.
    ///
    /// # Errors
    ///
    /// [`Error::GpioChangeRejected`] if the device marks any sub-field for
    /// this pin with its `0xEE` rejection byte. The usual cause is that
    /// the pin is not designated for GPIO operation; see
    /// [`MCP2221A::sram_set_all_gpio`] or
    /// [`MCP2221A::flash_write_gp_settings`].
    ///
    /// # Datasheet
    ///
    /// See section 3.1.11 for the underlying Set GPIO Output Values HID
    /// command.
    pub fn gpio_write(&mut self, pin: GpPin, level: LogicLevel) -> Result<(), Error> {
        let mut command = Report::new(Command::SetGpioOutputValues);
        let block = 2 + 4 * pin.index();
        command.set_data_byte(block, LOAD_NEW_VALUE);
        command.set_data_byte(block + 1, level.into());
        command.set_data_byte(block + 2, LOAD_NEW_VALUE);
        command.set_data_byte(block + 3, PinDirection::Output.into());

        let buf = self
            .transfer(&command)?
            .expect("Always has response buffer.");
        let checked = 2 + pin.index();
        if buf[checked..checked + 4].contains(&REJECTED) {
            return Err(Error::GpioChangeRejected { pin });
        }
        Ok(())
    }
}
