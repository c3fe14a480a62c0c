use super::MCP2221A;
use crate::Error;
use crate::commands::{Command, FlashSection, FlashWriteSection, Report};
use crate::descriptor::{DescriptorString, string_from_flash_buffer};
use crate::settings::{ChipSettings, GpSettings};
use crate::transport::{REPORT_SIZE, Transport};

impl<T: Transport> MCP2221A<T> {
    /// Read one section of the flash configuration.
    ///
    /// The response buffer is returned whole for the caller to decode;
    /// byte 1 has already been checked for success.
    fn read_flash(&mut self, section: FlashSection) -> Result<[u8; REPORT_SIZE], Error> {
        let buf = self
            .transfer(&Report::new(Command::ReadFlash(section)))?
            .expect("Always has response buffer.");
        Ok(buf)
    }

    /// Read the chip configuration settings from flash memory.
    ///
    /// The chip settings collect several unrelated options: whether the
    /// serial number is provided during USB enumeration, the USB vendor
    /// and product IDs, the power attributes and requested current, and
    /// the configuration security mode.
    ///
    /// Settings in flash memory take effect on power-up.
    ///
    /// # Datasheet
    ///
    /// See section 3.1.2 for the underlying Read Flash Data HID command
    /// and table 3-5 for the response layout.
    pub fn flash_read_chip_settings(&mut self) -> Result<ChipSettings, Error> {
        let buf = self.read_flash(FlashSection::ChipSettings)?;
        ChipSettings::try_from_buffer(&buf)
    }

    /// Read the GP pin power-up settings from flash memory.
    ///
    /// These are the designation, direction and output level each pin
    /// takes when the device powers up. The packed per-pin bytes sit at
    /// response bytes 4-7 and are split into [`GpSettings`] as-is.
    ///
    /// # Datasheet
    ///
    /// See section 3.1.2 for the underlying Read Flash Data HID command
    /// and table 3-6 for the response layout.
    pub fn flash_read_gp_settings(&mut self) -> Result<GpSettings, Error> {
        let buf = self.read_flash(FlashSection::GpSettings)?;
        Ok(GpSettings::from_flash_buffer(&buf))
    }

    /// Write the GP pin power-up settings to flash memory.
    ///
    /// The command writes all four pins at once and the device performs no
    /// merging, so read the current settings first and change only the
    /// pins you mean to change; anything else in the argument overwrites
    /// what is stored.
    ///
    /// The new settings take effect after the device is reset.
    ///
    /// # Datasheet
    ///
    /// See section 3.1.3 for the underlying Write Flash Data HID command
    /// and table 3-13 for the request layout.
    pub fn flash_write_gp_settings(&mut self, settings: GpSettings) -> Result<(), Error> {
        let mut command = Report::new(Command::WriteFlash(FlashWriteSection::GpSettings));
        settings.apply_to_flash_buffer(&mut command.write_buffer);
        self.transfer(&command)?;
        Ok(())
    }

    /// Read the USB manufacturer descriptor string from flash memory.
    pub fn read_usb_manufacturer(&mut self) -> Result<String, Error> {
        self.read_descriptor_string(FlashSection::UsbManufacturer)
    }

    /// Read the USB product descriptor string from flash memory.
    pub fn read_usb_product(&mut self) -> Result<String, Error> {
        self.read_descriptor_string(FlashSection::UsbProduct)
    }

    /// Read the USB serial number descriptor string from flash memory.
    pub fn read_usb_serial_number(&mut self) -> Result<String, Error> {
        self.read_descriptor_string(FlashSection::UsbSerialNumber)
    }

    /// Read one of the three descriptor-string sections.
    ///
    /// # Datasheet
    ///
    /// See section 3.1.2 for the underlying Read Flash Data HID command
    /// and tables 3-7 through 3-9 for the response layouts.
    fn read_descriptor_string(&mut self, section: FlashSection) -> Result<String, Error> {
        let buf = self.read_flash(section)?;
        string_from_flash_buffer(&buf)
    }

    /// Change the USB manufacturer descriptor string.
    ///
    /// Descriptor strings identify the device to a USB host. They are
    /// stored in flash, so the device has to be reset (and re-enumerate)
    /// for a change to take effect.
    pub fn write_usb_manufacturer(&mut self, value: &DescriptorString) -> Result<(), Error> {
        self.write_descriptor_string(FlashWriteSection::UsbManufacturer, value)
    }

    /// Change the USB product descriptor string.
    ///
    /// See [`MCP2221A::write_usb_manufacturer`] for when the change takes
    /// effect.
    pub fn write_usb_product(&mut self, value: &DescriptorString) -> Result<(), Error> {
        self.write_descriptor_string(FlashWriteSection::UsbProduct, value)
    }

    /// Change the USB serial number descriptor string.
    ///
    /// See [`MCP2221A::write_usb_manufacturer`] for when the change takes
    /// effect.
    pub fn write_usb_serial_number(&mut self, value: &DescriptorString) -> Result<(), Error> {
        self.write_descriptor_string(FlashWriteSection::UsbSerialNumber, value)
    }

    /// Write one of the three descriptor-string sections.
    ///
    /// # Datasheet
    ///
    /// See section 3.1.3 for the underlying Write Flash Data HID command
    /// and tables 3-14 through 3-16 for the request layouts.
    fn write_descriptor_string(
        &mut self,
        section: FlashWriteSection,
        value: &DescriptorString,
    ) -> Result<(), Error> {
        let mut command = Report::new(Command::WriteFlash(section));
        value.apply_to_flash_buffer(&mut command.write_buffer);
        self.transfer(&command)?;
        Ok(())
    }

    /// Read the factory-programmed chip serial number.
    ///
    /// Unlike the descriptor strings this is stored as one byte per
    /// character, with the length at response byte 2 and the characters
    /// from byte 4. It cannot be changed.
    ///
    /// # Datasheet
    ///
    /// See section 3.1.2 for the underlying Read Flash Data HID command
    /// and table 3-10 for the response layout.
    pub fn read_factory_serial_number(&mut self) -> Result<String, Error> {
        let buf = self.read_flash(FlashSection::FactorySerialNumber)?;
        let length = buf[2] as usize;
        if 4 + length > REPORT_SIZE {
            return Err(Error::BadStringLength(buf[2]));
        }
        Ok(buf[4..4 + length].iter().map(|&b| char::from(b)).collect())
    }
}
