use bit_field::BitField;

use crate::gpio::{GpPin, LogicLevel, PinDirection};
use crate::transport::REPORT_SIZE;

/// Designation code for plain GPIO operation.
///
/// The non-zero codes select pin-specific dedicated or alternate functions
/// (see table 1-5 of the datasheet); this driver passes them through
/// without interpreting them.
pub const DESIGNATION_GPIO: u8 = 0b000;

/// Low three bits of the packed byte: the pin designation.
const DESIGNATION_MASK: u8 = 0b0000_0111;
/// Bit 3 of the packed byte: pin direction (0 = output, 1 = input).
const DIRECTION_BIT: usize = 3;
/// Bit 4 of the packed byte: power-up output level.
const OUTPUT_VALUE_BIT: usize = 4;

/// Settings for one GP pin, packed into a single byte on the wire.
///
/// Only the low five bits of the byte carry meaning: bits 0-2 are the
/// designation, bit 3 the direction, bit 4 the power-up output level.
/// Direction and output level only take effect when the designation is
/// [`DESIGNATION_GPIO`], but the chip stores and reports them regardless.
///
/// ## Datasheet
///
/// See table 3-6 (flash) and table 3-39 (SRAM) for the per-pin byte layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GpPinSettings {
    /// 3-bit pin function code. 0 selects GPIO operation.
    pub designation: u8,
    /// GPIO direction.
    pub direction: PinDirection,
    /// Output level driven at power-up (GPIO output mode only).
    pub output_value: LogicLevel,
}

impl GpPinSettings {
    /// Reassemble the three sub-fields into the on-wire byte.
    ///
    /// Designation codes above the 3-bit range are truncated to it.
    pub fn packed(self) -> u8 {
        let mut byte = self.designation & DESIGNATION_MASK;
        byte.set_bit(DIRECTION_BIT, self.direction.into());
        byte.set_bit(OUTPUT_VALUE_BIT, self.output_value.into());
        byte
    }

    /// Split an on-wire byte into its sub-fields.
    ///
    /// The unused top three bits are discarded, so any byte value is
    /// acceptable.
    pub fn unpack(byte: u8) -> Self {
        Self {
            designation: byte & DESIGNATION_MASK,
            direction: byte.get_bit(DIRECTION_BIT).into(),
            output_value: byte.get_bit(OUTPUT_VALUE_BIT).into(),
        }
    }

    /// GPIO settings with the given direction, output low.
    pub fn gpio(direction: PinDirection) -> Self {
        Self {
            designation: DESIGNATION_GPIO,
            direction,
            output_value: LogicLevel::Low,
        }
    }
}

impl std::fmt::Display for GpPinSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "designation {:#03x}, direction {}, power-up level {}",
            self.designation, self.direction, self.output_value
        )
    }
}

/// In the Read Flash Data response, the GP settings start at byte 4.
const FLASH_START_BYTE: usize = 4;
/// In the Get SRAM Settings response, the GP settings start at byte 22.
const SRAM_START_BYTE: usize = 22;

/// Settings for all four GP pins.
///
/// Read from either flash (the power-up values) or SRAM (the live values);
/// the per-pin byte layout is the same, only the position in the response
/// differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GpSettings {
    /// GP0 pin settings.
    pub gp0: GpPinSettings,
    /// GP1 pin settings.
    pub gp1: GpPinSettings,
    /// GP2 pin settings.
    pub gp2: GpPinSettings,
    /// GP3 pin settings.
    pub gp3: GpPinSettings,
}

impl GpSettings {
    /// Parse GP pin settings read from flash memory.
    pub(crate) fn from_flash_buffer(buf: &[u8; REPORT_SIZE]) -> Self {
        Self::from_buffer(FLASH_START_BYTE, buf)
    }

    /// Parse GP pin settings read from SRAM.
    pub(crate) fn from_sram_buffer(buf: &[u8; REPORT_SIZE]) -> Self {
        Self::from_buffer(SRAM_START_BYTE, buf)
    }

    fn from_buffer(start_byte: usize, buf: &[u8; REPORT_SIZE]) -> Self {
        Self {
            gp0: GpPinSettings::unpack(buf[start_byte]),
            gp1: GpPinSettings::unpack(buf[start_byte + 1]),
            gp2: GpPinSettings::unpack(buf[start_byte + 2]),
            gp3: GpPinSettings::unpack(buf[start_byte + 3]),
        }
    }

    /// Apply the settings to a buffer for writing to flash memory.
    ///
    /// The write layout is shifted relative to the read layout: the four
    /// packed bytes go in bytes 2-5, after the command code and section
    /// selector. See table 3-13 of the datasheet.
    pub(crate) fn apply_to_flash_buffer(&self, buf: &mut [u8; REPORT_SIZE]) {
        buf[2] = self.gp0.packed();
        buf[3] = self.gp1.packed();
        buf[4] = self.gp2.packed();
        buf[5] = self.gp3.packed();
    }

    /// Settings for the given pin.
    pub fn pin(&self, pin: GpPin) -> GpPinSettings {
        match pin {
            GpPin::Gp0 => self.gp0,
            GpPin::Gp1 => self.gp1,
            GpPin::Gp2 => self.gp2,
            GpPin::Gp3 => self.gp3,
        }
    }

    /// Mutable settings for the given pin.
    ///
    /// Use together with [`MCP2221A::flash_read_gp_settings`] to change one
    /// pin without clobbering the others.
    ///
    /// [`MCP2221A::flash_read_gp_settings`]: crate::MCP2221A::flash_read_gp_settings
    pub fn pin_mut(&mut self, pin: GpPin) -> &mut GpPinSettings {
        match pin {
            GpPin::Gp0 => &mut self.gp0,
            GpPin::Gp1 => &mut self.gp1,
            GpPin::Gp2 => &mut self.gp2,
            GpPin::Gp3 => &mut self.gp3,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn pack_unpack_round_trips_every_field_combination() {
        for designation in 0..=0b111 {
            for direction in [PinDirection::Output, PinDirection::Input] {
                for output_value in [LogicLevel::Low, LogicLevel::High] {
                    let settings = GpPinSettings {
                        designation,
                        direction,
                        output_value,
                    };
                    assert_eq!(GpPinSettings::unpack(settings.packed()), settings);
                }
            }
        }
    }

    #[test]
    fn packed_byte_layout() {
        let settings = GpPinSettings {
            designation: 0b010,
            direction: PinDirection::Input,
            output_value: LogicLevel::High,
        };
        assert_eq!(settings.packed(), 0b0001_1010);
    }

    #[test]
    fn unpack_ignores_unused_top_bits() {
        assert_eq!(
            GpPinSettings::unpack(0b1110_1000),
            GpPinSettings {
                designation: 0,
                direction: PinDirection::Input,
                output_value: LogicLevel::Low,
            }
        );
    }

    #[test]
    fn flash_and_sram_offsets() {
        let mut buf = [0u8; REPORT_SIZE];
        buf[4] = 0x10; // GPIO output, power-up high
        buf[22] = 0x08; // GPIO input
        assert_eq!(
            GpSettings::from_flash_buffer(&buf).gp0,
            GpPinSettings {
                designation: DESIGNATION_GPIO,
                direction: PinDirection::Output,
                output_value: LogicLevel::High,
            }
        );
        assert_eq!(
            GpSettings::from_sram_buffer(&buf).gp0,
            GpPinSettings::gpio(PinDirection::Input)
        );
    }

    #[test]
    fn flash_write_layout_is_shifted_from_read_layout() {
        let mut read_buf = [0u8; REPORT_SIZE];
        read_buf[4..8].copy_from_slice(&[0x10, 0x08, 0x02, 0x17]);
        let settings = GpSettings::from_flash_buffer(&read_buf);

        let mut write_buf = [0u8; REPORT_SIZE];
        settings.apply_to_flash_buffer(&mut write_buf);
        assert_eq!(write_buf[2..6], [0x10, 0x08, 0x02, 0x17]);
    }
}
