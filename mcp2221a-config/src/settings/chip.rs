use bit_field::BitField;

use crate::Error;
use crate::transport::REPORT_SIZE;

/// Decoded value of one chip setting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingValue {
    /// A single-bit flag.
    Flag(bool),
    /// A numeric value.
    Number(u32),
    /// A hex-rendered identifier, such as the USB vendor ID.
    Hex(String),
    /// One label out of a fixed set.
    Label(&'static str),
}

impl std::fmt::Display for SettingValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingValue::Flag(flag) => write!(f, "{flag}"),
            SettingValue::Number(n) => write!(f, "{n}"),
            SettingValue::Hex(s) => write!(f, "{s}"),
            SettingValue::Label(label) => write!(f, "{label}"),
        }
    }
}

/// A pure decoder from a response buffer to one [`SettingValue`].
///
/// Each variant closes over the byte offsets it reads. Decoding never
/// mutates the buffer, and only `MaskedEnum` can fail (on a code with no
/// assigned label).
enum FieldDecoder {
    /// `buffer[offset] * multiplier`.
    ScaledByte {
        offset: usize,
        multiplier: u32,
    },
    /// The bytes of `[start, end)` in reverse order, rendered as lowercase
    /// hex digits.
    ///
    /// The chip stores its 16-bit USB IDs little-endian, but the
    /// conventional display order is big-endian.
    ReversedHex {
        start: usize,
        end: usize,
    },
    /// A single bit as a boolean.
    BitFlag {
        offset: usize,
        bit: usize,
    },
    /// `buffer[offset] & mask` looked up in a fixed label table.
    ///
    /// Distinct codes may share a label; that is a normal many-to-one
    /// mapping, not an error.
    MaskedEnum {
        offset: usize,
        mask: u8,
        options: &'static [(u8, &'static str)],
    },
}

impl FieldDecoder {
    fn decode(&self, setting: &'static str, buf: &[u8; REPORT_SIZE]) -> Result<SettingValue, Error> {
        match *self {
            FieldDecoder::ScaledByte { offset, multiplier } => {
                Ok(SettingValue::Number(u32::from(buf[offset]) * multiplier))
            }
            FieldDecoder::ReversedHex { start, end } => {
                let hex = buf[start..end]
                    .iter()
                    .rev()
                    .map(|byte| format!("{byte:02x}"))
                    .collect();
                Ok(SettingValue::Hex(hex))
            }
            FieldDecoder::BitFlag { offset, bit } => Ok(SettingValue::Flag(buf[offset].get_bit(bit))),
            FieldDecoder::MaskedEnum {
                offset,
                mask,
                options,
            } => {
                let code = buf[offset] & mask;
                options
                    .iter()
                    .find(|(candidate, _)| *candidate == code)
                    .map(|&(_, label)| SettingValue::Label(label))
                    .ok_or(Error::UnknownSettingCode { setting, code })
            }
        }
    }
}

/// Labels for the 2-bit chip security code.
///
/// Codes 2 and 3 both mean the configuration is permanently locked.
const SECURITY_LABELS: &[(u8, &str)] = &[
    (0b00, "Unsecured"),
    (0b01, "Password-protected"),
    (0b10, "Permanently-locked"),
    (0b11, "Permanently-locked"),
];

/// The chip-settings response fields this driver reports, in display order.
///
/// Offsets are into the full Read Flash Data response (table 3-5 of the
/// datasheet). The requested-current byte is stored halved on the chip,
/// hence the multiplier of 2.
const CHIP_SETTING_FIELDS: &[(&str, FieldDecoder)] = &[
    (
        "Provide serial number on enumeration",
        FieldDecoder::BitFlag { offset: 4, bit: 7 },
    ),
    (
        "USB vendorID",
        FieldDecoder::ReversedHex { start: 8, end: 10 },
    ),
    (
        "USB productID",
        FieldDecoder::ReversedHex { start: 10, end: 12 },
    ),
    (
        "USB power attributes",
        FieldDecoder::ScaledByte {
            offset: 12,
            multiplier: 1,
        },
    ),
    (
        "USB requested number of mA",
        FieldDecoder::ScaledByte {
            offset: 13,
            multiplier: 2,
        },
    ),
    (
        "Chip security",
        FieldDecoder::MaskedEnum {
            offset: 4,
            mask: 0b11,
            options: SECURITY_LABELS,
        },
    ),
];

/// Decoded snapshot of the chip configuration settings.
///
/// Produced by applying every entry of the field table to one chip-settings
/// response. Entries keep the table's order, so display output is stable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChipSettings {
    entries: Vec<(&'static str, SettingValue)>,
}

impl ChipSettings {
    /// Apply the full decoder table to a chip-settings response buffer.
    pub(crate) fn try_from_buffer(buf: &[u8; REPORT_SIZE]) -> Result<Self, Error> {
        let entries = CHIP_SETTING_FIELDS
            .iter()
            .map(|&(name, ref decoder)| Ok((name, decoder.decode(name, buf)?)))
            .collect::<Result<Vec<_>, Error>>()?;
        Ok(Self { entries })
    }

    /// Look up a setting by its display name.
    pub fn get(&self, name: &str) -> Option<&SettingValue> {
        self.entries
            .iter()
            .find(|(candidate, _)| *candidate == name)
            .map(|(_, value)| value)
    }

    /// Iterate over the settings in display order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &SettingValue)> {
        self.entries.iter().map(|(name, value)| (*name, value))
    }
}

impl std::fmt::Display for ChipSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (name, value) in self.iter() {
            if !first {
                writeln!(f)?;
            }
            write!(f, "{name}: {value}")?;
            first = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn reversed_hex_renders_little_endian_ids_big_endian() {
        let decoder = FieldDecoder::ReversedHex { start: 8, end: 10 };
        let mut buf = [0u8; REPORT_SIZE];
        buf[8] = 0x4D;
        buf[9] = 0x08;
        assert_eq!(
            decoder.decode("USB vendorID", &buf).unwrap(),
            SettingValue::Hex("084d".into())
        );
    }

    #[test]
    fn every_security_code_has_a_label() {
        let decoder = FieldDecoder::MaskedEnum {
            offset: 4,
            mask: 0b11,
            options: SECURITY_LABELS,
        };
        let mut buf = [0u8; REPORT_SIZE];
        for code in 0..=0b11 {
            buf[4] = code;
            let value = decoder.decode("Chip security", &buf).unwrap();
            let expected = match code {
                0 => "Unsecured",
                1 => "Password-protected",
                _ => "Permanently-locked",
            };
            assert_eq!(value, SettingValue::Label(expected));
        }
    }

    #[test]
    fn masked_enum_rejects_unassigned_codes() {
        let decoder = FieldDecoder::MaskedEnum {
            offset: 0,
            mask: 0b111,
            options: &[(0b000, "off"), (0b001, "on")],
        };
        let mut buf = [0u8; REPORT_SIZE];
        buf[0] = 0b101;
        assert!(matches!(
            decoder.decode("example", &buf),
            Err(Error::UnknownSettingCode {
                setting: "example",
                code: 0b101,
            })
        ));
    }

    #[test]
    fn scaled_byte_doubles_the_requested_current() {
        let decoder = FieldDecoder::ScaledByte {
            offset: 13,
            multiplier: 2,
        };
        let mut buf = [0u8; REPORT_SIZE];
        buf[13] = 50;
        assert_eq!(
            decoder.decode("USB requested number of mA", &buf).unwrap(),
            SettingValue::Number(100)
        );
    }

    #[test]
    fn full_table_decodes_one_response() {
        let mut buf = [0u8; REPORT_SIZE];
        buf[0] = 0xB0;
        buf[4] = 0b1000_0011; // serial enumeration on, permanently locked
        buf[8] = 0x4D;
        buf[9] = 0x08;
        buf[10] = 0xDD;
        buf[11] = 0x00;
        buf[12] = 0x80;
        buf[13] = 50;

        let settings = ChipSettings::try_from_buffer(&buf).unwrap();
        assert_eq!(
            settings.get("Provide serial number on enumeration"),
            Some(&SettingValue::Flag(true))
        );
        assert_eq!(
            settings.get("Chip security"),
            Some(&SettingValue::Label("Permanently-locked"))
        );
        assert_eq!(
            settings.get("USB vendorID"),
            Some(&SettingValue::Hex("084d".into()))
        );
        assert_eq!(
            settings.get("USB productID"),
            Some(&SettingValue::Hex("00dd".into()))
        );
        assert_eq!(
            settings.get("USB power attributes"),
            Some(&SettingValue::Number(0x80))
        );
        assert_eq!(
            settings.get("USB requested number of mA"),
            Some(&SettingValue::Number(100))
        );
    }
}
