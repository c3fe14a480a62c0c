//! GPIO pin identifiers, directions, levels and value samples.

use crate::Error;
use crate::transport::REPORT_SIZE;

/// One of the four general-purpose pins, GP0 through GP3.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GpPin {
    /// Pin GP0.
    Gp0,
    /// Pin GP1.
    Gp1,
    /// Pin GP2.
    Gp2,
    /// Pin GP3.
    Gp3,
}

impl GpPin {
    /// All four pins, in order.
    pub const ALL: [GpPin; 4] = [GpPin::Gp0, GpPin::Gp1, GpPin::Gp2, GpPin::Gp3];

    /// Pin number in `0..=3`, used to index per-pin regions of reports.
    pub(crate) fn index(self) -> usize {
        match self {
            GpPin::Gp0 => 0,
            GpPin::Gp1 => 1,
            GpPin::Gp2 => 2,
            GpPin::Gp3 => 3,
        }
    }
}

#[doc(hidden)]
impl TryFrom<u8> for GpPin {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Error> {
        match value {
            0 => Ok(GpPin::Gp0),
            1 => Ok(GpPin::Gp1),
            2 => Ok(GpPin::Gp2),
            3 => Ok(GpPin::Gp3),
            other => Err(Error::InvalidPinNumber(other)),
        }
    }
}

impl std::fmt::Display for GpPin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "GP{}", self.index())
    }
}

/// GPIO pin logic level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicLevel {
    /// Logic low.
    Low,
    /// Logic high.
    High,
}

#[doc(hidden)]
impl From<bool> for LogicLevel {
    fn from(value: bool) -> Self {
        if value { Self::High } else { Self::Low }
    }
}

#[doc(hidden)]
impl From<LogicLevel> for bool {
    fn from(value: LogicLevel) -> Self {
        matches!(value, LogicLevel::High)
    }
}

#[doc(hidden)]
impl From<LogicLevel> for u8 {
    /// Convert a [`LogicLevel`] to 1 (if high) or 0 (if low).
    fn from(value: LogicLevel) -> Self {
        match value {
            LogicLevel::High => 1,
            LogicLevel::Low => 0,
        }
    }
}

impl std::fmt::Display for LogicLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogicLevel::High => write!(f, "high"),
            LogicLevel::Low => write!(f, "low"),
        }
    }
}

/// GPIO pin direction.
///
/// On the wire, output is 0 and input is 1, in both the packed GP settings
/// byte and the GPIO commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinDirection {
    /// The pin drives its output value.
    Output,
    /// The pin reads the level presented to it.
    Input,
}

#[doc(hidden)]
impl From<bool> for PinDirection {
    fn from(value: bool) -> Self {
        if value { Self::Input } else { Self::Output }
    }
}

#[doc(hidden)]
impl From<PinDirection> for bool {
    fn from(value: PinDirection) -> Self {
        matches!(value, PinDirection::Input)
    }
}

#[doc(hidden)]
impl From<PinDirection> for u8 {
    /// Convert a [`PinDirection`] to 1 (if input) or 0 (if output).
    fn from(value: PinDirection) -> Self {
        match value {
            PinDirection::Input => 1,
            PinDirection::Output => 0,
        }
    }
}

impl std::fmt::Display for PinDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PinDirection::Output => write!(f, "output"),
            PinDirection::Input => write!(f, "input"),
        }
    }
}

/// Raw per-pin values from one Get GPIO Values response.
///
/// For an input pin the value is the level read at the pin, for an output
/// pin it is the currently driven level. A pin that is not configured for
/// GPIO operation reads as the marker value `0xEE`.
///
/// ## Datasheet
///
/// See table 3-35: the pin values sit at response bytes 2, 4, 6 and 8.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GpioValues {
    /// Value read for GP0.
    pub gp0: u8,
    /// Value read for GP1.
    pub gp1: u8,
    /// Value read for GP2.
    pub gp2: u8,
    /// Value read for GP3.
    pub gp3: u8,
}

impl GpioValues {
    pub(crate) fn from_buffer(buf: &[u8; REPORT_SIZE]) -> Self {
        Self {
            gp0: buf[2],
            gp1: buf[4],
            gp2: buf[6],
            gp3: buf[8],
        }
    }

    /// Value read for the given pin.
    pub fn pin(&self, pin: GpPin) -> u8 {
        match pin {
            GpPin::Gp0 => self.gp0,
            GpPin::Gp1 => self.gp1,
            GpPin::Gp2 => self.gp2,
            GpPin::Gp3 => self.gp3,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn values_come_from_every_other_byte() {
        let mut buf = [0u8; REPORT_SIZE];
        buf[2] = 1;
        buf[4] = 0;
        buf[6] = 0xEE;
        buf[8] = 1;
        let values = GpioValues::from_buffer(&buf);
        assert_eq!(
            values,
            GpioValues {
                gp0: 1,
                gp1: 0,
                gp2: 0xEE,
                gp3: 1
            }
        );
        assert_eq!(values.pin(GpPin::Gp2), 0xEE);
    }

    #[test]
    fn pin_numbers_parse_and_reject() {
        assert_eq!(GpPin::try_from(2).unwrap(), GpPin::Gp2);
        assert!(matches!(
            GpPin::try_from(4),
            Err(Error::InvalidPinNumber(4))
        ));
    }
}
