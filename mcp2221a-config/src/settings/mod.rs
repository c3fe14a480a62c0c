//! Decoded views of the chip's flash and SRAM configuration.

mod chip;
mod gp;

pub use chip::{ChipSettings, SettingValue};
pub use gp::{DESIGNATION_GPIO, GpPinSettings, GpSettings};
