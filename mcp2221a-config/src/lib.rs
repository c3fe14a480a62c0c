#![doc = include_str!("../README.md")]
#![deny(missing_docs)]
#![deny(unsafe_code)]

mod commands;
mod descriptor;
mod driver;
mod error;
pub mod gpio;
pub mod settings;
pub mod status;
mod transport;

pub use descriptor::DescriptorString;
pub use driver::{MCP2221A, RESET_POWER_UP_DELAY};
pub use error::Error;
pub use transport::{HidTransport, MCP2221A_PID, MICROCHIP_VID, REPORT_SIZE, Transport};
