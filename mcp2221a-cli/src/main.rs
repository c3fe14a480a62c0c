use clap::Parser;
use mcp2221a_config::MCP2221A;
use mcp2221a_config::gpio::GpPin;

use cli::Commands;

mod cli;
mod flash;
mod gpio;
mod usb;
mod util;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = cli::Cli::parse();
    let mut device = MCP2221A::connect_with_vid_and_pid(args.vid, args.pid)?;
    log::debug!("opened device {:#06x}:{:#06x}", args.vid, args.pid);
    match args.command {
        Commands::Status => println!("{}", device.status()?),
        Commands::Gpio(command) => gpio::action(&mut device, command)?,
        Commands::Usb(command) => usb::action(&mut device, command)?,
        Commands::Flash(command) => flash::action(device, (args.vid, args.pid), command)?,
        Commands::Sram => {
            let settings = device.sram_read_gp_settings()?;
            for pin in GpPin::ALL {
                println!("{pin}: {}", settings.pin(pin));
            }
        }
        Commands::Reset => {
            device.reset()?;
            println!("Device reset; it will re-enumerate with the USB host.");
        }
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use crate::cli::Cli;

    use clap::CommandFactory;

    #[test]
    fn check_cli_debug_asserts() {
        Cli::command().debug_assert();
    }
}
