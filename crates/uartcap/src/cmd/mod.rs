use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod capture;
pub mod ports;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Capture telemetry and images from a serial port.
    Capture(CaptureArgs),
    /// List serial ports on this host.
    Ports(PortsArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Capture(args) => capture::run(args, format),
        Command::Ports(args) => ports::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct CaptureArgs {
    /// Serial port to open (e.g. /dev/ttyUSB0, COM3).
    pub port: String,
    /// Bit rate in baud.
    #[arg(default_value_t = 115_200)]
    pub baud: u32,
    /// Directory for captured images.
    #[arg(long, value_name = "DIR", default_value = "captured_images")]
    pub output_dir: PathBuf,
    /// Exit after saving N images.
    #[arg(long)]
    pub count: Option<u64>,
}

#[derive(Args, Debug, Default)]
pub struct PortsArgs {}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}
