mod cmd;
mod exit;
mod logging;
mod output;
mod store;

use clap::Parser;

use crate::cmd::Command;
use crate::logging::{init_logging, LogFormat, LogLevel};
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "uartcap", version, about = "Serial telemetry and image capture")]
struct Cli {
    /// Output format.
    #[arg(long, value_name = "FORMAT", global = true)]
    format: Option<OutputFormat>,

    /// Log output format (stderr).
    #[arg(long, value_name = "FORMAT", default_value = "text", global = true)]
    log_format: LogFormat,

    /// Minimum log level (stderr).
    #[arg(long, value_name = "LEVEL", default_value = "info", global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.log_level);

    let format = cli.format.unwrap_or_else(OutputFormat::default_for_stdout);
    let result = cmd::run(cli.command, format);

    match result {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.code);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_capture_with_default_baud() {
        let cli = Cli::try_parse_from(["uartcap", "capture", "/dev/ttyUSB0"])
            .expect("capture args should parse");

        match cli.command {
            Command::Capture(args) => {
                assert_eq!(args.port, "/dev/ttyUSB0");
                assert_eq!(args.baud, 115_200);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_capture_with_positional_baud() {
        let cli = Cli::try_parse_from(["uartcap", "capture", "COM3", "9600"])
            .expect("capture args should parse");

        match cli.command {
            Command::Capture(args) => {
                assert_eq!(args.port, "COM3");
                assert_eq!(args.baud, 9_600);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn missing_port_is_a_usage_error() {
        let err = Cli::try_parse_from(["uartcap", "capture"])
            .expect_err("missing port should fail");
        assert_eq!(
            err.kind(),
            clap::error::ErrorKind::MissingRequiredArgument
        );
    }

    #[test]
    fn parses_ports_subcommand() {
        let cli = Cli::try_parse_from(["uartcap", "ports"]).expect("ports args should parse");
        assert!(matches!(cli.command, Command::Ports(_)));
    }
}
