use std::io::IsTerminal;

use chrono::Local;
use clap::ValueEnum;
use serde::Serialize;

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    Json,
    Pretty,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Pretty
        } else {
            Self::Json
        }
    }
}

#[derive(Serialize)]
struct LineOutput<'a> {
    timestamp: &'a str,
    line: &'a str,
}

/// Print one telemetry line with a millisecond wall-clock timestamp.
pub fn print_line(line: &str, format: OutputFormat) {
    let timestamp = Local::now().format("%H:%M:%S%.3f").to_string();
    println!("{}", render_line(line, &timestamp, format));
}

fn render_line(line: &str, timestamp: &str, format: OutputFormat) -> String {
    match format {
        OutputFormat::Pretty => format!("[{timestamp}] {line}"),
        OutputFormat::Json => {
            let out = LineOutput { timestamp, line };
            serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
        }
    }
}
