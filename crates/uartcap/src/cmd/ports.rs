use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;
use uartcap_transport::available_ports;

use crate::cmd::PortsArgs;
use crate::exit::{transport_error, CliResult, SUCCESS};
use crate::output::OutputFormat;

#[derive(Serialize)]
struct PortOutput<'a> {
    name: &'a str,
    kind: &'a str,
    product: Option<&'a str>,
}

pub fn run(_args: PortsArgs, format: OutputFormat) -> CliResult<i32> {
    let mut ports =
        available_ports().map_err(|err| transport_error("port enumeration failed", err))?;
    ports.sort_by(|a, b| a.name.cmp(&b.name));

    match format {
        OutputFormat::Json => {
            for port in &ports {
                let out = PortOutput {
                    name: &port.name,
                    kind: port.kind.as_str(),
                    product: port.product.as_deref(),
                };
                println!(
                    "{}",
                    serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
                );
            }
        }
        OutputFormat::Pretty => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["PORT", "KIND", "PRODUCT"]);
            for port in &ports {
                table.add_row(vec![
                    port.name.clone(),
                    port.kind.as_str().to_string(),
                    port.product.clone().unwrap_or_default(),
                ]);
            }
            println!("{table}");
        }
    }

    Ok(SUCCESS)
}
