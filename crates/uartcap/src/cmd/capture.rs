use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{error, info};
use uartcap_demux::{Demux, Event};
use uartcap_transport::{ByteSource, LinkConfig, SerialLink};

use crate::cmd::CaptureArgs;
use crate::exit::{io_error, transport_error, CliError, CliResult, INTERNAL, SUCCESS};
use crate::output::{print_line, OutputFormat};
use crate::store::ImageStore;

const READ_CHUNK_SIZE: usize = 4 * 1024;

pub fn run(args: CaptureArgs, format: OutputFormat) -> CliResult<i32> {
    let store = ImageStore::create(&args.output_dir)
        .map_err(|err| io_error("output directory setup failed", err))?;

    let config = LinkConfig {
        baud_rate: args.baud,
        ..LinkConfig::default()
    };
    let mut link =
        SerialLink::open(&args.port, &config).map_err(|err| transport_error("open failed", err))?;

    let running = Arc::new(AtomicBool::new(true));
    install_ctrlc_handler(running.clone())?;

    info!("listening for data (press Ctrl+C to stop)");

    let mut demux = Demux::new();
    let mut chunk = [0u8; READ_CHUNK_SIZE];
    let mut saved = 0u64;

    while running.load(Ordering::SeqCst) {
        let read = match link.read_chunk(&mut chunk) {
            Ok(0) => continue,
            Ok(n) => n,
            Err(err) => return Err(transport_error("read failed", err)),
        };

        for event in demux.feed(&chunk[..read]) {
            match event {
                Event::Line(line) => print_line(&line, format),
                Event::ImageBegin { index } => {
                    info!(number = index + 1, "receiving image");
                }
                Event::ImageEnd(record) => {
                    // A failed save must not halt telemetry capture.
                    match store.save(&record) {
                        Ok(Some(_)) => {
                            saved += 1;
                            if let Some(count) = args.count {
                                if saved >= count {
                                    return Ok(SUCCESS);
                                }
                            }
                        }
                        Ok(None) => {}
                        Err(err) => error!("failed to save image: {err}"),
                    }
                }
            }
        }
    }

    info!("stopped by user");
    Ok(SUCCESS)
}

fn install_ctrlc_handler(running: Arc<AtomicBool>) -> CliResult<()> {
    ctrlc::set_handler(move || {
        running.store(false, Ordering::SeqCst);
    })
    .map_err(|err| CliError::new(INTERNAL, format!("signal handler setup failed: {err}")))
}
