use std::io::{ErrorKind, Read};
use std::time::Duration;

use serialport::{DataBits, Parity, SerialPort, SerialPortType, StopBits};
use tracing::{debug, info};

use crate::error::{Result, TransportError};

/// Configuration for opening a serial link.
#[derive(Debug, Clone)]
pub struct LinkConfig {
    /// Bit rate in baud. Default: 115200.
    pub baud_rate: u32,
    /// How long a single read waits for data before reporting "nothing yet".
    pub read_timeout: Duration,
    /// Pause after opening, before the first read, so the line can settle.
    pub settle_delay: Duration,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            baud_rate: 115_200,
            read_timeout: Duration::from_millis(200),
            settle_delay: Duration::from_secs(2),
        }
    }
}

/// A source of raw byte chunks.
///
/// Implementations deliver whatever bytes are available, in arbitrary chunk
/// sizes and alignments. A return of `Ok(0)` means no data arrived within
/// the read timeout, not end of stream.
pub trait ByteSource {
    fn read_chunk(&mut self, buf: &mut [u8]) -> Result<usize>;
}

/// An open serial link, framed 8N1.
pub struct SerialLink {
    port: Box<dyn SerialPort>,
}

impl std::fmt::Debug for SerialLink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerialLink").finish_non_exhaustive()
    }
}

impl SerialLink {
    /// Open `port` with the given configuration and wait for the line to
    /// settle.
    pub fn open(port: &str, config: &LinkConfig) -> Result<Self> {
        let handle = serialport::new(port, config.baud_rate)
            .data_bits(DataBits::Eight)
            .parity(Parity::None)
            .stop_bits(StopBits::One)
            .timeout(config.read_timeout)
            .open()
            .map_err(|source| TransportError::Open {
                port: port.to_string(),
                source,
            })?;

        info!(port, baud = config.baud_rate, "serial link open");

        std::thread::sleep(config.settle_delay);
        debug!(port, "serial link settled");

        Ok(Self { port: handle })
    }
}

impl ByteSource for SerialLink {
    fn read_chunk(&mut self, buf: &mut [u8]) -> Result<usize> {
        match self.port.read(buf) {
            Ok(n) => Ok(n),
            Err(err) if err.kind() == ErrorKind::TimedOut => Ok(0),
            Err(err) if err.kind() == ErrorKind::Interrupted => Ok(0),
            Err(err) => Err(TransportError::Io(err)),
        }
    }
}

/// A serial port present on this host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortInfo {
    /// Platform port name (e.g. `/dev/ttyUSB0`, `COM3`).
    pub name: String,
    /// How the port is attached.
    pub kind: PortKind,
    /// Product string, when the platform reports one.
    pub product: Option<String>,
}

/// Attachment type of an enumerated port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortKind {
    Usb,
    Pci,
    Bluetooth,
    Unknown,
}

impl PortKind {
    pub fn as_str(self) -> &'static str {
        match self {
            PortKind::Usb => "usb",
            PortKind::Pci => "pci",
            PortKind::Bluetooth => "bluetooth",
            PortKind::Unknown => "unknown",
        }
    }
}

/// Enumerate serial ports present on this host.
pub fn available_ports() -> Result<Vec<PortInfo>> {
    let ports = serialport::available_ports().map_err(TransportError::Enumerate)?;
    Ok(ports
        .into_iter()
        .map(|info| {
            let (kind, product) = match info.port_type {
                SerialPortType::UsbPort(usb) => (PortKind::Usb, usb.product),
                SerialPortType::PciPort => (PortKind::Pci, None),
                SerialPortType::BluetoothPort => (PortKind::Bluetooth, None),
                SerialPortType::Unknown => (PortKind::Unknown, None),
            };
            PortInfo {
                name: info.port_name,
                kind,
                product,
            }
        })
        .collect())
}
