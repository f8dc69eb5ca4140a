//! Serial transport layer for uartcap.
//!
//! Opens the point-to-point serial link (8 data bits, no parity, one stop
//! bit) and exposes it as a chunked [`ByteSource`]. This is the lowest layer
//! of uartcap; the demultiplexer consumes whatever this layer reads and
//! never touches the port itself.

pub mod error;
pub mod serial;

pub use error::{Result, TransportError};
pub use serial::{available_ports, ByteSource, LinkConfig, PortInfo, PortKind, SerialLink};
