/// Errors that can occur on the serial transport.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Failed to open the named serial port.
    #[error("failed to open {port}: {source}")]
    Open {
        port: String,
        source: serialport::Error,
    },

    /// Failed to enumerate serial ports on this host.
    #[error("failed to enumerate serial ports: {0}")]
    Enumerate(#[source] serialport::Error),

    /// An I/O error occurred while reading from the link.
    #[error("serial I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TransportError>;
