//! Stream demultiplexing for uartcap.
//!
//! The device interleaves human-readable telemetry lines with binary JPEG
//! payloads on a single serial stream, bracketing each payload with textual
//! `IMG_START` / `IMG_END` markers. [`Demux`] separates the two channels:
//! bytes are accumulated raw and the markers are found by substring search,
//! so payload bytes that happen to fall in the printable range are never
//! filtered or re-encoded.
//!
//! The wire format carries no length prefix; a payload containing a literal
//! marker byte sequence is misframed. That is a protocol limitation, not
//! something this crate tries to paper over.

pub mod demux;
pub mod marker;
pub mod validate;

pub use demux::{Demux, Event, ImageRecord, Mode};
pub use marker::{END, START};
pub use validate::{validate, Verdict, IMAGE_SIGNATURE};
