//! Mode-transition markers.
//!
//! Both markers are case-sensitive ASCII and matched as substrings — they
//! may sit anywhere inside a line or chunk, and may arrive split across
//! reads.

use memchr::memmem;

/// Signals the beginning of a binary image payload.
pub const START: &[u8] = b"IMG_START";

/// Signals the end of a binary image payload. Free-form metadata may follow
/// on the same line.
pub const END: &[u8] = b"IMG_END";

/// Longest marker length. Scans keep `MAX_LEN - 1` trailing bytes unclaimed
/// so a marker split across chunks is still found.
pub(crate) const MAX_LEN: usize = START.len();

/// A marker occurrence at a byte offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Hit {
    Start(usize),
    End(usize),
}

/// Find the earliest marker occurrence in `buf` at or after `from`.
pub(crate) fn earliest_hit(buf: &[u8], from: usize) -> Option<Hit> {
    let window = &buf[from..];
    let start = memmem::find(window, START).map(|pos| pos + from);
    let end = memmem::find(window, END).map(|pos| pos + from);

    match (start, end) {
        (Some(s), Some(e)) if s < e => Some(Hit::Start(s)),
        (_, Some(e)) => Some(Hit::End(e)),
        (Some(s), None) => Some(Hit::Start(s)),
        (None, None) => None,
    }
}
