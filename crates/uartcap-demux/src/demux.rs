use bytes::{Buf, Bytes, BytesMut};
use memchr::{memchr, memmem};
use tracing::debug;

use crate::marker::{self, Hit};

/// How newly arrived bytes are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Line-oriented telemetry.
    Text,
    /// Raw binary payload, collected until an end marker.
    Image,
}

/// One demultiplexed output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A completed telemetry line, lossily decoded and trimmed.
    Line(String),
    /// A start marker line was seen; payload bytes follow.
    ImageBegin {
        /// Index the payload will carry if it completes.
        index: u64,
    },
    /// An end marker was seen; the payload is complete.
    ImageEnd(ImageRecord),
}

/// A completed binary payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRecord {
    /// Emission index, strictly increasing from 0.
    pub index: u64,
    /// Every byte between the start line and the end marker, verbatim.
    pub payload: Bytes,
}

/// Splits one interleaved byte stream into telemetry lines and binary image
/// payloads.
///
/// Feed it chunks of any size and alignment — a marker, a multi-byte UTF-8
/// sequence, or a newline may be split across calls. All cross-call state
/// (current mode, partial line, partial payload) lives inside the value, so
/// independent instances are cheap and tests need no transport.
pub struct Demux {
    mode: Mode,
    text: BytesMut,
    image: BytesMut,
    /// Prefix of `image` already known to contain no marker.
    scanned: usize,
    completed: u64,
}

impl Demux {
    pub fn new() -> Self {
        Self {
            mode: Mode::Text,
            text: BytesMut::new(),
            image: BytesMut::new(),
            scanned: 0,
            completed: 0,
        }
    }

    /// Current interpretation mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Number of image records emitted so far.
    pub fn images_emitted(&self) -> u64 {
        self.completed
    }

    /// Consume one chunk and return the completed outputs, in stream order.
    ///
    /// Never fails. An image whose end marker never arrives is simply held;
    /// it is lost only if the stream ends for good.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<Event> {
        let mut events = Vec::new();
        let mut pending = BytesMut::from(chunk);

        loop {
            let switched = match self.mode {
                Mode::Text => {
                    self.text.unsplit(pending.split());
                    self.drain_lines(&mut events, &mut pending)
                }
                Mode::Image => {
                    self.image.unsplit(pending.split());
                    self.scan_image(&mut events, &mut pending)
                }
            };
            if !switched {
                return events;
            }
        }
    }

    /// Extract every newline-terminated line from the text accumulator.
    ///
    /// Returns true when a start line switched the mode; the buffered bytes
    /// after the start line are moved into `pending` as image input.
    fn drain_lines(&mut self, events: &mut Vec<Event>, pending: &mut BytesMut) -> bool {
        while let Some(nl) = memchr(b'\n', &self.text) {
            let line = self.text.split_to(nl + 1);
            let body = &line[..nl];

            if memmem::find(body, marker::START).is_some() {
                debug!(index = self.completed, "image receive begun");
                events.push(Event::ImageBegin {
                    index: self.completed,
                });
                self.image.clear();
                self.scanned = 0;
                self.mode = Mode::Image;
                *pending = self.text.split();
                return true;
            }

            if memmem::find(body, marker::END).is_some() {
                // Stray end with no image in flight; swallow the line.
                debug!("dropping stray end marker line");
                continue;
            }

            let text = String::from_utf8_lossy(body);
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                events.push(Event::Line(trimmed.to_string()));
            }
        }
        false
    }

    /// Look for a marker in the unscanned part of the image accumulator.
    ///
    /// Returns true when the mode switched back to text; the bytes after the
    /// marker are moved into `pending` for line handling.
    fn scan_image(&mut self, events: &mut Vec<Event>, pending: &mut BytesMut) -> bool {
        match marker::earliest_hit(&self.image, self.scanned) {
            Some(Hit::End(pos)) => {
                let payload = self.image.split_to(pos).freeze();
                self.image.advance(marker::END.len());
                let rest = self.image.split();

                debug!(
                    index = self.completed,
                    bytes = payload.len(),
                    "image receive complete"
                );
                events.push(Event::ImageEnd(ImageRecord {
                    index: self.completed,
                    payload,
                }));
                self.completed += 1;
                self.scanned = 0;
                self.mode = Mode::Text;
                *pending = rest;
                true
            }
            Some(Hit::Start(pos)) => {
                // A fresh start aborts the in-flight image. The marker is
                // kept so the normal start-line rule runs once its newline
                // arrives, even if the line is split across chunks.
                debug!(discarded = pos, "restarting image capture mid-payload");
                let rest = self.image.split_off(pos);
                self.image.clear();
                self.scanned = 0;
                self.mode = Mode::Text;
                *pending = rest;
                true
            }
            None => {
                self.scanned = self.image.len().saturating_sub(marker::MAX_LEN - 1);
                false
            }
        }
    }
}

impl Default for Demux {
    fn default() -> Self {
        Self::new()
    }
}
