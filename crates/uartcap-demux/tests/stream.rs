//! Whole-stream scenarios exercising the public demultiplexer API.

use uartcap_demux::{Demux, Event, Mode};

fn run_in_chunks(stream: &[u8], chunk_size: usize) -> Vec<Event> {
    let mut demux = Demux::new();
    let mut events = Vec::new();
    for chunk in stream.chunks(chunk_size.max(1)) {
        events.extend(demux.feed(chunk));
    }
    events
}

fn interleaved_stream() -> Vec<u8> {
    let mut stream = Vec::new();
    stream.extend_from_slice(b"INFO boot ok\r\n");
    stream.extend_from_slice(b"Pan: 90.0 deg | Tilt: 45.0 deg\r\n");
    stream.extend_from_slice(b"IMG_START\n");
    stream.extend_from_slice(&[0xFF, 0xD8, 0x00, 0x1F, 0x7E, 0x49, 0x4D, 0x47, 0xFF, 0xD9]);
    stream.extend_from_slice(b"IMG_END size=10\n");
    stream.extend_from_slice(b"INFO battery=86\n");
    stream.extend_from_slice(b"IMG_START\n");
    stream.extend_from_slice(&[0xFF, 0xD8, 0x0A, 0x0D, 0xFF, 0xD9]);
    stream.extend_from_slice(b"IMG_END size=6\n");
    stream
}

#[test]
fn framing_is_chunk_boundary_invariant() {
    let stream = interleaved_stream();
    let reference = run_in_chunks(&stream, stream.len());

    for chunk_size in [1, 2, 3, 5, 7, 8, 9, 13, 64] {
        let events = run_in_chunks(&stream, chunk_size);
        assert_eq!(events, reference, "chunk size {chunk_size} diverged");
    }
}

#[test]
fn interleaved_stream_demuxes_both_channels() {
    let events = run_in_chunks(&interleaved_stream(), 4);

    let lines: Vec<&str> = events
        .iter()
        .filter_map(|e| match e {
            Event::Line(line) => Some(line.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(
        lines,
        [
            "INFO boot ok",
            "Pan: 90.0 deg | Tilt: 45.0 deg",
            "size=10",
            "INFO battery=86",
            "size=6",
        ]
    );

    let payloads: Vec<&[u8]> = events
        .iter()
        .filter_map(|e| match e {
            Event::ImageEnd(record) => Some(record.payload.as_ref()),
            _ => None,
        })
        .collect();
    assert_eq!(payloads.len(), 2);
    assert_eq!(
        payloads[0],
        &[0xFF, 0xD8, 0x00, 0x1F, 0x7E, 0x49, 0x4D, 0x47, 0xFF, 0xD9]
    );
    assert_eq!(payloads[1], &[0xFF, 0xD8, 0x0A, 0x0D, 0xFF, 0xD9]);
}

#[test]
fn no_telemetry_from_within_image_span() {
    let mut stream = Vec::new();
    stream.extend_from_slice(b"IMG_START\n");
    // Payload full of newline-terminated printable runs.
    stream.extend_from_slice(&[0xFF, 0xD8]);
    stream.extend_from_slice(b"looks like a line\nanother one\n");
    stream.extend_from_slice(b"IMG_END\n");

    let events = run_in_chunks(&stream, 3);
    let lines: Vec<&Event> = events
        .iter()
        .filter(|e| matches!(e, Event::Line(_)))
        .collect();
    assert!(lines.is_empty(), "image span leaked telemetry: {lines:?}");

    let payloads: Vec<&[u8]> = events
        .iter()
        .filter_map(|e| match e {
            Event::ImageEnd(record) => Some(record.payload.as_ref()),
            _ => None,
        })
        .collect();
    assert_eq!(payloads.len(), 1);
    assert_eq!(
        payloads[0],
        b"\xFF\xD8looks like a line\nanother one\n".as_ref()
    );
}

#[test]
fn marker_only_stream_yields_one_empty_record() {
    let events = run_in_chunks(b"IMG_START\nIMG_END\n", 1);
    let begins = events
        .iter()
        .filter(|e| matches!(e, Event::ImageBegin { .. }))
        .count();
    let ends: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            Event::ImageEnd(record) => Some(record),
            _ => None,
        })
        .collect();
    assert_eq!(begins, 1);
    assert_eq!(ends.len(), 1);
    assert!(ends[0].payload.is_empty());
}

#[test]
fn demux_ends_back_in_text_mode() {
    let stream = interleaved_stream();
    let mut demux = Demux::new();
    for chunk in stream.chunks(5) {
        demux.feed(chunk);
    }
    assert_eq!(demux.mode(), Mode::Text);
    assert_eq!(demux.images_emitted(), 2);
}
