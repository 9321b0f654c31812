//! Utilities for creating `rodio` sinks from track sources.
//!
//! The helper here encapsulates opening/decoding a file and preparing a
//! paused `Sink` at the requested start position. Decoding happens
//! eagerly, so a successful return means the source is ready to play
//! through; failures are reported, not fatal.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use rodio::{Decoder, OutputStream, Sink, Source};

/// Create a paused `Sink` for the file at `source` that starts playback
/// at `start_at`.
pub(super) fn create_sink_at(
    handle: &OutputStream,
    source: &Path,
    start_at: Duration,
) -> Result<Sink, String> {
    let file = File::open(source)
        .map_err(|e| format!("failed to open {}: {e}", source.display()))?;

    let decoded = Decoder::new(BufReader::new(file))
        .map_err(|e| format!("failed to decode {}: {e}", source.display()))?
        // `skip_duration` is our seeking primitive; even Duration::ZERO is fine.
        .skip_duration(start_at);

    let sink = Sink::connect_new(handle.mixer());
    sink.append(decoded);
    sink.pause();
    Ok(sink)
}
