//! Opening and decoding tracks for the output thread.
//!
//! Decoding happens on the caller's thread so a broken file is reported by
//! `load` itself instead of surfacing later as an asynchronous error.

use std::fs::File;
use std::io::BufReader;

use rodio::{Decoder, OutputStream, Sink, Source};

use crate::library::Track;

use super::types::{DriverError, TrackSource};

/// Open and decode `track`, returning the source and its length in seconds
/// (`0.0` when neither the decoder nor the tags know it).
pub(super) fn decode_track(track: &Track) -> Result<(TrackSource, f64), DriverError> {
    let file = File::open(&track.path).map_err(|source| DriverError::Open {
        path: track.path.clone(),
        source,
    })?;

    let source = Decoder::new(BufReader::new(file)).map_err(|e| DriverError::Decode {
        path: track.path.clone(),
        reason: e.to_string(),
    })?;

    let duration = source
        .total_duration()
        .or(track.duration_hint)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0);

    Ok((source, duration))
}

/// Create a paused `Sink` playing `source` at `volume`.
pub(super) fn create_sink(stream: &OutputStream, source: TrackSource, volume: f32) -> Sink {
    let sink = Sink::connect_new(stream.mixer());
    sink.set_volume(volume);
    sink.append(source);
    sink.pause();
    sink
}
