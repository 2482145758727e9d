//! Audio-related small types.
//!
//! Commands sent to the output thread, notifications coming back from it and
//! the driver error type.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use rodio::Decoder;
use thiserror::Error;

/// Notifications emitted by a playback driver.
#[derive(Debug, Clone, PartialEq)]
pub enum DriverEvent {
    /// Current playback position, in seconds.
    TimeUpdate(f64),
    /// Total length of the loaded media, in seconds.
    LoadedMetadata(f64),
    /// The loaded media played to its end.
    Ended,
    /// The output failed after the media was accepted.
    Error(String),
}

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("failed to open {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode {path:?}: {reason}")]
    Decode { path: PathBuf, reason: String },
    #[error("no audio output device: {0}")]
    NoOutput(String),
    #[error("no media loaded")]
    NotLoaded,
    #[error("audio thread is gone")]
    Disconnected,
}

pub(super) type TrackSource = Decoder<BufReader<File>>;

pub(super) enum AudioCmd {
    /// Replace the current media. Events for older generations are dropped.
    Load {
        generation: u64,
        source: Box<TrackSource>,
        duration: f64,
    },
    /// Drop the current media.
    Stop,
    Play,
    Pause,
    /// Seek to an absolute position in seconds.
    Seek(f64),
    /// Output volume in `[0, 1]`.
    SetVolume(f32),
    /// Quit the audio thread, optionally fading out over `fade_out_ms` milliseconds.
    Quit { fade_out_ms: u64 },
}

/// A driver event together with the load it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct TaggedEvent {
    pub generation: u64,
    pub event: DriverEvent,
}
