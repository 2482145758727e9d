use thiserror::Error;

use crate::audio::DriverError;

/// Why a transport command did not take effect.
///
/// None of these are fatal: the state is left consistent and the caller only
/// decides how loudly to log.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("track index {index} is out of range (catalog has {len} tracks)")]
    InvalidIndex { index: usize, len: usize },
    #[error("no track selected")]
    NoActiveTrack,
    #[error("catalog is empty")]
    EmptyCatalog,
    #[error("track length is not known yet")]
    UnknownDuration,
    #[error("volume must be a number")]
    InvalidVolume,
    #[error("playback driver unavailable: {0}")]
    DriverUnavailable(#[from] DriverError),
}

impl TransportError {
    /// Whether the command was simply not applicable (as opposed to the
    /// driver failing to play).
    pub fn is_noop(&self) -> bool {
        !matches!(self, Self::DriverUnavailable(_))
    }
}
