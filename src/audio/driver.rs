use crate::library::Track;

use super::types::{DriverError, DriverEvent};

/// The media element the transport commands.
///
/// Commands never block on decoding or output; the driver reports what
/// actually happens through [`PlaybackDriver::poll_event`].
pub trait PlaybackDriver {
    /// Replace the current media with `track`, paused at position zero.
    fn load(&mut self, track: &Track) -> Result<(), DriverError>;

    fn play(&mut self) -> Result<(), DriverError>;

    fn pause(&mut self);

    /// Move the playback position to `seconds`.
    fn set_position(&mut self, seconds: f64);

    /// Set the output level, `0.0..=1.0`.
    fn set_volume(&mut self, level: f64);

    /// Next pending notification, if any. Never blocks.
    fn poll_event(&mut self) -> Option<DriverEvent>;
}
