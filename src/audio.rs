//! Playback driver: the contract the transport commands, and the rodio
//! implementation that plays through the default output device.

mod driver;
mod inbox;
mod player;
mod sink;
mod thread;
mod types;

pub use driver::PlaybackDriver;
pub use player::AudioPlayer;
pub use types::{DriverError, DriverEvent};

#[cfg(test)]
pub(crate) mod testing;

#[cfg(test)]
mod tests;
