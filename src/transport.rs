//! Transport: the playback state machine.
//!
//! `Transport` owns the catalog, the transport state and the playback driver.
//! Its methods are the only way to change what is playing; views read the
//! state through accessors.

mod error;
mod machine;
mod state;

pub use error::TransportError;
pub use machine::Transport;
pub use state::{PlaybackState, PresentationMode, TransportState};
