//! In-memory driver used by tests across the crate.

use std::collections::VecDeque;
use std::path::PathBuf;

use crate::library::{Catalog, Track};

use super::driver::PlaybackDriver;
use super::types::{DriverError, DriverEvent};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    Load(String),
    Play,
    Pause,
    SetPosition(f64),
    SetVolume(f64),
}

/// Records every command and replays queued events.
///
/// Like the rodio player, it refuses to play until a load succeeds, and an
/// `Error` event takes the loaded media away again.
#[derive(Debug, Default)]
pub(crate) struct RecordingDriver {
    pub calls: Vec<Call>,
    pub events: VecDeque<DriverEvent>,
    pub fail_load: bool,
    pub fail_play: bool,
    pub loaded: bool,
}

impl RecordingDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_event(&mut self, event: DriverEvent) {
        self.events.push_back(event);
    }
}

impl PlaybackDriver for RecordingDriver {
    fn load(&mut self, track: &Track) -> Result<(), DriverError> {
        self.calls.push(Call::Load(track.id.clone()));
        self.loaded = !self.fail_load;
        if self.fail_load {
            return Err(DriverError::Decode {
                path: track.path.clone(),
                reason: "unsupported format".to_string(),
            });
        }
        Ok(())
    }

    fn play(&mut self) -> Result<(), DriverError> {
        self.calls.push(Call::Play);
        if !self.loaded {
            return Err(DriverError::NotLoaded);
        }
        if self.fail_play {
            return Err(DriverError::Disconnected);
        }
        Ok(())
    }

    fn pause(&mut self) {
        self.calls.push(Call::Pause);
    }

    fn set_position(&mut self, seconds: f64) {
        self.calls.push(Call::SetPosition(seconds));
    }

    fn set_volume(&mut self, level: f64) {
        self.calls.push(Call::SetVolume(level));
    }

    fn poll_event(&mut self) -> Option<DriverEvent> {
        let event = self.events.pop_front();
        if matches!(event, Some(DriverEvent::Error(_))) {
            self.loaded = false;
        }
        event
    }
}

pub(crate) fn track(id: &str) -> Track {
    Track {
        path: PathBuf::from("/music").join(id),
        id: id.to_string(),
        display: crate::library::display_name(id, ".mp3"),
        duration_hint: None,
    }
}

pub(crate) fn catalog(ids: &[&str]) -> Catalog {
    ids.iter().map(|id| track(id)).collect()
}
