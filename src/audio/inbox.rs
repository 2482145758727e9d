use std::sync::mpsc::Receiver;

use super::types::{DriverEvent, TaggedEvent};

/// Receiving side of the output thread's notifications.
///
/// Only events belonging to the most recent load get through, so a track that
/// was replaced mid-load can no longer move the position or end playback.
/// It also remembers whether the current load is still playable: an `Error`
/// for it means the output thread has nothing to play.
pub(super) struct EventInbox {
    rx: Receiver<TaggedEvent>,
    generation: u64,
    loaded: bool,
}

impl EventInbox {
    pub fn new(rx: Receiver<TaggedEvent>) -> Self {
        Self {
            rx,
            generation: 0,
            loaded: false,
        }
    }

    /// Start a new load and return its generation. Nothing counts as loaded
    /// until [`EventInbox::mark_loaded`].
    pub fn next_generation(&mut self) -> u64 {
        self.generation += 1;
        self.loaded = false;
        self.generation
    }

    pub fn mark_loaded(&mut self) {
        self.loaded = true;
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn poll(&mut self) -> Option<DriverEvent> {
        while let Ok(tagged) = self.rx.try_recv() {
            if tagged.generation == self.generation {
                if matches!(tagged.event, DriverEvent::Error(_)) {
                    self.loaded = false;
                }
                return Some(tagged.event);
            }
        }
        None
    }
}
