//! Application view model: `App`.
//!
//! `App` owns the [`Transport`] and adds the list cursor used to pick tracks.
//! Playback changes always go through the transport.

use crate::audio::PlaybackDriver;
use crate::transport::{PresentationMode, Transport, TransportError};

/// The main application model.
pub struct App<D: PlaybackDriver> {
    pub transport: Transport<D>,
    /// Highlighted row in the track list.
    pub cursor: usize,
    /// Move the cursor to the playing track whenever it changes.
    pub follow_playback: bool,
    pub current_dir: Option<String>,
    last_followed: Option<usize>,
}

impl<D: PlaybackDriver> App<D> {
    pub fn new(transport: Transport<D>) -> Self {
        Self {
            transport,
            cursor: 0,
            follow_playback: true,
            current_dir: None,
            last_followed: None,
        }
    }

    /// Record the current directory in the app state.
    pub fn set_current_dir(&mut self, dir: String) {
        self.current_dir = Some(dir);
    }

    /// Return true if the catalog contains any tracks.
    pub fn has_tracks(&self) -> bool {
        !self.transport.catalog().is_empty()
    }

    pub fn track_count(&self) -> usize {
        self.transport.catalog().len()
    }

    /// Pick the presentation mode for a terminal `width` columns wide.
    pub fn fit_to_width(&mut self, width: u16, single_panel_max_width: u16) {
        self.transport
            .set_presentation_mode(PresentationMode::for_width(width, single_panel_max_width));
    }

    /// Move the cursor down, wrapping to the first track.
    pub fn cursor_down(&mut self) {
        let len = self.track_count();
        if len > 0 {
            self.cursor = (self.cursor + 1) % len;
        }
    }

    /// Move the cursor up, wrapping to the last track.
    pub fn cursor_up(&mut self) {
        let len = self.track_count();
        if len > 0 {
            self.cursor = (self.cursor + len - 1) % len;
        }
    }

    pub fn cursor_top(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_bottom(&mut self) {
        self.cursor = self.track_count().saturating_sub(1);
    }

    /// Play the track under the cursor.
    pub fn play_cursor(&mut self) -> Result<(), TransportError> {
        self.transport.select(self.cursor)
    }

    /// Jump the cursor to the playing track when it changed since last time.
    pub fn follow_now_playing(&mut self) {
        let current = self.transport.state().current_index;
        if current == self.last_followed {
            return;
        }
        self.last_followed = current;
        if let (true, Some(i)) = (self.follow_playback, current) {
            self.cursor = i;
        }
    }
}
