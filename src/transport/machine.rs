use log::{debug, warn};

use crate::audio::{DriverEvent, PlaybackDriver};
use crate::library::{Catalog, Track};

use super::error::TransportError;
use super::state::{PlaybackState, PresentationMode, TransportState};

/// Sanitize a driver-reported time: non-finite and negative values become 0.
fn seconds_or_zero(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Owner of the transport state and the playback driver.
pub struct Transport<D: PlaybackDriver> {
    catalog: Catalog,
    state: TransportState,
    mode: PresentationMode,
    driver: D,
}

impl<D: PlaybackDriver> Transport<D> {
    /// Start idle: no selection, not playing, full volume.
    pub fn new(catalog: Catalog, driver: D) -> Self {
        Self {
            catalog,
            state: TransportState::default(),
            mode: PresentationMode::default(),
            driver,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn state(&self) -> &TransportState {
        &self.state
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    pub fn mode(&self) -> PresentationMode {
        self.mode
    }

    pub fn playback_state(&self) -> PlaybackState {
        self.state.playback_state()
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.state
            .current_index
            .and_then(|i| self.catalog.get(i))
    }

    /// Whether the now-playing view is on screen. Always true with a sidebar.
    pub fn now_playing_visible(&self) -> bool {
        self.mode == PresentationMode::MultiPanel || self.state.now_playing_visible
    }

    pub fn set_presentation_mode(&mut self, mode: PresentationMode) {
        if self.mode != mode {
            debug!("presentation mode: {mode:?}");
            self.mode = mode;
        }
    }

    /// Load and play the track at `index`.
    ///
    /// If the driver cannot load or start it, the selection is kept but
    /// playback stays stopped.
    pub fn select(&mut self, index: usize) -> Result<(), TransportError> {
        let Some(track) = self.catalog.get(index) else {
            return Err(TransportError::InvalidIndex {
                index,
                len: self.catalog.len(),
            });
        };

        debug!("select #{index}: {}", track.id);
        self.state.current_index = Some(index);
        self.state.position = 0.0;
        self.state.duration = 0.0;
        if self.mode == PresentationMode::SinglePanel {
            self.state.now_playing_visible = true;
        }

        let started = match self.driver.load(track) {
            Ok(()) => {
                self.driver.set_volume(self.state.volume);
                self.driver.play()
            }
            Err(e) => Err(e),
        };

        match started {
            Ok(()) => {
                self.state.is_playing = true;
                Ok(())
            }
            Err(e) => {
                warn!("cannot play {}: {e}", track.id);
                self.state.is_playing = false;
                Err(e.into())
            }
        }
    }

    /// Pause when playing, resume when paused.
    pub fn toggle_play_pause(&mut self) -> Result<(), TransportError> {
        if self.state.current_index.is_none() {
            return Err(TransportError::NoActiveTrack);
        }

        if self.state.is_playing {
            self.driver.pause();
            self.state.is_playing = false;
            return Ok(());
        }

        match self.driver.play() {
            Ok(()) => {
                self.state.is_playing = true;
                Ok(())
            }
            Err(e) => {
                warn!("cannot resume playback: {e}");
                self.state.is_playing = false;
                Err(e.into())
            }
        }
    }

    /// Play the following track, wrapping to the first one.
    /// With nothing selected this starts the first track.
    pub fn next(&mut self) -> Result<(), TransportError> {
        let len = self.catalog.len();
        if len == 0 {
            return Err(TransportError::EmptyCatalog);
        }
        let target = match self.state.current_index {
            Some(i) => (i + 1) % len,
            None => 0,
        };
        self.select(target)
    }

    /// Play the preceding track, wrapping to the last one.
    /// With nothing selected this starts the last track.
    pub fn prev(&mut self) -> Result<(), TransportError> {
        let len = self.catalog.len();
        if len == 0 {
            return Err(TransportError::EmptyCatalog);
        }
        let target = match self.state.current_index {
            Some(i) => (i + len - 1) % len,
            None => len - 1,
        };
        self.select(target)
    }

    /// Move to `seconds`, clamped to `[0, duration]`.
    ///
    /// Until the track length is known there is no range to seek in, so the
    /// position is left where it is.
    pub fn seek(&mut self, seconds: f64) -> Result<(), TransportError> {
        if self.state.current_index.is_none() {
            return Err(TransportError::NoActiveTrack);
        }
        if self.state.duration <= 0.0 {
            return Err(TransportError::UnknownDuration);
        }
        let target = if seconds.is_nan() {
            0.0
        } else {
            seconds.clamp(0.0, self.state.duration)
        };
        self.driver.set_position(target);
        self.state.position = target;
        Ok(())
    }

    /// Seek relative to the current position.
    pub fn seek_by(&mut self, delta: f64) -> Result<(), TransportError> {
        self.seek(self.state.position + delta)
    }

    /// Set the output level, clamped to `[0, 1]`.
    ///
    /// The level is kept with no track selected and applied to the next load.
    pub fn set_volume(&mut self, level: f64) -> Result<(), TransportError> {
        if level.is_nan() {
            return Err(TransportError::InvalidVolume);
        }
        let level = level.clamp(0.0, 1.0);
        if self.state.current_index.is_some() {
            self.driver.set_volume(level);
        }
        self.state.volume = level;
        Ok(())
    }

    /// Change the output level by `delta`, clamped to `[0, 1]`.
    pub fn change_volume(&mut self, delta: f64) -> Result<(), TransportError> {
        self.set_volume(self.state.volume + delta)
    }

    /// Single-panel mode: bring the track list to the front.
    pub fn show_list(&mut self) {
        if self.mode == PresentationMode::SinglePanel {
            self.state.now_playing_visible = false;
        }
    }

    /// Single-panel mode: bring the now-playing view to the front.
    pub fn show_now_playing(&mut self) {
        if self.mode == PresentationMode::SinglePanel {
            self.state.now_playing_visible = true;
        }
    }

    pub fn on_progress(&mut self, seconds: f64) {
        self.state.position = seconds_or_zero(seconds);
    }

    pub fn on_metadata_loaded(&mut self, seconds: f64) {
        self.state.duration = seconds_or_zero(seconds);
    }

    /// The current track finished: advance, wrapping after the last one.
    pub fn on_ended(&mut self) -> Result<(), TransportError> {
        debug!("track ended");
        self.next()
    }

    /// The driver gave up on the current media after accepting it.
    pub fn on_driver_error(&mut self, message: &str) {
        warn!("playback driver error: {message}");
        self.state.is_playing = false;
    }

    /// Dispatch one driver notification.
    pub fn handle_driver_event(&mut self, event: DriverEvent) -> Result<(), TransportError> {
        match event {
            DriverEvent::TimeUpdate(t) => self.on_progress(t),
            DriverEvent::LoadedMetadata(d) => self.on_metadata_loaded(d),
            DriverEvent::Ended => return self.on_ended(),
            DriverEvent::Error(message) => self.on_driver_error(&message),
        }
        Ok(())
    }

    /// Drain every pending driver notification, in delivery order.
    pub fn pump_driver_events(&mut self) {
        while let Some(event) = self.driver.poll_event() {
            if let Err(e) = self.handle_driver_event(event) {
                debug!("driver event not applied: {e}");
            }
        }
    }
}
