use std::sync::mpsc::{self, Sender};
use std::thread::JoinHandle;
use std::time::Duration;

use log::{debug, warn};

use crate::config::AudioSettings;
use crate::library::Track;

use super::driver::PlaybackDriver;
use super::inbox::EventInbox;
use super::sink::decode_track;
use super::thread::spawn_audio_thread;
use super::types::{AudioCmd, DriverError, DriverEvent};

/// Rodio-backed [`PlaybackDriver`]. The output device lives on a dedicated
/// thread; this handle only sends commands and reads notifications.
pub struct AudioPlayer {
    tx: Sender<AudioCmd>,
    inbox: EventInbox,
    join: Option<JoinHandle<()>>,
}

impl AudioPlayer {
    pub fn new(audio_settings: AudioSettings) -> Self {
        let (tx, rx) = mpsc::channel::<AudioCmd>();
        let (event_tx, event_rx) = mpsc::channel();

        let audio_handle = spawn_audio_thread(rx, event_tx, audio_settings);

        Self {
            tx,
            inbox: EventInbox::new(event_rx),
            join: Some(audio_handle),
        }
    }

    /// A player without an output thread; the test holds the other channel ends.
    #[cfg(test)]
    pub(super) fn detached() -> (
        Self,
        mpsc::Receiver<AudioCmd>,
        Sender<super::types::TaggedEvent>,
    ) {
        let (tx, rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let player = Self {
            tx,
            inbox: EventInbox::new(event_rx),
            join: None,
        };
        (player, rx, event_tx)
    }

    /// Start a load without decoding anything, as if the output thread took it.
    #[cfg(test)]
    pub(super) fn assume_loaded(&mut self) -> u64 {
        let generation = self.inbox.next_generation();
        self.inbox.mark_loaded();
        generation
    }

    fn send(&self, cmd: AudioCmd) -> Result<(), DriverError> {
        self.tx.send(cmd).map_err(|_| DriverError::Disconnected)
    }

    /// Fade out, stop the output thread and wait for it.
    pub fn quit_softly(&mut self, fade_out: Duration) {
        let _ = self.send(AudioCmd::Quit {
            fade_out_ms: fade_out.as_millis() as u64,
        });

        if let Some(h) = self.join.take() {
            let _ = h.join();
        }
    }
}

impl PlaybackDriver for AudioPlayer {
    fn load(&mut self, track: &Track) -> Result<(), DriverError> {
        // Whatever was loaded before is superseded, even if this load fails.
        let generation = self.inbox.next_generation();
        let (source, duration) = match decode_track(track) {
            Ok(decoded) => decoded,
            Err(e) => {
                let _ = self.send(AudioCmd::Stop);
                return Err(e);
            }
        };
        debug!("loading {} (generation {generation})", track.path.display());
        self.send(AudioCmd::Load {
            generation,
            source: Box::new(source),
            duration,
        })?;
        self.inbox.mark_loaded();
        Ok(())
    }

    fn play(&mut self) -> Result<(), DriverError> {
        if !self.inbox.is_loaded() {
            return Err(DriverError::NotLoaded);
        }
        self.send(AudioCmd::Play)
    }

    fn pause(&mut self) {
        if self.inbox.is_loaded() && self.send(AudioCmd::Pause).is_err() {
            warn!("pause dropped: audio thread is gone");
        }
    }

    fn set_position(&mut self, seconds: f64) {
        if self.inbox.is_loaded() && self.send(AudioCmd::Seek(seconds)).is_err() {
            warn!("seek dropped: audio thread is gone");
        }
    }

    fn set_volume(&mut self, level: f64) {
        if self.send(AudioCmd::SetVolume(level as f32)).is_err() {
            warn!("volume change dropped: audio thread is gone");
        }
    }

    fn poll_event(&mut self) -> Option<DriverEvent> {
        self.inbox.poll()
    }
}
