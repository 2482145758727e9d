use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::thread::JoinHandle;
use std::time::Duration;

use log::{error, info, warn};
use rodio::{OutputStream, OutputStreamBuilder, Sink};

use crate::config::AudioSettings;

use super::sink::create_sink;
use super::types::{AudioCmd, DriverError, DriverEvent, TaggedEvent};

/// Output-side state owned by the audio thread.
struct Output {
    /// The output device, or why it could not be opened.
    stream: Result<OutputStream, String>,
    sink: Option<Sink>,
    generation: u64,
    paused: bool,
    ended_sent: bool,
    volume: f32,
    events: Sender<TaggedEvent>,
}

impl Output {
    fn emit(&self, event: DriverEvent) {
        let _ = self.events.send(TaggedEvent {
            generation: self.generation,
            event,
        });
    }

    fn position(&self) -> f64 {
        self.sink
            .as_ref()
            .map_or(0.0, |s| s.get_pos().as_secs_f64())
    }

    fn stop(&mut self) {
        if let Some(s) = self.sink.take() {
            s.stop();
        }
        self.paused = true;
    }

    fn handle(&mut self, cmd: AudioCmd) -> bool {
        match cmd {
            AudioCmd::Load {
                generation,
                source,
                duration,
            } => {
                self.stop();
                self.generation = generation;
                self.ended_sent = false;
                let stream = match self.stream.as_ref() {
                    Ok(stream) => stream,
                    Err(reason) => {
                        let err = DriverError::NoOutput(reason.clone());
                        self.emit(DriverEvent::Error(err.to_string()));
                        return true;
                    }
                };
                self.sink = Some(create_sink(stream, *source, self.volume));
                self.emit(DriverEvent::LoadedMetadata(duration));
                self.emit(DriverEvent::TimeUpdate(0.0));
            }
            AudioCmd::Stop => self.stop(),
            AudioCmd::Play => {
                if let Some(s) = self.sink.as_ref() {
                    s.play();
                    self.paused = false;
                }
            }
            AudioCmd::Pause => {
                if let Some(s) = self.sink.as_ref() {
                    s.pause();
                    self.paused = true;
                    self.emit(DriverEvent::TimeUpdate(self.position()));
                }
            }
            AudioCmd::Seek(seconds) => {
                if let Some(s) = self.sink.as_ref() {
                    // `try_seek` fails for sources that cannot seek; keep playing where we are.
                    if let Err(e) = s.try_seek(Duration::from_secs_f64(seconds.max(0.0))) {
                        warn!("seek to {seconds:.1}s failed: {e}");
                    }
                    self.emit(DriverEvent::TimeUpdate(self.position()));
                }
            }
            AudioCmd::SetVolume(level) => {
                self.volume = level.clamp(0.0, 1.0);
                if let Some(s) = self.sink.as_ref() {
                    s.set_volume(self.volume);
                }
            }
            AudioCmd::Quit { fade_out_ms } => {
                if let Some(s) = self.sink.as_ref() {
                    // Fade out gently before stopping.
                    if !self.paused {
                        fade_out_sink(s, self.volume, fade_out_ms);
                    }
                    s.stop();
                }
                return false;
            }
        }
        true
    }

    /// Periodic work: progress notifications and end-of-track detection.
    fn tick(&mut self) {
        let Some(s) = self.sink.as_ref() else {
            return;
        };
        if self.paused {
            return;
        }
        if s.empty() {
            if !self.ended_sent {
                self.ended_sent = true;
                self.emit(DriverEvent::Ended);
            }
        } else {
            self.emit(DriverEvent::TimeUpdate(self.position()));
        }
    }
}

fn fade_out_sink(sink: &Sink, from: f32, fade_out_ms: u64) {
    if fade_out_ms == 0 {
        sink.set_volume(0.0);
        return;
    }
    let steps: u64 = 20;
    let step_ms = (fade_out_ms / steps).max(1);
    for step in 1..=steps {
        let t = step as f32 / steps as f32;
        sink.set_volume(from * (1.0 - t));
        thread::sleep(Duration::from_millis(step_ms));
    }
    sink.set_volume(0.0);
}

pub(super) fn spawn_audio_thread(
    rx: Receiver<AudioCmd>,
    events: Sender<TaggedEvent>,
    audio_settings: AudioSettings,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let stream = match OutputStreamBuilder::open_default_stream() {
            Ok(mut stream) => {
                // rodio logs to stderr when OutputStream is dropped. That's useful in debugging,
                // but noisy for a TUI app.
                stream.log_on_drop(false);
                Ok(stream)
            }
            Err(e) => {
                error!("no audio output device: {e}");
                Err(e.to_string())
            }
        };

        let mut output = Output {
            stream,
            sink: None,
            generation: 0,
            paused: true,
            ended_sent: false,
            volume: 1.0,
            events,
        };

        let tick = Duration::from_millis(audio_settings.tick_ms.max(1));
        loop {
            match rx.recv_timeout(tick) {
                Ok(cmd) => {
                    if !output.handle(cmd) {
                        break;
                    }
                }
                Err(RecvTimeoutError::Timeout) => output.tick(),
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
        info!("audio thread stopped");
    })
}
