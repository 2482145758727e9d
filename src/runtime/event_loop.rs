use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use log::{debug, info, warn};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::audio::PlaybackDriver;
use crate::config;
use crate::mpris::{ControlCmd, MprisHandle};
use crate::runtime::mpris_sync::{update_mpris, update_mpris_levels};
use crate::transport::{PlaybackState, TransportError};
use crate::ui;

/// State tracked by the runtime event loop across iterations.
pub struct EventLoopState {
    /// Internal two-key prefix state used for `gg` handling.
    pub pending_gg: bool,
    /// Last-known playing index as emitted to MPRIS.
    pub last_mpris_index: Option<usize>,
    /// Last-known playback state as emitted to MPRIS.
    pub last_mpris_playback: PlaybackState,
    last_mpris_duration: f64,
}

impl EventLoopState {
    pub fn new<D: PlaybackDriver>(app: &App<D>) -> Self {
        let state = app.transport.state();
        Self {
            pending_gg: false,
            last_mpris_index: state.current_index,
            last_mpris_playback: app.transport.playback_state(),
            last_mpris_duration: state.duration,
        }
    }

    fn mpris_stale<D: PlaybackDriver>(&self, app: &App<D>) -> bool {
        let state = app.transport.state();
        state.current_index != self.last_mpris_index
            || app.transport.playback_state() != self.last_mpris_playback
            || state.duration != self.last_mpris_duration
    }

    fn mark_mpris_synced<D: PlaybackDriver>(&mut self, app: &App<D>) {
        let state = app.transport.state();
        self.last_mpris_index = state.current_index;
        self.last_mpris_playback = app.transport.playback_state();
        self.last_mpris_duration = state.duration;
    }
}

/// Log a rejected transition. Nothing is surfaced to the user: the state
/// machine already left itself consistent.
fn absorb(result: Result<(), TransportError>, action: &str) {
    match result {
        Ok(()) => {}
        Err(e) if e.is_noop() => debug!("{action}: {e}"),
        Err(e) => warn!("{action}: {e}"),
    }
}

/// Main terminal event loop: applies driver notifications, draws, then
/// handles MPRIS commands and key presses. Returns `Ok(())` when the user
/// asks to quit.
pub fn run<D: PlaybackDriver>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App<D>,
    mpris: &MprisHandle,
    control_rx: &mpsc::Receiver<ControlCmd>,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        app.transport.pump_driver_events();
        app.follow_now_playing();

        let width = terminal.size()?.width;
        app.fit_to_width(width, settings.ui.single_panel_max_width);

        // Media keys and auto-advance change playback without a key press here.
        if state.mpris_stale(app) {
            update_mpris(mpris, app);
            state.mark_mpris_synced(app);
        } else {
            update_mpris_levels(mpris, app);
        }

        terminal.draw(|f| ui::draw(f, app, &settings.ui, &settings.controls))?;

        while let Ok(cmd) = control_rx.try_recv() {
            if handle_control_cmd(cmd, app) {
                info!("quit requested over MPRIS");
                return Ok(());
            }
        }

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, settings, app, state) {
                    return Ok(());
                }
            }
        }
    }
}

/// Apply one MPRIS command. Returns true when the player should quit.
pub(super) fn handle_control_cmd<D: PlaybackDriver>(cmd: ControlCmd, app: &mut App<D>) -> bool {
    debug!("control: {cmd:?}");
    match cmd {
        ControlCmd::Quit => return true,
        ControlCmd::Play => match app.transport.playback_state() {
            PlaybackState::Idle => {
                if app.has_tracks() {
                    absorb(app.play_cursor(), "play");
                }
            }
            PlaybackState::Paused => absorb(app.transport.toggle_play_pause(), "play"),
            PlaybackState::Playing => {}
        },
        ControlCmd::Pause => {
            if app.transport.playback_state() == PlaybackState::Playing {
                absorb(app.transport.toggle_play_pause(), "pause");
            }
        }
        ControlCmd::PlayPause => absorb(app.transport.toggle_play_pause(), "play/pause"),
        ControlCmd::Next => absorb(app.transport.next(), "next"),
        ControlCmd::Prev => absorb(app.transport.prev(), "previous"),
        ControlCmd::SeekBy(delta) => absorb(app.transport.seek_by(delta), "seek"),
        ControlCmd::SetVolume(level) => absorb(app.transport.set_volume(level), "volume"),
    }

    false
}

/// Apply one key press. Returns true when the player should quit.
pub(super) fn handle_key_event<D: PlaybackDriver>(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App<D>,
    state: &mut EventLoopState,
) -> bool {
    let scrub = settings.controls.scrub_seconds as f64;
    let step = settings.controls.volume_step;

    if key.code != KeyCode::Char('g') {
        state.pending_gg = false;
    }

    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('g') => {
            if state.pending_gg {
                state.pending_gg = false;
                app.cursor_top();
            } else {
                state.pending_gg = true;
            }
        }
        KeyCode::Char('G') => app.cursor_bottom(),
        KeyCode::Char('j') | KeyCode::Down => app.cursor_down(),
        KeyCode::Char('k') | KeyCode::Up => app.cursor_up(),
        KeyCode::Enter => {
            if app.has_tracks() {
                absorb(app.play_cursor(), "select");
            }
        }
        KeyCode::Char(' ') | KeyCode::Char('p') => {
            absorb(app.transport.toggle_play_pause(), "play/pause")
        }
        KeyCode::Char('l') => absorb(app.transport.next(), "next"),
        KeyCode::Char('h') => absorb(app.transport.prev(), "previous"),
        KeyCode::Right | KeyCode::Char('L') => absorb(app.transport.seek_by(scrub), "seek"),
        KeyCode::Left | KeyCode::Char('H') => absorb(app.transport.seek_by(-scrub), "seek"),
        KeyCode::Char('+') | KeyCode::Char('=') => {
            absorb(app.transport.change_volume(step), "volume")
        }
        KeyCode::Char('-') => absorb(app.transport.change_volume(-step), "volume"),
        KeyCode::Tab | KeyCode::Char('o') => app.transport.show_now_playing(),
        KeyCode::Esc | KeyCode::Backspace => app.transport.show_list(),
        _ => {}
    }

    false
}
