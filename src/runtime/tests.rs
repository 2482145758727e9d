use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::event_loop::{EventLoopState, handle_control_cmd, handle_key_event};
use super::startup::build_app;
use crate::app::App;
use crate::audio::testing::{Call, RecordingDriver, catalog};
use crate::config::{Settings, UiSettings};
use crate::mpris::ControlCmd;
use crate::transport::{PlaybackState, PresentationMode};

fn app() -> App<RecordingDriver> {
    build_app(
        catalog(&["A.mp3", "B.mp3", "C.mp3"]),
        RecordingDriver::new(),
        "/music",
        &UiSettings::default(),
    )
}

fn press(app: &mut App<RecordingDriver>, state: &mut EventLoopState, code: KeyCode) -> bool {
    handle_key_event(
        KeyEvent::new(code, KeyModifiers::NONE),
        &Settings::default(),
        app,
        state,
    )
}

#[test]
fn build_app_starts_idle() {
    let app = app();
    assert_eq!(app.track_count(), 3);
    assert_eq!(app.current_dir.as_deref(), Some("/music"));
    assert_eq!(app.transport.playback_state(), PlaybackState::Idle);
    assert!(app.follow_playback);
}

#[test]
fn enter_plays_the_track_under_the_cursor() {
    let mut app = app();
    let mut state = EventLoopState::new(&app);

    press(&mut app, &mut state, KeyCode::Char('j'));
    press(&mut app, &mut state, KeyCode::Enter);

    assert_eq!(app.transport.state().current_index, Some(1));
    assert!(app.transport.state().is_playing);
}

#[test]
fn double_g_jumps_to_top_and_is_reset_by_other_keys() {
    let mut app = app();
    let mut state = EventLoopState::new(&app);

    press(&mut app, &mut state, KeyCode::Char('G'));
    assert_eq!(app.cursor, 2);

    press(&mut app, &mut state, KeyCode::Char('g'));
    press(&mut app, &mut state, KeyCode::Char('k'));
    press(&mut app, &mut state, KeyCode::Char('g'));
    assert_eq!(app.cursor, 1);

    press(&mut app, &mut state, KeyCode::Char('g'));
    assert_eq!(app.cursor, 0);
    assert!(!state.pending_gg);
}

#[test]
fn space_without_selection_does_nothing() {
    let mut app = app();
    let mut state = EventLoopState::new(&app);

    assert!(!press(&mut app, &mut state, KeyCode::Char(' ')));
    assert!(!app.transport.state().is_playing);
    assert!(app.transport.driver().calls.is_empty());
}

#[test]
fn transport_keys_drive_the_state_machine() {
    let mut app = app();
    let mut state = EventLoopState::new(&app);

    press(&mut app, &mut state, KeyCode::Char('l'));
    assert_eq!(app.transport.state().current_index, Some(0));
    press(&mut app, &mut state, KeyCode::Char('h'));
    assert_eq!(app.transport.state().current_index, Some(2));

    press(&mut app, &mut state, KeyCode::Char('p'));
    assert_eq!(app.transport.playback_state(), PlaybackState::Paused);

    app.transport.on_metadata_loaded(120.0);
    press(&mut app, &mut state, KeyCode::Right);
    assert_eq!(app.transport.state().position, 5.0);
    press(&mut app, &mut state, KeyCode::Char('H'));
    assert_eq!(app.transport.state().position, 0.0);

    press(&mut app, &mut state, KeyCode::Char('-'));
    assert!((app.transport.state().volume - 0.95).abs() < 1e-9);
    press(&mut app, &mut state, KeyCode::Char('+'));
    press(&mut app, &mut state, KeyCode::Char('+'));
    assert_eq!(app.transport.state().volume, 1.0);
}

#[test]
fn panel_keys_switch_views_in_single_panel_mode() {
    let mut app = app();
    let mut state = EventLoopState::new(&app);
    app.fit_to_width(60, 90);
    assert_eq!(app.transport.mode(), PresentationMode::SinglePanel);

    press(&mut app, &mut state, KeyCode::Tab);
    assert!(app.transport.now_playing_visible());
    press(&mut app, &mut state, KeyCode::Esc);
    assert!(!app.transport.now_playing_visible());
}

#[test]
fn q_asks_to_quit() {
    let mut app = app();
    let mut state = EventLoopState::new(&app);
    assert!(press(&mut app, &mut state, KeyCode::Char('q')));
}

#[test]
fn mpris_play_starts_the_cursor_track_when_idle() {
    let mut app = app();
    app.cursor = 2;

    assert!(!handle_control_cmd(ControlCmd::Play, &mut app));
    assert_eq!(app.transport.state().current_index, Some(2));
    assert!(app.transport.state().is_playing);

    // Already playing: no second load.
    let calls = app.transport.driver().calls.len();
    handle_control_cmd(ControlCmd::Play, &mut app);
    assert_eq!(app.transport.driver().calls.len(), calls);
}

#[test]
fn mpris_pause_only_pauses() {
    let mut app = app();
    handle_control_cmd(ControlCmd::Pause, &mut app);
    assert!(app.transport.driver().calls.is_empty());

    handle_control_cmd(ControlCmd::Next, &mut app);
    handle_control_cmd(ControlCmd::Pause, &mut app);
    handle_control_cmd(ControlCmd::Pause, &mut app);
    assert_eq!(app.transport.playback_state(), PlaybackState::Paused);
    assert_eq!(app.transport.driver().calls.last(), Some(&Call::Pause));

    handle_control_cmd(ControlCmd::Play, &mut app);
    assert_eq!(app.transport.playback_state(), PlaybackState::Playing);
}

#[test]
fn mpris_seek_volume_and_quit() {
    let mut app = app();
    handle_control_cmd(ControlCmd::Next, &mut app);
    app.transport.on_metadata_loaded(60.0);

    handle_control_cmd(ControlCmd::SeekBy(12.0), &mut app);
    assert_eq!(app.transport.state().position, 12.0);
    handle_control_cmd(ControlCmd::SetVolume(0.4), &mut app);
    assert_eq!(app.transport.state().volume, 0.4);
    handle_control_cmd(ControlCmd::SetVolume(f64::NAN), &mut app);
    assert_eq!(app.transport.state().volume, 0.4);

    assert!(handle_control_cmd(ControlCmd::Quit, &mut app));
}
