use std::sync::mpsc;

use super::PlaybackDriver;
use super::inbox::EventInbox;
use super::player::AudioPlayer;
use super::types::{AudioCmd, DriverError, DriverEvent, TaggedEvent};

fn tagged(generation: u64, event: DriverEvent) -> TaggedEvent {
    TaggedEvent { generation, event }
}

#[test]
fn inbox_drops_events_from_superseded_loads() {
    let (tx, rx) = mpsc::channel();
    let mut inbox = EventInbox::new(rx);

    assert_eq!(inbox.next_generation(), 1);
    tx.send(tagged(1, DriverEvent::TimeUpdate(3.0))).unwrap();
    assert_eq!(inbox.poll(), Some(DriverEvent::TimeUpdate(3.0)));

    // A new load starts while the old track still reports progress and ends.
    assert_eq!(inbox.next_generation(), 2);
    tx.send(tagged(1, DriverEvent::TimeUpdate(4.0))).unwrap();
    tx.send(tagged(1, DriverEvent::Ended)).unwrap();
    tx.send(tagged(2, DriverEvent::LoadedMetadata(180.0))).unwrap();

    assert_eq!(inbox.poll(), Some(DriverEvent::LoadedMetadata(180.0)));
    assert_eq!(inbox.poll(), None);
}

#[test]
fn inbox_is_empty_when_sender_is_gone() {
    let (tx, rx) = mpsc::channel::<TaggedEvent>();
    let mut inbox = EventInbox::new(rx);
    inbox.next_generation();
    drop(tx);
    assert_eq!(inbox.poll(), None);
}

#[test]
fn decode_reports_missing_files_as_open_errors() {
    let dir = tempfile::tempdir().unwrap();
    let track = super::testing::track("missing.mp3");
    let track = crate::library::Track {
        path: dir.path().join("missing.mp3"),
        ..track
    };

    let err = super::sink::decode_track(&track).err().unwrap();
    assert!(matches!(err, super::DriverError::Open { .. }));
}

#[test]
fn decode_reports_garbage_as_decode_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("noise.mp3");
    std::fs::write(&path, b"definitely not audio").unwrap();
    let track = crate::library::Track {
        path,
        ..super::testing::track("noise.mp3")
    };

    let err = super::sink::decode_track(&track).err().unwrap();
    assert!(matches!(err, super::DriverError::Decode { .. }));
}

#[test]
fn inbox_forgets_the_load_after_an_error_for_it() {
    let (tx, rx) = mpsc::channel();
    let mut inbox = EventInbox::new(rx);

    inbox.next_generation();
    inbox.mark_loaded();
    tx.send(tagged(1, DriverEvent::LoadedMetadata(90.0))).unwrap();
    assert_eq!(inbox.poll(), Some(DriverEvent::LoadedMetadata(90.0)));
    assert!(inbox.is_loaded());

    tx.send(tagged(1, DriverEvent::Error("no audio output device".into())))
        .unwrap();
    assert!(matches!(inbox.poll(), Some(DriverEvent::Error(_))));
    assert!(!inbox.is_loaded());
}

#[test]
fn inbox_ignores_errors_from_superseded_loads() {
    let (tx, rx) = mpsc::channel();
    let mut inbox = EventInbox::new(rx);

    inbox.next_generation();
    inbox.next_generation();
    inbox.mark_loaded();
    tx.send(tagged(1, DriverEvent::Error("old track".into()))).unwrap();
    assert_eq!(inbox.poll(), None);
    assert!(inbox.is_loaded());
}

#[test]
fn player_refuses_to_play_with_nothing_loaded() {
    let (mut player, commands, _events) = AudioPlayer::detached();

    assert!(matches!(player.play(), Err(DriverError::NotLoaded)));
    player.pause();
    player.set_position(10.0);
    assert!(commands.try_recv().is_err());
}

#[test]
fn player_refuses_to_play_after_a_failed_load() {
    let (mut player, commands, _events) = AudioPlayer::detached();
    let dir = tempfile::tempdir().unwrap();
    let track = crate::library::Track {
        path: dir.path().join("gone.mp3"),
        ..super::testing::track("gone.mp3")
    };

    assert!(matches!(player.load(&track), Err(DriverError::Open { .. })));
    assert!(matches!(commands.try_recv(), Ok(AudioCmd::Stop)));
    assert!(matches!(player.play(), Err(DriverError::NotLoaded)));
    assert!(commands.try_recv().is_err());
}

#[test]
fn player_refuses_to_resume_once_the_output_reported_an_error() {
    let (mut player, _commands, events) = AudioPlayer::detached();

    // Stand in for a load the output thread accepted, then failed to play.
    let generation = player.assume_loaded();
    events
        .send(tagged(generation, DriverEvent::Error("no audio output device".into())))
        .unwrap();

    assert!(matches!(player.poll_event(), Some(DriverEvent::Error(_))));
    assert!(matches!(player.play(), Err(DriverError::NotLoaded)));
}
