use super::*;
use crate::config::LibrarySettings;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

#[test]
fn display_name_strips_the_fixed_suffix() {
    assert_eq!(display_name("Alan Walker - Faded.mp3", ".mp3"), "Alan Walker - Faded");
    assert_eq!(display_name("LP - Lost On You.MP3", ".mp3"), "LP - Lost On You");
    assert_eq!(display_name("Riptide.flac", ".mp3"), "Riptide.flac");
    assert_eq!(display_name("mp3.mp3 cover", ".mp3"), "mp3.mp3 cover");
}

#[test]
fn display_name_keeps_ids_that_would_become_empty() {
    assert_eq!(display_name(".mp3", ".mp3"), ".mp3");
    assert_eq!(display_name("song.mp3", ""), "song.mp3");
}

#[test]
fn scan_filters_non_audio_and_sorts_by_display_case_insensitive() {
    let dir = tempdir().unwrap();

    fs::write(dir.path().join("b.mp3"), b"not a real mp3").unwrap();
    fs::write(dir.path().join("A.mp3"), b"not a real mp3").unwrap();
    fs::write(dir.path().join("c.txt"), b"ignore me").unwrap();

    let catalog = scan(dir.path(), &LibrarySettings::default());
    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.get(0).unwrap().id, "A.mp3");
    assert_eq!(catalog.get(0).unwrap().display, "A");
    assert_eq!(catalog.get(1).unwrap().display, "b");
    assert!(catalog.get(0).unwrap().duration_hint.is_none());
}

#[test]
fn scan_respects_include_hidden_false() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join(".hidden.mp3"), b"not real").unwrap();
    fs::write(dir.path().join("visible.mp3"), b"not real").unwrap();

    let settings = LibrarySettings {
        include_hidden: false,
        ..LibrarySettings::default()
    };
    let catalog = scan(dir.path(), &settings);

    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.get(0).unwrap().display, "visible");
}

#[test]
fn scan_respects_recursive_false() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("root.mp3"), b"not real").unwrap();
    let sub = dir.path().join("sub");
    fs::create_dir_all(&sub).unwrap();
    fs::write(sub.join("child.mp3"), b"not real").unwrap();

    let settings = LibrarySettings {
        recursive: false,
        ..LibrarySettings::default()
    };
    let catalog = scan(dir.path(), &settings);
    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.get(0).unwrap().display, "root");
}

#[test]
fn from_names_keeps_configured_order_and_missing_entries() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("Vance Joy - Riptide.mp3"), b"not real").unwrap();

    let names = vec![
        "Vance Joy - Riptide.mp3".to_string(),
        "  ".to_string(),
        "Alan Walker - Faded.mp3".to_string(),
    ];
    let catalog = from_names(dir.path(), &names, &LibrarySettings::default());

    let displays: Vec<&str> = catalog.iter().map(|t| t.display.as_str()).collect();
    assert_eq!(displays, vec!["Vance Joy - Riptide", "Alan Walker - Faded"]);
    assert_eq!(
        catalog.get(1).unwrap().path,
        dir.path().join("Alan Walker - Faded.mp3")
    );
}

#[test]
fn load_catalog_prefers_the_configured_list() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("scanned.mp3"), b"not real").unwrap();

    let settings = LibrarySettings {
        tracks: vec!["listed.mp3".to_string()],
        ..LibrarySettings::default()
    };
    let catalog = load_catalog(dir.path(), &settings);
    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.get(0).unwrap().id, "listed.mp3");

    let scanned = load_catalog(Path::new(dir.path()), &LibrarySettings::default());
    assert_eq!(scanned.get(0).unwrap().id, "scanned.mp3");
}
