use std::path::Path;
use std::time::Duration;

use log::{debug, warn};
use lofty::prelude::AudioFile;
use walkdir::WalkDir;

use crate::config::LibrarySettings;

use super::display::display_name;
use super::model::{Catalog, Track};

fn is_audio_file(path: &Path, settings: &LibrarySettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Read the track length from the file tags; `None` for unreadable files.
fn probe_duration(path: &Path) -> Option<Duration> {
    lofty::read_from_path(path)
        .ok()
        .map(|tagged| tagged.properties().duration())
        .filter(|d| !d.is_zero())
}

fn make_track(path: &Path, settings: &LibrarySettings) -> Track {
    let id = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("UNKNOWN")
        .to_string();
    let display = display_name(&id, &settings.display_suffix);

    Track {
        path: path.to_path_buf(),
        duration_hint: probe_duration(path),
        id,
        display,
    }
}

/// Walk `dir` and collect every audio file, sorted by display name
/// (case-insensitive).
pub fn scan(dir: &Path, settings: &LibrarySettings) -> Catalog {
    let mut tracks: Vec<Track> = Vec::new();

    let mut walker = WalkDir::new(dir).follow_links(settings.follow_links);

    // Non-recursive = only the root directory.
    let depth_cap = if settings.recursive {
        settings.max_depth
    } else {
        Some(1)
    };
    if let Some(d) = depth_cap {
        walker = walker.max_depth(d);
    }

    for entry in walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(Result::ok)
    {
        let path = entry.path();
        if path.is_file()
            && (settings.include_hidden || !is_hidden(path))
            && is_audio_file(path, settings)
        {
            tracks.push(make_track(path, settings));
        }
    }

    tracks.sort_by(|a, b| a.display.to_lowercase().cmp(&b.display.to_lowercase()));
    debug!("scanned {} tracks under {}", tracks.len(), dir.display());
    Catalog::new(tracks)
}

/// Build a catalog from an explicit, ordered list of file names resolved
/// against `dir`. Order is kept as given; missing files stay in the list and
/// fail later when the driver tries to load them.
pub fn from_names(dir: &Path, names: &[String], settings: &LibrarySettings) -> Catalog {
    names
        .iter()
        .map(|name| name.trim())
        .filter(|name| !name.is_empty())
        .map(|name| {
            let path = dir.join(name);
            if !path.is_file() {
                warn!("catalog entry {} does not exist", path.display());
            }
            let mut track = make_track(&path, settings);
            // Keep the identifier exactly as configured, even for nested paths.
            track.id = name.to_string();
            track.display = display_name(name, &settings.display_suffix);
            track
        })
        .collect()
}

/// Pick the catalog source: the configured list when present, else a scan.
pub fn load_catalog(dir: &Path, settings: &LibrarySettings) -> Catalog {
    if settings.tracks.is_empty() {
        scan(dir, settings)
    } else {
        from_names(dir, &settings.tracks, settings)
    }
}
