use std::path::PathBuf;
use std::slice;
use std::time::Duration;

/// A playable track. Immutable once it is part of a [`Catalog`].
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    /// Where the playback driver loads the media from.
    pub path: PathBuf,
    /// Identifier of the track: its file name, extension included.
    pub id: String,
    /// Name shown in lists and in the now-playing view.
    pub display: String,
    /// Length read from the file tags, when available.
    pub duration_hint: Option<Duration>,
}

/// Ordered list of tracks, indexed `0..len()`.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    tracks: Vec<Track>,
}

impl Catalog {
    pub fn new(tracks: Vec<Track>) -> Self {
        Self { tracks }
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    pub fn iter(&self) -> slice::Iter<'_, Track> {
        self.tracks.iter()
    }
}

impl FromIterator<Track> for Catalog {
    fn from_iter<I: IntoIterator<Item = Track>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
