/// Coarse playback state derived from [`TransportState`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PlaybackState {
    /// Nothing selected yet.
    #[default]
    Idle,
    Paused,
    Playing,
}

/// How the presentation layer arranges the list and the now-playing view.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PresentationMode {
    /// One of list / now playing fills the screen.
    SinglePanel,
    /// Sidebar list next to the now-playing view.
    #[default]
    MultiPanel,
}

impl PresentationMode {
    /// Pick the mode for a terminal `width` columns wide.
    pub fn for_width(width: u16, single_panel_max_width: u16) -> Self {
        if width <= single_panel_max_width {
            Self::SinglePanel
        } else {
            Self::MultiPanel
        }
    }
}

/// Everything the views need to know about playback.
///
/// `is_playing` implies `current_index` is set, `current_index` is always a
/// valid catalog index and `volume` stays in `[0, 1]`.
#[derive(Clone, Debug, PartialEq)]
pub struct TransportState {
    pub current_index: Option<usize>,
    pub is_playing: bool,
    /// Elapsed seconds, as last reported by the driver (or set by a seek).
    pub position: f64,
    /// Total seconds of the loaded track; `0.0` until the driver knows.
    pub duration: f64,
    pub volume: f64,
    /// Only meaningful in [`PresentationMode::SinglePanel`].
    pub now_playing_visible: bool,
}

impl Default for TransportState {
    fn default() -> Self {
        Self {
            current_index: None,
            is_playing: false,
            position: 0.0,
            duration: 0.0,
            volume: 1.0,
            now_playing_visible: false,
        }
    }
}

impl TransportState {
    pub fn playback_state(&self) -> PlaybackState {
        match (self.current_index, self.is_playing) {
            (None, _) => PlaybackState::Idle,
            (Some(_), false) => PlaybackState::Paused,
            (Some(_), true) => PlaybackState::Playing,
        }
    }
}
