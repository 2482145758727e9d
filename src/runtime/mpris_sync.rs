use crate::app::App;
use crate::audio::PlaybackDriver;
use crate::mpris::MprisHandle;

/// Publish the now-playing track and playback status.
pub fn update_mpris<D: PlaybackDriver>(mpris: &MprisHandle, app: &App<D>) {
    let state = app.transport.state();
    mpris.set_track_metadata(
        state.current_index,
        app.transport.current_track(),
        state.duration,
    );
    mpris.set_playback(app.transport.playback_state());
    update_mpris_levels(mpris, app);
}

/// Position and volume change too often to gate on; push them every pass.
pub fn update_mpris_levels<D: PlaybackDriver>(mpris: &MprisHandle, app: &App<D>) {
    let state = app.transport.state();
    mpris.set_position(state.position);
    mpris.set_volume(state.volume);
}
