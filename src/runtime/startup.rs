use log::info;

use crate::app::App;
use crate::audio::PlaybackDriver;
use crate::config::UiSettings;
use crate::library::Catalog;
use crate::transport::Transport;

/// Wire the catalog and a driver into a fresh, idle app.
pub fn build_app<D: PlaybackDriver>(
    catalog: Catalog,
    driver: D,
    dir: &str,
    ui: &UiSettings,
) -> App<D> {
    info!("{} track(s) in {dir}", catalog.len());

    let mut app = App::new(Transport::new(catalog, driver));
    app.follow_playback = ui.follow_playback;
    app.set_current_dir(dir.to_string());
    app
}
