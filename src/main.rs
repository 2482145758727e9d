mod app;
mod audio;
mod config;
mod library;
mod logging;
mod mpris;
mod runtime;
mod timefmt;
mod transport;
mod ui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()
}
