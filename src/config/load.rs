use std::{env, path::PathBuf};

use super::schema::Settings;

const APP_DIR: &str = "serenata";

impl Settings {
    /// Layer the optional config file under `SERENATA__*` environment
    /// variables. Anything neither sets keeps its struct default.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let mut builder = ::config::Config::builder();

        if let Some(path) = resolve_config_path() {
            builder = builder.add_source(::config::File::from(path).required(false));
        }

        builder
            .add_source(
                ::config::Environment::with_prefix("SERENATA")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Reject values the player cannot work with.
    pub fn validate(&self) -> Result<(), String> {
        if self.audio.tick_ms == 0 {
            return Err("audio.tick_ms must be >= 1".to_string());
        }
        if self.controls.scrub_seconds == 0 {
            return Err("controls.scrub_seconds must be >= 1".to_string());
        }
        let step = self.controls.volume_step;
        if !(step > 0.0 && step <= 1.0) {
            return Err(format!("controls.volume_step must be in (0, 1], got {step}"));
        }
        Ok(())
    }
}

/// `$SERENATA_CONFIG_PATH`, else the XDG default.
pub fn resolve_config_path() -> Option<PathBuf> {
    env::var_os("SERENATA_CONFIG_PATH")
        .map(PathBuf::from)
        .or_else(default_config_path)
}

/// `$XDG_CONFIG_HOME/serenata/config.toml`, or under `~/.config`.
pub fn default_config_path() -> Option<PathBuf> {
    xdg_home("XDG_CONFIG_HOME", &[".config"]).map(|d| d.join(APP_DIR).join("config.toml"))
}

/// `$XDG_STATE_HOME/serenata/serenata.log`, or under `~/.local/state`.
pub fn default_log_path() -> Option<PathBuf> {
    xdg_home("XDG_STATE_HOME", &[".local", "state"]).map(|d| d.join(APP_DIR).join("serenata.log"))
}

fn xdg_home(var: &str, fallback: &[&str]) -> Option<PathBuf> {
    if let Some(dir) = env::var_os(var) {
        return Some(PathBuf::from(dir));
    }
    env::var_os("HOME").map(|home| fallback.iter().fold(PathBuf::from(home), |p, c| p.join(c)))
}
