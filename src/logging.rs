//! File logging.
//!
//! The terminal belongs to the UI, so log records go to a file. `RUST_LOG`
//! overrides the configured filter.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use env_logger::{Builder, Env, Target};

use crate::config::{LoggingSettings, default_log_path};

/// Where log records go: the configured file, else the XDG state location.
pub fn resolve_log_path(settings: &LoggingSettings) -> Option<PathBuf> {
    settings.file.clone().or_else(default_log_path)
}

fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Install the global logger. Returns the log file in use, if any.
pub fn init(settings: &LoggingSettings) -> Result<Option<PathBuf>, Box<dyn std::error::Error>> {
    let Some(path) = resolve_log_path(settings) else {
        return Ok(None);
    };
    let file = open_log_file(&path)?;

    Builder::from_env(Env::default().default_filter_or(settings.level.as_str()))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()?;

    Ok(Some(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_file_wins() {
        let settings = LoggingSettings {
            file: Some(PathBuf::from("/tmp/custom.log")),
            ..LoggingSettings::default()
        };
        assert_eq!(
            resolve_log_path(&settings),
            Some(PathBuf::from("/tmp/custom.log"))
        );
    }

    #[test]
    fn open_log_file_creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("serenata.log");
        open_log_file(&path).unwrap();
        assert!(path.is_file());
    }
}
