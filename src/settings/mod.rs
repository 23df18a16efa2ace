//! almixer settings handling
//!
//! Settings live in a single TOML file under the user's config
//! directory.  A missing file is created with defaults on first start;
//! a broken one is reported in the log and ignored.
//!
//! ```toml
//! card = "hw:1"
//! exact = false
//! color = true
//! poll_interval_ms = 100
//! ```

mod app;
pub use app::AppSettings;

use crate::error::SettingsError;
use directories::ProjectDirs;
use std::{
    fs::{self, OpenOptions},
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};
use tracing::{info, warn};

const SETTINGS_FILE: &str = "settings.toml";

/// Look up the project directories
pub fn dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("tech", "sigsegv", "almixer")
}

/// Default location of the settings file
pub fn default_path() -> Option<PathBuf> {
    dirs().map(|d| d.config_dir().join(SETTINGS_FILE))
}

/// Main settings tree
#[derive(Debug)]
pub struct Settings {
    path: PathBuf,
    pub app: AppSettings,
}

impl Settings {
    /// Load settings from `path`, writing defaults there if it doesn't exist
    pub fn init(path: impl Into<PathBuf>) -> Result<Settings, SettingsError> {
        let path = path.into();
        let exists = path.exists();
        let this = Self {
            app: load_path(&path),
            path,
        };
        if !exists {
            info!("Creating default settings at {}", this.path.display());
            this.sync()?;
        }
        Ok(this)
    }

    /// Write the settings back to disk
    pub fn sync(&self) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let text = toml::to_string_pretty(&self.app)?;
        OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.path)
            .and_then(|mut f| f.write_all(text.as_bytes()))?;
        Ok(())
    }
}

fn load_path(path: &Path) -> AppSettings {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => return AppSettings::default(),
        Err(e) => {
            warn!("Can't read {}: {}", path.display(), e);
            return AppSettings::default();
        }
    };
    toml::from_str(&text).unwrap_or_else(|e| {
        warn!("Ignoring {}: {}", path.display(), e);
        AppSettings::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_scaffolded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(SETTINGS_FILE);
        let s = Settings::init(&path).unwrap();
        assert_eq!(s.app, AppSettings::default());
        assert!(path.exists());
        let again = Settings::init(&path).unwrap();
        assert_eq!(again.app, AppSettings::default());
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        fs::write(&path, "card = \"hw:1\"\nexact = true\n").unwrap();
        let s = Settings::init(&path).unwrap();
        assert_eq!(s.app.card.as_deref(), Some("hw:1"));
        assert!(s.app.exact);
        assert!(s.app.color);
        assert_eq!(s.app.poll_interval_ms, 100);
    }

    #[test]
    fn unreadable_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        // a directory where the file should be can't be read as text
        let path = dir.path().join(SETTINGS_FILE);
        fs::create_dir(&path).unwrap();
        assert_eq!(load_path(&path), AppSettings::default());
        let s = Settings::init(&path).unwrap();
        assert_eq!(s.app, AppSettings::default());
        assert!(path.is_dir());
    }

    #[test]
    fn broken_file_is_ignored_and_kept() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        fs::write(&path, "exact = \"very\"").unwrap();
        let s = Settings::init(&path).unwrap();
        assert_eq!(s.app, AppSettings::default());
        assert_eq!(fs::read_to_string(&path).unwrap(), "exact = \"very\"");
    }
}
