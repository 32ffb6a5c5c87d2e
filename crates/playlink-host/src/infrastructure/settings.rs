//! TOML-based settings for the input subsystem.
//!
//! Loaded once at agent start from the agent's config directory, e.g.:
//!
//! ```toml
//! [gamepad]
//! enabled = true
//! ```
//!
//! Missing file and missing fields both fall back to defaults, so a fresh
//! install works with no config present and older config files keep working
//! when new fields are added.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// Error type for settings file operations.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// A file system I/O error occurred.
    #[error("I/O error reading settings at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse settings TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Input subsystem settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputSettings {
    #[serde(default)]
    pub gamepad: GamepadSettings,
}

/// Gamepad passthrough settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GamepadSettings {
    /// When `false`, sessions never contact the virtual controller bus and
    /// run without gamepad passthrough.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl Default for GamepadSettings {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

impl InputSettings {
    /// Reads and parses the settings file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] on I/O or parse failure. A missing file is
    /// an I/O error here; use [`load_or_default`](Self::load_or_default)
    /// for first-run tolerance.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let text = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&text)?)
    }

    /// Like [`load`](Self::load), but a missing file yields the defaults
    /// silently and any other failure yields the defaults with a warning.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(settings) => settings,
            Err(SettingsError::Io { ref source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                Self::default()
            }
            Err(err) => {
                warn!("couldn't load input settings, using defaults: {err}");
                Self::default()
            }
        }
    }
}
