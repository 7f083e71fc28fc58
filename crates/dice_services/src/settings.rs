//! Settings management

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors reading the host settings file.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse settings file '{path}': {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
}

/// Host settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub loader: LoaderSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoaderSettings {
    /// Propagate an entry-chunk failure instead of logging and continuing.
    pub strict_entry: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            loader: LoaderSettings {
                strict_entry: false,
            },
        }
    }
}

impl Settings {
    /// Read settings from a JSON file.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let raw = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| SettingsError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Read settings, falling back to defaults when the file is absent or
    /// unreadable.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(settings) => settings,
            Err(SettingsError::Io { .. }) => {
                tracing::debug!(path = %path.display(), "no settings file, using defaults");
                Self::default()
            }
            Err(err) => {
                tracing::warn!(%err, "ignoring unreadable settings file");
                Self::default()
            }
        }
    }
}
