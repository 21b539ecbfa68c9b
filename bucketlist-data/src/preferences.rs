//! Small user preferences kept outside the location store.
//!
//! The map style is the only preference today. Reads never fail: a missing
//! or unreadable preferences file yields the defaults.

use std::io;

use bucketlist_core::MapStyle;
use camino::{Utf8Path, Utf8PathBuf};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::store::config::project_dirs;

/// File name of the preferences document inside the config directory.
pub const PREFERENCES_FILE_NAME: &str = "preferences.json";

/// Errors raised when saving preferences.
#[derive(Debug, Error)]
pub enum PreferencesError {
    /// The preferences could not be encoded.
    #[error("failed to encode preferences: {0}")]
    Encode(#[source] serde_json::Error),
    /// The preferences file could not be replaced.
    #[error("failed to write preferences to {path}: {source}")]
    Write {
        /// Location of the preferences file.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

/// Source of persisted user preferences.
pub trait PreferencesStore {
    /// The chosen base map style.
    fn map_style(&self) -> MapStyle;

    /// Choose a new base map style.
    ///
    /// # Errors
    ///
    /// Returns an error when the preference cannot be saved. The new value is
    /// still reported by [`map_style`](Self::map_style) afterwards.
    fn set_map_style(&mut self, style: MapStyle) -> Result<(), PreferencesError>;
}

/// Preferences held only for the lifetime of the value.
#[derive(Debug, Clone, Copy, Default)]
pub struct MemoryPreferences {
    map_style: MapStyle,
}

impl MemoryPreferences {
    /// Start from the given style.
    #[must_use]
    pub const fn with_map_style(map_style: MapStyle) -> Self {
        Self { map_style }
    }
}

impl PreferencesStore for MemoryPreferences {
    fn map_style(&self) -> MapStyle {
        self.map_style
    }

    fn set_map_style(&mut self, style: MapStyle) -> Result<(), PreferencesError> {
        self.map_style = style;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PreferencesDocument {
    #[serde(default)]
    map_style: MapStyle,
}

/// Preferences stored as a small JSON object, for example
/// `{"mapStyle":"hybrid"}`.
#[derive(Debug, Clone)]
pub struct FilePreferences {
    path: Utf8PathBuf,
    document: PreferencesDocument,
}

impl FilePreferences {
    /// Load preferences from `path`, falling back to defaults.
    #[must_use]
    pub fn open(path: impl Into<Utf8PathBuf>) -> Self {
        let path = path.into();
        let document = match bucketlist_fs::read_file(&path) {
            Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_else(|err| {
                warn!("ignoring unreadable preferences at {path}: {err}");
                PreferencesDocument::default()
            }),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!("no preferences at {path}; using defaults");
                PreferencesDocument::default()
            }
            Err(err) => {
                warn!("failed to read preferences at {path}: {err}");
                PreferencesDocument::default()
            }
        };
        Self { path, document }
    }

    /// `<config dir>/preferences.json` for the current user.
    #[must_use]
    pub fn default_path() -> Option<Utf8PathBuf> {
        let dirs = project_dirs()?;
        let dir = Utf8PathBuf::from_path_buf(dirs.config_dir().to_path_buf()).ok()?;
        Some(dir.join(PREFERENCES_FILE_NAME))
    }

    /// Location of the preferences file.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }
}

impl PreferencesStore for FilePreferences {
    fn map_style(&self) -> MapStyle {
        self.document.map_style
    }

    fn set_map_style(&mut self, style: MapStyle) -> Result<(), PreferencesError> {
        self.document.map_style = style;
        let bytes = serde_json::to_vec(&self.document).map_err(PreferencesError::Encode)?;
        bucketlist_fs::write_atomic(&self.path, &bytes).map_err(|source| {
            PreferencesError::Write {
                path: self.path.clone(),
                source,
            }
        })
    }
}
