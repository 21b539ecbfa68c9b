//! Where the store lives and how it is protected.

use camino::{Utf8Path, Utf8PathBuf};
use directories::ProjectDirs;

use super::SessionKey;

/// File name of the store inside the application data directory.
pub const SAVE_FILE_NAME: &str = "SavedPlaces";

/// File name of the session key inside the application config directory.
pub const KEY_FILE_NAME: &str = "session.key";

/// At-rest protection applied to the store file.
#[derive(Debug, Clone)]
pub enum FileProtection {
    /// Plain JSON, still restricted to the owner on Unix.
    None,
    /// Sealed with the given key; unreadable while the key is unavailable.
    Complete(SessionKey),
}

/// Configuration for [`LocationStore`](super::LocationStore).
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Path of the store file.
    pub path: Utf8PathBuf,
    /// Protection applied on every write and expected on every read.
    pub protection: FileProtection,
}

impl StoreConfig {
    /// Create a configuration for `path` with complete protection under `key`.
    #[must_use]
    pub fn new(path: impl Into<Utf8PathBuf>, key: SessionKey) -> Self {
        Self {
            path: path.into(),
            protection: FileProtection::Complete(key),
        }
    }

    /// Create a configuration that stores plain JSON at `path`.
    #[must_use]
    pub fn unprotected(path: impl Into<Utf8PathBuf>) -> Self {
        Self {
            path: path.into(),
            protection: FileProtection::None,
        }
    }

    /// Replace the protection mode.
    #[must_use]
    pub fn with_protection(mut self, protection: FileProtection) -> Self {
        self.protection = protection;
        self
    }

    /// Borrow the store file path.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// `<data dir>/SavedPlaces` for the current user, when the platform
    /// exposes a home directory with a UTF-8 path.
    #[must_use]
    pub fn default_path() -> Option<Utf8PathBuf> {
        let dirs = project_dirs()?;
        let dir = Utf8PathBuf::from_path_buf(dirs.data_dir().to_path_buf()).ok()?;
        Some(dir.join(SAVE_FILE_NAME))
    }

    /// `<config dir>/session.key` for the current user.
    #[must_use]
    pub fn default_key_path() -> Option<Utf8PathBuf> {
        let dirs = project_dirs()?;
        let dir = Utf8PathBuf::from_path_buf(dirs.config_dir().to_path_buf()).ok()?;
        Some(dir.join(KEY_FILE_NAME))
    }
}

pub(crate) fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "bucketlist")
}
