//! Errors raised while reading or writing the store file.

use std::io;

use bucketlist_core::LocationError;
use camino::Utf8PathBuf;
use thiserror::Error;

use super::SealError;

/// Errors raised while loading, saving, or mutating the location store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store file exists but could not be read.
    #[error("failed to read saved places from {path}: {source}")]
    Read {
        /// Location of the store file.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The store file could not be replaced.
    #[error("failed to write saved places to {path}: {source}")]
    Write {
        /// Location of the store file.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The store file did not contain a JSON array of locations.
    #[error("failed to decode saved places from {path}: {source}")]
    Decode {
        /// Location of the store file.
        path: Utf8PathBuf,
        /// Decoder error returned by `serde_json`.
        #[source]
        source: serde_json::Error,
    },
    /// The in-memory list could not be encoded.
    #[error("failed to encode saved places: {source}")]
    Encode {
        /// Encoder error returned by `serde_json`.
        #[source]
        source: serde_json::Error,
    },
    /// The protected store file could not be opened with the session key.
    #[error("failed to unlock saved places at {path}: {source}")]
    Unseal {
        /// Location of the store file.
        path: Utf8PathBuf,
        /// Envelope or authentication failure.
        #[source]
        source: SealError,
    },
    /// The payload could not be sealed before writing.
    #[error("failed to protect saved places: {0}")]
    Seal(#[from] SealError),
    /// The session key file exists but could not be read.
    #[error("failed to read session key from {path}: {source}")]
    KeyRead {
        /// Location of the key file.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// A new session key could not be saved.
    #[error("failed to write session key to {path}: {source}")]
    KeyWrite {
        /// Location of the key file.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The key file holds the wrong number of bytes.
    #[error("session key at {path} is {found} bytes; expected {expected}")]
    KeyLength {
        /// Location of the key file.
        path: Utf8PathBuf,
        /// Bytes found in the file.
        found: usize,
        /// Required key length.
        expected: usize,
    },
    /// A new location was rejected before it reached the list.
    #[error(transparent)]
    InvalidLocation(#[from] LocationError),
}
