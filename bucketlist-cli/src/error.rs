//! Error types emitted by the Bucket List CLI.

use std::sync::Arc;

use bucketlist_core::LocationId;
use bucketlist_data::{
    nearby::{FetchError, FetcherBuildError},
    preferences::PreferencesError,
    store::StoreError,
};
use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors emitted by the Bucket List CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Flag name.
        field: &'static str,
        /// Environment variable that can supply the value.
        env: &'static str,
    },
    /// Two options that select different behaviour were both supplied.
    #[error("{first} cannot be combined with --{second}")]
    ConflictingArguments {
        /// Option that was kept distinct.
        first: &'static str,
        /// Option it conflicts with.
        second: &'static str,
    },
    /// No per-user directory is available to derive a default path.
    #[error("no default location for {field}; set --{field}")]
    NoDefaultPath {
        /// Flag name.
        field: &'static str,
    },
    /// The store file exists but could not be loaded.
    #[error("saved places at {path} are unavailable: {reason}")]
    StoreUnavailable {
        /// Location of the store file.
        path: Utf8PathBuf,
        /// Why loading failed.
        reason: String,
    },
    /// Reading or writing the store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// No saved place has the requested identifier.
    #[error("no saved place with id {id}")]
    UnknownLocation {
        /// Requested identifier.
        id: LocationId,
    },
    /// The geosearch client could not be built.
    #[error("failed to prepare nearby search: {0}")]
    BuildFetcher(#[source] FetcherBuildError),
    /// The nearby search failed.
    #[error("nearby search failed: {0}")]
    Fetch(#[from] FetchError),
    /// The async runtime for the nearby search could not start.
    #[error("failed to start async runtime: {0}")]
    Runtime(#[source] std::io::Error),
    /// Saving preferences failed.
    #[error(transparent)]
    Preferences(#[from] PreferencesError),
    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
