//! Command-line interface for the Bucket List places engine.
//!
//! Every subcommand resolves its options through `ortho_config`, so values
//! can come from CLI flags, `BUCKETLIST_CMDS_<COMMAND>_<FIELD>` environment
//! variables, or a configuration file, in that order of precedence.
#![forbid(unsafe_code)]

use std::io::Write;

use bucketlist_data::store::{LoadStatus, LocationStore, SessionKey, StoreConfig};
use camino::Utf8PathBuf;
use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

mod error;
mod nearby;
mod places;
mod style;

pub use error::CliError;

use nearby::NearbyArgs;
use places::{AddArgs, EditArgs, ListArgs};
use style::StyleArgs;

const ARG_STORE_PATH: &str = "store-path";
const ARG_KEY_FILE: &str = "key-file";
const ARG_PROTECTION: &str = "protection";
const ARG_LATITUDE: &str = "lat";
const ARG_LONGITUDE: &str = "lon";
const ARG_ID: &str = "id";

/// Run the Bucket List CLI with the current process arguments and environment.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    let mut stdout = std::io::stdout().lock();
    run_command(cli.command, &mut stdout)
}

fn run_command(command: Command, writer: &mut dyn Write) -> Result<(), CliError> {
    match command {
        Command::Add(args) => places::run_add(args, writer),
        Command::List(args) => places::run_list(args, writer),
        Command::Edit(args) => places::run_edit(args, writer),
        Command::Nearby(args) => nearby::run_nearby(args, writer),
        Command::Style(args) => style::run_style(args, writer),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "bucketlist",
    about = "Keep a list of places to visit and discover what is nearby",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Drop a new place at a coordinate.
    Add(AddArgs),
    /// Show every saved place.
    List(ListArgs),
    /// Rename or describe a saved place.
    Edit(EditArgs),
    /// List encyclopedia pages near a place or coordinate.
    Nearby(NearbyArgs),
    /// Show or change the base map style.
    Style(StyleArgs),
}

/// How the store file is protected at rest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Protection {
    /// Sealed with the session key.
    #[default]
    Complete,
    /// Plain JSON.
    None,
}

/// Store location and protection after configuration merging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct StoreOptions {
    pub(crate) store_path: Utf8PathBuf,
    pub(crate) key_file: Option<Utf8PathBuf>,
    pub(crate) protection: Protection,
}

impl StoreOptions {
    /// Fill unset values with the per-user defaults.
    pub(crate) fn resolve(
        store_path: Option<Utf8PathBuf>,
        key_file: Option<Utf8PathBuf>,
        protection: Option<Protection>,
    ) -> Result<Self, CliError> {
        let store_path = store_path
            .or_else(StoreConfig::default_path)
            .ok_or(CliError::NoDefaultPath {
                field: ARG_STORE_PATH,
            })?;
        Ok(Self {
            store_path,
            key_file,
            protection: protection.unwrap_or_default(),
        })
    }

    fn store_config(&self) -> Result<StoreConfig, CliError> {
        match self.protection {
            Protection::None => Ok(StoreConfig::unprotected(self.store_path.clone())),
            Protection::Complete => {
                let key_file = self
                    .key_file
                    .clone()
                    .or_else(StoreConfig::default_key_path)
                    .ok_or(CliError::NoDefaultPath {
                        field: ARG_KEY_FILE,
                    })?;
                let key = SessionKey::load_or_create(&key_file)?;
                Ok(StoreConfig::new(self.store_path.clone(), key))
            }
        }
    }

    /// Open the store, refusing to continue when an existing file could not
    /// be loaded so that it is never overwritten by an empty list.
    pub(crate) fn open(&self) -> Result<LocationStore, CliError> {
        let store = LocationStore::open(self.store_config()?);
        if let LoadStatus::Failed(err) = store.load_status() {
            return Err(CliError::StoreUnavailable {
                path: self.store_path.clone(),
                reason: err.to_string(),
            });
        }
        Ok(store)
    }
}

#[cfg(test)]
mod tests;
