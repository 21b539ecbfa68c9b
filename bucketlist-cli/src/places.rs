//! `add`, `list`, and `edit` subcommands.

use std::io::Write;

use bucketlist_core::{Location, LocationId};
use bucketlist_data::store::UpdateOutcome;
use camino::Utf8PathBuf;
use clap::Parser;
use geo::Coord;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::{
    ARG_ID, ARG_KEY_FILE, ARG_LATITUDE, ARG_LONGITUDE, ARG_PROTECTION, ARG_STORE_PATH, CliError,
    Protection, StoreOptions,
};

pub(crate) const ENV_ADD_LATITUDE: &str = "BUCKETLIST_CMDS_ADD_LAT";
pub(crate) const ENV_ADD_LONGITUDE: &str = "BUCKETLIST_CMDS_ADD_LON";
pub(crate) const ENV_EDIT_ID: &str = "BUCKETLIST_CMDS_EDIT_ID";

/// CLI arguments for the `add` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(about = "Drop a new place at a coordinate")]
#[ortho_config(prefix = "BUCKETLIST")]
pub(crate) struct AddArgs {
    /// Latitude in degrees.
    #[arg(long = ARG_LATITUDE, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) lat: Option<f64>,
    /// Longitude in degrees.
    #[arg(long = ARG_LONGITUDE, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) lon: Option<f64>,
    /// Path of the saved places file.
    #[arg(long = ARG_STORE_PATH, value_name = "path")]
    #[serde(default)]
    pub(crate) store_path: Option<Utf8PathBuf>,
    /// Path of the session key file.
    #[arg(long = ARG_KEY_FILE, value_name = "path")]
    #[serde(default)]
    pub(crate) key_file: Option<Utf8PathBuf>,
    /// At-rest protection of the saved places file.
    #[arg(long = ARG_PROTECTION, value_enum)]
    #[serde(default)]
    pub(crate) protection: Option<Protection>,
}

/// Resolved `add` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct AddConfig {
    pub(crate) coordinate: Coord<f64>,
    pub(crate) store: StoreOptions,
}

impl AddArgs {
    pub(crate) fn into_config(self) -> Result<AddConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        AddConfig::try_from(merged)
    }
}

impl TryFrom<AddArgs> for AddConfig {
    type Error = CliError;

    fn try_from(args: AddArgs) -> Result<Self, Self::Error> {
        let latitude = args.lat.ok_or(CliError::MissingArgument {
            field: ARG_LATITUDE,
            env: ENV_ADD_LATITUDE,
        })?;
        let longitude = args.lon.ok_or(CliError::MissingArgument {
            field: ARG_LONGITUDE,
            env: ENV_ADD_LONGITUDE,
        })?;
        Ok(Self {
            coordinate: Coord {
                x: longitude,
                y: latitude,
            },
            store: StoreOptions::resolve(args.store_path, args.key_file, args.protection)?,
        })
    }
}

/// CLI arguments for the `list` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(about = "Show every saved place, one per line")]
#[ortho_config(prefix = "BUCKETLIST")]
pub(crate) struct ListArgs {
    /// Path of the saved places file.
    #[arg(long = ARG_STORE_PATH, value_name = "path")]
    #[serde(default)]
    pub(crate) store_path: Option<Utf8PathBuf>,
    /// Path of the session key file.
    #[arg(long = ARG_KEY_FILE, value_name = "path")]
    #[serde(default)]
    pub(crate) key_file: Option<Utf8PathBuf>,
    /// At-rest protection of the saved places file.
    #[arg(long = ARG_PROTECTION, value_enum)]
    #[serde(default)]
    pub(crate) protection: Option<Protection>,
}

impl ListArgs {
    pub(crate) fn into_config(self) -> Result<StoreOptions, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        StoreOptions::resolve(merged.store_path, merged.key_file, merged.protection)
    }
}

/// CLI arguments for the `edit` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Select a saved place by id and replace its name and/or \
                 description. Fields that are not given keep their current \
                 value.",
    about = "Rename or describe a saved place"
)]
#[ortho_config(prefix = "BUCKETLIST")]
pub(crate) struct EditArgs {
    /// Identifier printed by `add` or `list`.
    #[arg(value_name = ARG_ID)]
    #[serde(default)]
    pub(crate) id: Option<LocationId>,
    /// New display name.
    #[arg(long, value_name = "text")]
    #[serde(default)]
    pub(crate) name: Option<String>,
    /// New description.
    #[arg(long, value_name = "text")]
    #[serde(default)]
    pub(crate) description: Option<String>,
    /// Path of the saved places file.
    #[arg(long = ARG_STORE_PATH, value_name = "path")]
    #[serde(default)]
    pub(crate) store_path: Option<Utf8PathBuf>,
    /// Path of the session key file.
    #[arg(long = ARG_KEY_FILE, value_name = "path")]
    #[serde(default)]
    pub(crate) key_file: Option<Utf8PathBuf>,
    /// At-rest protection of the saved places file.
    #[arg(long = ARG_PROTECTION, value_enum)]
    #[serde(default)]
    pub(crate) protection: Option<Protection>,
}

/// Resolved `edit` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct EditConfig {
    pub(crate) id: LocationId,
    pub(crate) name: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) store: StoreOptions,
}

impl EditArgs {
    pub(crate) fn into_config(self) -> Result<EditConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        EditConfig::try_from(merged)
    }
}

impl TryFrom<EditArgs> for EditConfig {
    type Error = CliError;

    fn try_from(args: EditArgs) -> Result<Self, Self::Error> {
        let id = args.id.ok_or(CliError::MissingArgument {
            field: ARG_ID,
            env: ENV_EDIT_ID,
        })?;
        Ok(Self {
            id,
            name: args.name,
            description: args.description,
            store: StoreOptions::resolve(args.store_path, args.key_file, args.protection)?,
        })
    }
}

pub(crate) fn run_add(args: AddArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    execute_add(&args.into_config()?, writer)
}

pub(crate) fn execute_add(config: &AddConfig, writer: &mut dyn Write) -> Result<(), CliError> {
    let mut store = config.store.open()?;
    let id = store.add_location(config.coordinate)?;
    writeln!(writer, "{id}").map_err(CliError::WriteOutput)
}

pub(crate) fn run_list(args: ListArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    execute_list(&args.into_config()?, writer)
}

pub(crate) fn execute_list(store: &StoreOptions, writer: &mut dyn Write) -> Result<(), CliError> {
    let store = store.open()?;
    for location in store.locations() {
        write_location(writer, location)?;
    }
    Ok(())
}

/// Tab-separated: id, latitude, longitude, name, description.
fn write_location(writer: &mut dyn Write, location: &Location) -> Result<(), CliError> {
    writeln!(
        writer,
        "{}\t{}\t{}\t{}\t{}",
        location.id(),
        location.latitude(),
        location.longitude(),
        location.name,
        location.description
    )
    .map_err(CliError::WriteOutput)
}

pub(crate) fn run_edit(args: EditArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    execute_edit(args.into_config()?, writer)
}

pub(crate) fn execute_edit(config: EditConfig, writer: &mut dyn Write) -> Result<(), CliError> {
    let mut store = config.store.open()?;
    let current = store
        .find(config.id)
        .cloned()
        .ok_or(CliError::UnknownLocation { id: config.id })?;
    let edited = current.edited(
        config.name.unwrap_or_else(|| current.name.clone()),
        config
            .description
            .unwrap_or_else(|| current.description.clone()),
    );

    store.set_selected(Some(current));
    match store.update_selected(edited)? {
        UpdateOutcome::Replaced => {}
        UpdateOutcome::NoSelection | UpdateOutcome::StaleSelection => {
            return Err(CliError::UnknownLocation { id: config.id });
        }
    }
    if let Some(updated) = store.find(config.id) {
        write_location(writer, updated)?;
    }
    Ok(())
}
