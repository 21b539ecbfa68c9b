//! `nearby` subcommand: encyclopedia pages around a place.

use std::{io::Write, time::Duration};

use bucketlist_core::{LocationId, Page};
use bucketlist_data::nearby::{GeoSearchConfig, NearbyPlacesFetcher};
use camino::Utf8PathBuf;
use clap::Parser;
use geo::Coord;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::{
    ARG_ID, ARG_KEY_FILE, ARG_LATITUDE, ARG_LONGITUDE, ARG_PROTECTION, ARG_STORE_PATH, CliError,
    Protection, StoreOptions,
};

pub(crate) const ENV_NEARBY_LATITUDE: &str = "BUCKETLIST_CMDS_NEARBY_LAT";
pub(crate) const ENV_NEARBY_LONGITUDE: &str = "BUCKETLIST_CMDS_NEARBY_LON";

/// CLI arguments for the `nearby` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Search Wikipedia for pages near a saved place (by id) or \
                 an explicit --lat/--lon pair. Results are printed as \
                 `title<TAB>description`, ordered by title.",
    about = "List encyclopedia pages near a place"
)]
#[ortho_config(prefix = "BUCKETLIST")]
pub(crate) struct NearbyArgs {
    /// Saved place to search around.
    #[arg(value_name = ARG_ID, conflicts_with_all = [ARG_LATITUDE, ARG_LONGITUDE])]
    #[serde(default)]
    pub(crate) id: Option<LocationId>,
    /// Latitude in degrees.
    #[arg(long = ARG_LATITUDE, value_name = "degrees", allow_negative_numbers = true, requires = ARG_LONGITUDE)]
    #[serde(default)]
    pub(crate) lat: Option<f64>,
    /// Longitude in degrees.
    #[arg(long = ARG_LONGITUDE, value_name = "degrees", allow_negative_numbers = true, requires = ARG_LATITUDE)]
    #[serde(default)]
    pub(crate) lon: Option<f64>,
    /// Geosearch API endpoint.
    #[arg(long, value_name = "url")]
    #[serde(default)]
    pub(crate) endpoint: Option<String>,
    /// User agent sent with requests.
    #[arg(long, value_name = "text")]
    #[serde(default)]
    pub(crate) user_agent: Option<String>,
    /// Request timeout in seconds.
    #[arg(long, value_name = "seconds")]
    #[serde(default)]
    pub(crate) timeout_secs: Option<u64>,
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

/// Where to search.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum SearchOrigin {
    Coordinate(Coord<f64>),
    Saved {
        id: LocationId,
        store: StoreOptions,
    },
}

/// Resolved `nearby` command configuration.
#[derive(Debug, Clone)]
pub(crate) struct NearbyConfig {
    pub(crate) origin: SearchOrigin,
    pub(crate) search: GeoSearchConfig,
}

impl NearbyArgs {
    pub(crate) fn into_config(self) -> Result<NearbyConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        NearbyConfig::try_from(merged)
    }
}

impl TryFrom<NearbyArgs> for NearbyConfig {
    type Error = CliError;

    fn try_from(args: NearbyArgs) -> Result<Self, Self::Error> {
        // Clap only sees flags; values from env or files are checked here.
        let origin = match (args.id, args.lat, args.lon) {
            (Some(_), Some(_), _) => {
                return Err(CliError::ConflictingArguments {
                    first: ARG_ID,
                    second: ARG_LATITUDE,
                });
            }
            (Some(_), None, Some(_)) => {
                return Err(CliError::ConflictingArguments {
                    first: ARG_ID,
                    second: ARG_LONGITUDE,
                });
            }
            (Some(id), None, None) => SearchOrigin::Saved {
                id,
                store: StoreOptions::resolve(args.store_path, args.key_file, args.protection)?,
            },
            (None, Some(latitude), Some(longitude)) => SearchOrigin::Coordinate(Coord {
                x: longitude,
                y: latitude,
            }),
            (None, Some(_), None) => {
                return Err(CliError::MissingArgument {
                    field: ARG_LONGITUDE,
                    env: ENV_NEARBY_LONGITUDE,
                });
            }
            (None, None, _) => {
                return Err(CliError::MissingArgument {
                    field: ARG_LATITUDE,
                    env: ENV_NEARBY_LATITUDE,
                });
            }
        };

        let mut search = args
            .endpoint
            .map_or_else(GeoSearchConfig::default, GeoSearchConfig::new);
        if let Some(user_agent) = args.user_agent {
            search = search.with_user_agent(user_agent);
        }
        if let Some(secs) = args.timeout_secs {
            search = search.with_timeout(Duration::from_secs(secs));
        }
        Ok(Self { origin, search })
    }
}

impl NearbyConfig {
    fn coordinate(&self) -> Result<Coord<f64>, CliError> {
        match &self.origin {
            SearchOrigin::Coordinate(coordinate) => Ok(*coordinate),
            SearchOrigin::Saved { id, store } => store
                .open()?
                .find(*id)
                .map(bucketlist_core::Location::coordinate)
                .ok_or(CliError::UnknownLocation { id: *id }),
        }
    }
}

pub(crate) fn run_nearby(args: NearbyArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    execute_nearby(args.into_config()?, writer)
}

pub(crate) fn execute_nearby(config: NearbyConfig, writer: &mut dyn Write) -> Result<(), CliError> {
    let coordinate = config.coordinate()?;
    let fetcher = NearbyPlacesFetcher::with_config(config.search).map_err(CliError::BuildFetcher)?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(CliError::Runtime)?;
    let pages = runtime.block_on(fetcher.try_fetch(coordinate))?;
    write_pages(writer, &pages)
}

fn write_pages(writer: &mut dyn Write, pages: &[Page]) -> Result<(), CliError> {
    for page in pages {
        writeln!(writer, "{}\t{}", page.title, page.description()).map_err(CliError::WriteOutput)?;
    }
    Ok(())
}
