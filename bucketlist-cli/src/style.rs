//! `style` subcommand: show or change the base map style.

use std::io::Write;

use bucketlist_core::MapStyle;
use bucketlist_data::preferences::{FilePreferences, PreferencesStore};
use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::CliError;

const ARG_PREFERENCES_PATH: &str = "preferences-path";

/// CLI arguments for the `style` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Print the current base map style, or store a new one \
                 (standard, hybrid, or satellite).",
    about = "Show or change the base map style"
)]
#[ortho_config(prefix = "BUCKETLIST")]
pub(crate) struct StyleArgs {
    /// Style to store; omit to print the current one.
    #[arg(value_name = "style")]
    #[serde(default)]
    pub(crate) style: Option<MapStyle>,
    /// Path of the preferences file.
    #[arg(long = ARG_PREFERENCES_PATH, value_name = "path")]
    #[serde(default)]
    pub(crate) preferences_path: Option<Utf8PathBuf>,
}

/// Resolved `style` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct StyleConfig {
    pub(crate) style: Option<MapStyle>,
    pub(crate) preferences_path: Utf8PathBuf,
}

impl StyleArgs {
    pub(crate) fn into_config(self) -> Result<StyleConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        StyleConfig::try_from(merged)
    }
}

impl TryFrom<StyleArgs> for StyleConfig {
    type Error = CliError;

    fn try_from(args: StyleArgs) -> Result<Self, Self::Error> {
        let preferences_path = args
            .preferences_path
            .or_else(FilePreferences::default_path)
            .ok_or(CliError::NoDefaultPath {
                field: ARG_PREFERENCES_PATH,
            })?;
        Ok(Self {
            style: args.style,
            preferences_path,
        })
    }
}

pub(crate) fn run_style(args: StyleArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    execute_style(args.into_config()?, writer)
}

pub(crate) fn execute_style(config: StyleConfig, writer: &mut dyn Write) -> Result<(), CliError> {
    let mut preferences = FilePreferences::open(config.preferences_path);
    apply_style(&mut preferences, config.style, writer)
}

/// Store `style` when given, then print the style in effect.
pub(crate) fn apply_style(
    preferences: &mut dyn PreferencesStore,
    style: Option<MapStyle>,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    if let Some(style) = style {
        preferences.set_map_style(style)?;
    }
    writeln!(writer, "{}", preferences.map_style()).map_err(CliError::WriteOutput)
}
