//! Base map styles the user can choose between.
//!
//! # Examples
//! ```
//! use bucketlist_core::MapStyle;
//!
//! assert_eq!(MapStyle::Hybrid.as_str(), "hybrid");
//! assert_eq!("Satellite".parse::<MapStyle>(), Ok(MapStyle::Satellite));
//! assert_eq!(MapStyle::default(), MapStyle::Standard);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rendering style for the base map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MapStyle {
    /// Road map.
    #[default]
    Standard,
    /// Satellite imagery with road overlays.
    Hybrid,
    /// Satellite imagery only.
    Satellite,
}

/// Error returned when parsing an unknown map style name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown map style '{0}' (expected standard, hybrid, or satellite)")]
pub struct ParseMapStyleError(String);

impl ParseMapStyleError {
    /// The input that failed to parse.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.0
    }
}

impl MapStyle {
    /// Every style, in menu order.
    pub const ALL: [Self; 3] = [Self::Standard, Self::Hybrid, Self::Satellite];

    /// Return the style as a lowercase `&str`.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Hybrid => "hybrid",
            Self::Satellite => "satellite",
        }
    }
}

impl std::fmt::Display for MapStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MapStyle {
    type Err = ParseMapStyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "standard" => Ok(Self::Standard),
            "hybrid" => Ok(Self::Hybrid),
            "satellite" => Ok(Self::Satellite),
            _ => Err(ParseMapStyleError(s.to_owned())),
        }
    }
}
