//! Places the user has dropped on the map.
//!
//! A [`Location`] is identified solely by its [`LocationId`]: two values with
//! the same id compare equal even when their names differ. Coordinates are
//! WGS84 and fixed once the location exists.

use std::{
    fmt,
    hash::{Hash, Hasher},
    str::FromStr,
};

use geo::Coord;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Name given to a freshly dropped location.
pub const DEFAULT_LOCATION_NAME: &str = "New Location";

/// Opaque unique identifier of a [`Location`].
///
/// Serialised as the hyphenated UUID string.
///
/// # Examples
/// ```
/// use bucketlist_core::LocationId;
///
/// let id = LocationId::generate();
/// let parsed: LocationId = id.to_string().parse().expect("round trip");
/// assert_eq!(id, parsed);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationId(Uuid);

impl LocationId {
    /// Generate a fresh random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Borrow the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for LocationId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Errors returned when constructing a [`Location`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum LocationError {
    /// Latitude was not a finite value in `[-90, 90]`.
    #[error("latitude {latitude} is outside [-90, 90]")]
    LatitudeOutOfRange {
        /// Rejected latitude in degrees.
        latitude: f64,
    },
    /// Longitude was not a finite value in `[-180, 180]`.
    #[error("longitude {longitude} is outside [-180, 180]")]
    LongitudeOutOfRange {
        /// Rejected longitude in degrees.
        longitude: f64,
    },
}

/// Check that `coordinate` (`x = longitude`, `y = latitude`) is a finite
/// WGS84 position and return it unchanged.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use bucketlist_core::location::validate_coordinate;
///
/// assert!(validate_coordinate(Coord { x: 10.0, y: 45.0 }).is_ok());
/// assert!(validate_coordinate(Coord { x: 10.0, y: f64::NAN }).is_err());
/// ```
pub fn validate_coordinate(coordinate: Coord<f64>) -> Result<Coord<f64>, LocationError> {
    let Coord {
        x: longitude,
        y: latitude,
    } = coordinate;
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(LocationError::LatitudeOutOfRange { latitude });
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(LocationError::LongitudeOutOfRange { longitude });
    }
    Ok(coordinate)
}

/// A place saved by the user.
///
/// `name` and `description` are freely editable; the identifier and the
/// coordinate are only readable.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use bucketlist_core::{DEFAULT_LOCATION_NAME, Location};
///
/// # fn main() -> Result<(), bucketlist_core::LocationError> {
/// let location = Location::dropped_at(Coord { x: -0.141, y: 51.501 })?;
/// assert_eq!(location.name, DEFAULT_LOCATION_NAME);
/// assert!(location.description.is_empty());
/// assert_eq!(location.latitude(), 51.501);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    id: LocationId,
    /// Display name shown on the map pin.
    pub name: String,
    /// Free-form notes about the place.
    pub description: String,
    latitude: f64,
    longitude: f64,
}

impl Location {
    /// Validate the coordinate and construct a [`Location`].
    ///
    /// `coordinate` follows the `geo` convention: `x = longitude`,
    /// `y = latitude`.
    pub fn new(
        id: LocationId,
        name: impl Into<String>,
        description: impl Into<String>,
        coordinate: Coord<f64>,
    ) -> Result<Self, LocationError> {
        let Coord {
            x: longitude,
            y: latitude,
        } = validate_coordinate(coordinate)?;
        Ok(Self {
            id,
            name: name.into(),
            description: description.into(),
            latitude,
            longitude,
        })
    }

    /// Construct a new location at `coordinate` with a fresh identifier, the
    /// default name, and an empty description.
    pub fn dropped_at(coordinate: Coord<f64>) -> Result<Self, LocationError> {
        Self::new(
            LocationId::generate(),
            DEFAULT_LOCATION_NAME,
            String::new(),
            coordinate,
        )
    }

    /// Return a copy carrying new text while keeping the identifier and
    /// coordinate.
    ///
    /// # Examples
    /// ```
    /// use geo::Coord;
    /// use bucketlist_core::Location;
    ///
    /// # fn main() -> Result<(), bucketlist_core::LocationError> {
    /// let original = Location::dropped_at(Coord { x: 0.0, y: 0.0 })?;
    /// let edited = original.edited("Null Island", "Where the axes meet");
    /// assert_eq!(edited.id(), original.id());
    /// assert_eq!(edited.name, "Null Island");
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn edited(&self, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            ..self.clone()
        }
    }

    /// Return a copy of this location under a freshly generated identifier.
    #[must_use]
    pub fn with_new_id(&self) -> Self {
        Self {
            id: LocationId::generate(),
            ..self.clone()
        }
    }

    /// Identifier of this location.
    #[must_use]
    pub const fn id(&self) -> LocationId {
        self.id
    }

    /// Latitude in degrees.
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees.
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Position as a `geo` coordinate (`x = longitude`, `y = latitude`).
    #[must_use]
    pub const fn coordinate(&self) -> Coord<f64> {
        Coord {
            x: self.longitude,
            y: self.latitude,
        }
    }
}

impl PartialEq for Location {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Location {}

impl Hash for Location {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
