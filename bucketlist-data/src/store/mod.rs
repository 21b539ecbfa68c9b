//! The user's saved places and the file that keeps them.
//!
//! [`LocationStore`] owns the authoritative in-memory list. Every mutation
//! rewrites the whole file through [`bucketlist_fs::write_atomic`], so the
//! file on disk is always a complete list: either the previous one or the
//! new one.
//!
//! # Example
//!
//! ```no_run
//! use bucketlist_data::store::{LocationStore, SessionKey, StoreConfig};
//! use camino::Utf8Path;
//! use geo::Coord;
//!
//! let key = SessionKey::load_or_create(Utf8Path::new("session.key"))?;
//! let mut store = LocationStore::open(StoreConfig::new("SavedPlaces", key));
//! let id = store.add_location(Coord { x: -0.141, y: 51.501 })?;
//! assert!(store.locations().iter().any(|location| location.id() == id));
//! # Ok::<(), bucketlist_data::store::StoreError>(())
//! ```

pub(crate) mod config;
mod error;
mod key;
mod persistence;
mod seal;

#[cfg(test)]
mod tests;

use bucketlist_core::{Location, LocationId};
use geo::Coord;
use log::{debug, error, warn};

pub use config::{FileProtection, KEY_FILE_NAME, SAVE_FILE_NAME, StoreConfig};
pub use error::StoreError;
pub use key::{KEY_LEN, SessionKey};
pub use seal::{SEAL_MAGIC, SEAL_VERSION, SealError};

/// What happened when the store read its file at start-up.
#[derive(Debug)]
pub enum LoadStatus {
    /// The file was read and held `count` locations.
    Loaded {
        /// Number of locations restored.
        count: usize,
    },
    /// No file existed yet.
    Missing,
    /// The file could not be read, unlocked, or decoded; the list started empty.
    Failed(StoreError),
}

/// Result of [`LocationStore::update_selected`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The selected entry was replaced and the list persisted.
    Replaced,
    /// Nothing was selected; the list is unchanged.
    NoSelection,
    /// The selection no longer matches any entry; the list is unchanged.
    StaleSelection,
}

/// Ordered collection of saved locations backed by a single file.
#[derive(Debug)]
pub struct LocationStore {
    config: StoreConfig,
    locations: Vec<Location>,
    selected: Option<Location>,
    load_status: LoadStatus,
}

impl LocationStore {
    /// Open the store described by `config`.
    ///
    /// Opening never fails. A missing, locked, or undecodable file leaves the
    /// list empty; [`load_status`](Self::load_status) reports which case
    /// applied.
    #[must_use]
    pub fn open(config: StoreConfig) -> Self {
        let (locations, load_status) = match persistence::load(&config) {
            Ok(Some(locations)) => {
                debug!("loaded {} saved places from {}", locations.len(), config.path);
                let count = locations.len();
                (locations, LoadStatus::Loaded { count })
            }
            Ok(None) => {
                debug!("no saved places at {}; starting empty", config.path);
                (Vec::new(), LoadStatus::Missing)
            }
            Err(err) => {
                warn!("starting with no saved places: {err}");
                (Vec::new(), LoadStatus::Failed(err))
            }
        };
        Self {
            config,
            locations,
            selected: None,
            load_status,
        }
    }

    /// Saved locations in insertion order.
    #[must_use]
    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    /// Outcome of the initial load.
    #[must_use]
    pub const fn load_status(&self) -> &LoadStatus {
        &self.load_status
    }

    /// Configuration the store was opened with.
    #[must_use]
    pub const fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Find a saved location by identifier.
    #[must_use]
    pub fn find(&self, id: LocationId) -> Option<&Location> {
        self.locations.iter().find(|location| location.id() == id)
    }

    /// Currently selected location, if any.
    #[must_use]
    pub const fn selected(&self) -> Option<&Location> {
        self.selected.as_ref()
    }

    /// Replace the selection. The store never changes it by itself.
    pub fn set_selected(&mut self, location: Option<Location>) {
        self.selected = location;
    }

    /// Drop a new location at `coordinate` and persist the list.
    ///
    /// # Errors
    ///
    /// [`StoreError::InvalidLocation`] when the coordinate is out of range;
    /// the list is unchanged. Any persistence error is returned after the
    /// location has been appended in memory.
    pub fn add_location(&mut self, coordinate: Coord<f64>) -> Result<LocationId, StoreError> {
        let location = Location::dropped_at(coordinate)?;
        let id = location.id();
        self.locations.push(location);
        self.persist()?;
        Ok(id)
    }

    /// Replace the entry matching the current selection with `location`.
    ///
    /// Only the first entry whose identifier equals the selected one is
    /// replaced. The selection itself is left as it was.
    ///
    /// # Errors
    ///
    /// Persistence errors are returned after the in-memory replacement.
    pub fn update_selected(&mut self, location: Location) -> Result<UpdateOutcome, StoreError> {
        let Some(selected_id) = self.selected.as_ref().map(Location::id) else {
            debug!("update ignored: no location selected");
            return Ok(UpdateOutcome::NoSelection);
        };
        let Some(slot) = self
            .locations
            .iter_mut()
            .find(|candidate| candidate.id() == selected_id)
        else {
            debug!("update ignored: selected location {selected_id} is no longer saved");
            return Ok(UpdateOutcome::StaleSelection);
        };
        *slot = location;
        self.persist()?;
        Ok(UpdateOutcome::Replaced)
    }

    /// Write the full list to disk.
    ///
    /// # Errors
    ///
    /// Returns the encode, seal, or write failure. The in-memory list stays
    /// authoritative either way.
    pub fn persist(&self) -> Result<(), StoreError> {
        persistence::save(&self.config, &self.locations)
            .inspect(|()| {
                debug!(
                    "saved {} places to {}",
                    self.locations.len(),
                    self.config.path
                );
            })
            .inspect_err(|err| error!("unable to save places: {err}"))
    }
}
