//! Facade crate for the Bucket List places engine.
//!
//! This crate re-exports the core domain types and, behind the `data`
//! feature, the persisted location store and the nearby-places fetcher.

#![forbid(unsafe_code)]

pub use bucketlist_core::{
    DEFAULT_LOCATION_NAME, LoadingState, Location, LocationError, LocationId, MapStyle,
    NO_DESCRIPTION, Page, ParseMapStyleError, validate_coordinate,
};

#[cfg(feature = "data")]
pub use bucketlist_data::nearby::{
    FetchError, FetcherBuildError, GeoSearchConfig, NearbyPlacesFetcher,
};
#[cfg(feature = "data")]
pub use bucketlist_data::preferences::{
    FilePreferences, MemoryPreferences, PreferencesError, PreferencesStore,
};
#[cfg(feature = "data")]
pub use bucketlist_data::store::{
    FileProtection, LoadStatus, LocationStore, SealError, SessionKey, StoreConfig, StoreError,
    UpdateOutcome,
};
