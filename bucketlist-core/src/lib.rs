//! Core domain types for the Bucket List places engine.
//!
//! Responsibilities:
//! - Define the saved [`Location`] entity and its identity rules.
//! - Define the read-only [`Page`] rows returned by nearby searches.
//! - Model the tri-state [`LoadingState`] of a nearby search.
//!
//! Boundaries:
//! - No I/O lives here; persistence and HTTP belong to `bucketlist-data`.

#![forbid(unsafe_code)]

pub mod loading;
pub mod location;
pub mod map_style;
pub mod page;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use loading::LoadingState;
pub use location::{
    DEFAULT_LOCATION_NAME, Location, LocationError, LocationId, validate_coordinate,
};
pub use map_style::{MapStyle, ParseMapStyleError};
pub use page::{NO_DESCRIPTION, Page};
