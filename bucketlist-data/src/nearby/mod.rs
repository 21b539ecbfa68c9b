//! Nearby encyclopedia pages for a coordinate.
//!
//! [`NearbyPlacesFetcher`] asks the Wikipedia geosearch generator for pages
//! around a point and returns them ordered by title. Each call is a single
//! GET; there is no caching and no retry. Dropping the returned future
//! abandons the request.
//!
//! # Example
//!
//! ```no_run
//! use bucketlist_data::nearby::{GeoSearchConfig, NearbyPlacesFetcher};
//! use geo::Coord;
//! use std::time::Duration;
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let config = GeoSearchConfig::default()
//!     .with_timeout(Duration::from_secs(10))
//!     .with_user_agent("my-app/1.0");
//! let fetcher = NearbyPlacesFetcher::with_config(config)?;
//!
//! let state = fetcher.fetch(Coord { x: -0.141, y: 51.501 }).await;
//! for page in state.pages() {
//!     println!("{}: {}", page.title, page.description());
//! }
//! # Ok(())
//! # }
//! ```

mod config;
mod error;
mod fetcher;
mod response;

pub use config::{
    DEFAULT_ENDPOINT, DEFAULT_LIMIT, DEFAULT_RADIUS_M, DEFAULT_THUMBNAIL_SIZE,
    DEFAULT_USER_AGENT, GeoSearchConfig,
};
pub use error::{FetchError, FetcherBuildError};
pub use fetcher::NearbyPlacesFetcher;
