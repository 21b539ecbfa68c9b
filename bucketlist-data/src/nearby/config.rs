//! Tunables for the geosearch request.

use std::time::Duration;

/// Wikipedia action API endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://en.wikipedia.org/w/api.php";

/// Default user agent for geosearch requests.
pub const DEFAULT_USER_AGENT: &str = "bucketlist-nearby/0.1";

/// Search radius in metres.
pub const DEFAULT_RADIUS_M: u32 = 10_000;

/// Maximum number of pages, coordinates, and thumbnails requested.
pub const DEFAULT_LIMIT: u32 = 50;

/// Thumbnail edge length in pixels.
pub const DEFAULT_THUMBNAIL_SIZE: u32 = 500;

/// Configuration for [`NearbyPlacesFetcher`](super::NearbyPlacesFetcher).
#[derive(Debug, Clone)]
pub struct GeoSearchConfig {
    /// API endpoint, e.g. `"https://en.wikipedia.org/w/api.php"`.
    pub endpoint: String,
    /// User agent string for requests.
    pub user_agent: String,
    /// Request timeout. `None` keeps the HTTP client's own default.
    pub timeout: Option<Duration>,
    /// Search radius in metres.
    pub radius_m: u32,
    /// Page limit applied to the generator and its properties.
    pub limit: u32,
    /// Requested thumbnail size in pixels.
    pub thumbnail_size: u32,
}

impl Default for GeoSearchConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            timeout: None,
            radius_m: DEFAULT_RADIUS_M,
            limit: DEFAULT_LIMIT,
            thumbnail_size: DEFAULT_THUMBNAIL_SIZE,
        }
    }
}

impl GeoSearchConfig {
    /// Create a configuration targeting `endpoint` with default parameters.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Default::default()
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the search radius in metres.
    #[must_use]
    pub fn with_radius_m(mut self, radius_m: u32) -> Self {
        self.radius_m = radius_m;
        self
    }

    /// Set the page limit.
    #[must_use]
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// Set the requested thumbnail size in pixels.
    #[must_use]
    pub fn with_thumbnail_size(mut self, thumbnail_size: u32) -> Self {
        self.thumbnail_size = thumbnail_size;
        self
    }
}
