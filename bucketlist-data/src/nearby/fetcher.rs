use bucketlist_core::{LoadingState, LocationError, Page, validate_coordinate};
use geo::Coord;
use log::{debug, warn};
use reqwest::Client;
use url::Url;

use super::{
    config::GeoSearchConfig,
    error::{FetchError, FetcherBuildError},
    response::GeoSearchResponse,
};

/// Geosearch client that lists encyclopedia pages near a coordinate.
///
/// The fetcher holds no per-call state. Concurrent calls proceed
/// independently and share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct NearbyPlacesFetcher {
    client: Client,
    config: GeoSearchConfig,
    endpoint: Url,
}

impl NearbyPlacesFetcher {
    /// Create a fetcher against the public Wikipedia endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new() -> Result<Self, FetcherBuildError> {
        Self::with_config(GeoSearchConfig::default())
    }

    /// Create a fetcher with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint is not a valid URL or the HTTP client
    /// fails to build.
    pub fn with_config(config: GeoSearchConfig) -> Result<Self, FetcherBuildError> {
        let endpoint =
            Url::parse(&config.endpoint).map_err(|source| FetcherBuildError::Endpoint {
                endpoint: config.endpoint.clone(),
                source,
            })?;
        let mut builder = Client::builder().user_agent(&config.user_agent);
        if let Some(timeout) = config.timeout {
            builder = builder.connect_timeout(timeout).timeout(timeout);
        }
        let client = builder.build().map_err(FetcherBuildError::HttpClient)?;
        Ok(Self {
            client,
            config,
            endpoint,
        })
    }

    /// Configuration in effect.
    #[must_use]
    pub const fn config(&self) -> &GeoSearchConfig {
        &self.config
    }

    /// Build the geosearch URL for `coordinate` (`x = longitude`,
    /// `y = latitude`).
    ///
    /// # Errors
    ///
    /// Returns [`LocationError`] when the coordinate is out of range.
    pub fn search_url(&self, coordinate: Coord<f64>) -> Result<Url, LocationError> {
        let Coord {
            x: longitude,
            y: latitude,
        } = validate_coordinate(coordinate)?;
        let limit = self.config.limit.to_string();

        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("ggscoord", &format!("{latitude}|{longitude}"))
            .append_pair("action", "query")
            .append_pair("prop", "coordinates|pageimages|pageterms")
            .append_pair("colimit", &limit)
            .append_pair("piprop", "thumbnail")
            .append_pair("pithumbsize", &self.config.thumbnail_size.to_string())
            .append_pair("pilimit", &limit)
            .append_pair("wbptterms", "description")
            .append_pair("generator", "geosearch")
            .append_pair("ggsradius", &self.config.radius_m.to_string())
            .append_pair("ggslimit", &limit)
            .append_pair("format", "json");
        Ok(url)
    }

    /// Search around `coordinate` and report the outcome as a
    /// [`LoadingState`].
    ///
    /// Never returns [`LoadingState::Loading`]. Failures are logged and
    /// collapse to [`LoadingState::Failed`]; use
    /// [`try_fetch`](Self::try_fetch) to inspect the reason.
    pub async fn fetch(&self, coordinate: Coord<f64>) -> LoadingState {
        match self.try_fetch(coordinate).await {
            Ok(pages) => LoadingState::Loaded(pages),
            Err(err) => {
                warn!("nearby search failed: {err}");
                LoadingState::Failed
            }
        }
    }

    /// Search around `coordinate` and return the pages ordered by title.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] for invalid coordinates, transport failures,
    /// non-success statuses, and undecodable bodies.
    pub async fn try_fetch(&self, coordinate: Coord<f64>) -> Result<Vec<Page>, FetchError> {
        let url = self.search_url(coordinate)?;
        debug!("searching for nearby pages: {url}");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|err| convert_reqwest_error(&err, &url))?
            .error_for_status()
            .map_err(|err| convert_reqwest_error(&err, &url))?;
        let body = response
            .bytes()
            .await
            .map_err(|err| convert_reqwest_error(&err, &url))?;

        let decoded: GeoSearchResponse =
            serde_json::from_slice(&body).map_err(|source| FetchError::Decode {
                url: url.to_string(),
                source,
            })?;
        let pages = decoded.into_sorted_pages();
        debug!("found {} nearby pages", pages.len());
        Ok(pages)
    }
}

/// Convert a reqwest error to a `FetchError`.
fn convert_reqwest_error(error: &reqwest::Error, url: &Url) -> FetchError {
    if error.is_timeout() {
        return FetchError::Timeout {
            url: url.to_string(),
        };
    }

    if let Some(status) = error.status() {
        return FetchError::Http {
            url: url.to_string(),
            status: status.as_u16(),
            message: error.to_string(),
        };
    }

    FetchError::Network {
        url: url.to_string(),
        message: error.to_string(),
    }
}
