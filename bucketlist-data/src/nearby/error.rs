//! Error types for building the fetcher and running a search.

use bucketlist_core::LocationError;
use thiserror::Error;

/// Reasons a nearby search produced no pages.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The coordinate could not be turned into a request.
    #[error("cannot search around an invalid coordinate: {0}")]
    InvalidCoordinate(#[from] LocationError),
    /// The service answered with a non-success status.
    #[error("HTTP error from {url}: status {status}: {message}")]
    Http {
        /// Request URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Error detail from the client.
        message: String,
    },
    /// The request never completed.
    #[error("network error contacting {url}: {message}")]
    Network {
        /// Request URL.
        url: String,
        /// Error detail from the client.
        message: String,
    },
    /// The request exceeded the configured timeout.
    #[error("request to {url} timed out")]
    Timeout {
        /// Request URL.
        url: String,
    },
    /// The body was not a geosearch response.
    #[error("failed to decode response from {url}: {source}")]
    Decode {
        /// Request URL.
        url: String,
        /// Decoder error returned by `serde_json`.
        #[source]
        source: serde_json::Error,
    },
}

/// Error type for [`NearbyPlacesFetcher`](super::NearbyPlacesFetcher)
/// construction failures.
#[derive(Debug)]
pub enum FetcherBuildError {
    /// The configured endpoint is not an absolute URL.
    Endpoint {
        /// Endpoint as configured.
        endpoint: String,
        /// Parser error.
        source: url::ParseError,
    },
    /// Failed to build the HTTP client.
    HttpClient(reqwest::Error),
}

impl std::fmt::Display for FetcherBuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Endpoint { endpoint, source } => {
                write!(f, "invalid geosearch endpoint {endpoint:?}: {source}")
            }
            Self::HttpClient(err) => write!(f, "failed to build HTTP client: {err}"),
        }
    }
}

impl std::error::Error for FetcherBuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Endpoint { source, .. } => Some(source),
            Self::HttpClient(err) => Some(err),
        }
    }
}
