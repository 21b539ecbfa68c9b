//! Wire types for the geosearch generator response.
//!
//! Only the parts the fetcher reads are modelled; unknown members such as
//! `coordinates` or `thumbnail` are ignored.

use std::collections::BTreeMap;

use bucketlist_core::Page;
use serde::Deserialize;

/// Top-level response.
///
/// `query.pages` must be present; an API error body such as
/// `{"error": {...}}` served with a success status fails to decode.
#[derive(Debug, Deserialize)]
pub(crate) struct GeoSearchResponse {
    pub(crate) query: Query,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Query {
    /// Pages keyed by their identifier rendered as a string.
    pub(crate) pages: BTreeMap<String, Page>,
}

impl GeoSearchResponse {
    /// Flatten the page map and order it by title.
    pub(crate) fn into_sorted_pages(self) -> Vec<Page> {
        let mut pages: Vec<Page> = self.query.pages.into_values().collect();
        pages.sort();
        pages
    }
}
