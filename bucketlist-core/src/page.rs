//! Encyclopedia entries found near a location.

use std::{cmp::Ordering, collections::HashMap};

use serde::{Deserialize, Serialize};

/// Fallback shown when a page carries no description term.
pub const NO_DESCRIPTION: &str = "No description available";

/// A nearby encyclopedia page as returned by a geosearch.
///
/// Pages order by `title` (byte-wise, case-sensitive), then by `page_id`.
/// Equality follows the same key so that ordering stays consistent with it.
///
/// # Examples
/// ```
/// use bucketlist_core::{NO_DESCRIPTION, Page};
///
/// let mut pages = vec![Page::new(1, "Banana"), Page::new(2, "Apple")];
/// pages.sort();
/// assert_eq!(pages[0].title, "Apple");
/// assert_eq!(pages[0].description(), NO_DESCRIPTION);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    /// Identifier assigned by the remote source.
    #[serde(rename = "pageid")]
    pub page_id: i64,
    /// Page title.
    pub title: String,
    /// Optional term lists keyed by term name, e.g. `description`.
    #[serde(default)]
    pub terms: Option<HashMap<String, Vec<String>>>,
}

impl Page {
    /// Construct a page without any terms.
    pub fn new(page_id: i64, title: impl Into<String>) -> Self {
        Self {
            page_id,
            title: title.into(),
            terms: None,
        }
    }

    /// Attach a description term.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.terms
            .get_or_insert_with(HashMap::new)
            .insert("description".to_owned(), vec![description.into()]);
        self
    }

    /// First `description` term, or [`NO_DESCRIPTION`] when absent or empty.
    ///
    /// # Examples
    /// ```
    /// use bucketlist_core::Page;
    ///
    /// let page = Page::new(7, "Big Ben").with_description("clock tower");
    /// assert_eq!(page.description(), "clock tower");
    /// ```
    #[must_use]
    pub fn description(&self) -> &str {
        self.terms
            .as_ref()
            .and_then(|terms| terms.get("description"))
            .and_then(|values| values.first())
            .map_or(NO_DESCRIPTION, String::as_str)
    }
}

impl PartialEq for Page {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Page {}

impl PartialOrd for Page {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Page {
    fn cmp(&self, other: &Self) -> Ordering {
        self.title
            .cmp(&other.title)
            .then_with(|| self.page_id.cmp(&other.page_id))
    }
}
