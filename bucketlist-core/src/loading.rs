//! Progress of a nearby-places search.

use crate::Page;

/// Outcome of a single nearby-places search.
///
/// A search starts in [`LoadingState::Loading`] and ends in exactly one of
/// the other two variants; there is no partial success.
///
/// # Examples
/// ```
/// use bucketlist_core::{LoadingState, Page};
///
/// let state = LoadingState::Loaded(vec![Page::new(1, "Apple")]);
/// assert!(state.is_loaded());
/// assert_eq!(state.pages().len(), 1);
/// assert!(LoadingState::Failed.pages().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadingState {
    /// The request has not resolved yet.
    #[default]
    Loading,
    /// The request succeeded with pages sorted by title.
    Loaded(Vec<Page>),
    /// The request, or decoding its response, failed.
    Failed,
}

impl LoadingState {
    /// Pages carried by a loaded state; empty otherwise.
    #[must_use]
    pub fn pages(&self) -> &[Page] {
        match self {
            Self::Loaded(pages) => pages,
            Self::Loading | Self::Failed => &[],
        }
    }

    /// Whether the search completed successfully.
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }

    /// Whether the search failed.
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed)
    }
}

impl<E> From<Result<Vec<Page>, E>> for LoadingState {
    fn from(result: Result<Vec<Page>, E>) -> Self {
        result.map_or(Self::Failed, Self::Loaded)
    }
}
