use std::collections::HashSet;

use crate::api::Filters;
use crate::mvi::UiState;
use crate::records::Identified;

/// Page size used when a list is built without one.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Bounds every list item must satisfy.
pub trait ListItem: Identified + Clone + PartialEq + Send + Sync + 'static {}

impl<T> ListItem for T where T: Identified + Clone + PartialEq + Send + Sync + 'static {}

/// Which request a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    /// First page; a failure replaces the list with an error.
    Initial,
    /// Subsequent page; a failure keeps loaded items and offers a retry.
    More,
}

/// Display-only error state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListError {
    pub phase: LoadPhase,
    pub message: String,
}

/// Accumulated pages of one list view.
///
/// Only the list reducer changes this; everything else reads snapshots.
#[derive(Debug, Clone, PartialEq)]
pub struct ListState<T> {
    pub(crate) items: Vec<T>,
    pub(crate) total: usize,
    pub(crate) offset: usize,
    pub(crate) page_size: usize,
    pub(crate) loading: bool,
    pub(crate) loading_more: bool,
    /// Whether a first page has been applied since the last reset.
    pub(crate) loaded: bool,
    /// Bumped on every initial load or reset; responses carry the value
    /// they were issued under.
    pub(crate) generation: u64,
    pub(crate) filters: Filters,
    pub(crate) error: Option<ListError>,
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl<T: ListItem> UiState for ListState<T> {}

impl<T> ListState<T> {
    pub fn new(page_size: usize) -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            offset: 0,
            page_size: page_size.max(1),
            loading: false,
            loading_more: false,
            loaded: false,
            generation: 0,
            filters: Filters::new(),
            error: None,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Offset of the most recently applied page.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_loading_more(&self) -> bool {
        self.loading_more
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn filters(&self) -> &Filters {
        &self.filters
    }

    pub fn error(&self) -> Option<&ListError> {
        self.error.as_ref()
    }

    /// True once every server-side match is in `items`, or the last
    /// applied page already reached the end of the server's window.
    ///
    /// The second condition ends lists that came up short because
    /// overlapping pages were deduplicated. A list that has never loaded
    /// a page is not "all loaded".
    pub fn all_loaded(&self) -> bool {
        self.loaded
            && (self.items.len() >= self.total || self.offset + self.page_size >= self.total)
    }

    /// Whether a `load_more` would issue a request right now.
    pub fn can_load_more(&self) -> bool {
        self.loaded && !self.loading && !self.loading_more && !self.all_loaded()
    }

    /// Offset the next `load_more` will request.
    pub fn next_offset(&self) -> usize {
        self.offset + self.page_size
    }
}

impl<T: Identified> ListState<T> {
    pub fn contains(&self, id: &T::Id) -> bool {
        self.items.iter().any(|item| item.id() == id)
    }
}

/// Append each incoming item whose id is not already present.
///
/// Duplicates inside `incoming` keep their first occurrence. Returns the
/// number of items appended.
pub(crate) fn append_unique<T: Identified>(items: &mut Vec<T>, incoming: Vec<T>) -> usize {
    let mut seen: HashSet<T::Id> = items.iter().map(|item| item.id().clone()).collect();
    let before = items.len();
    for item in incoming {
        if seen.insert(item.id().clone()) {
            items.push(item);
        }
    }
    items.len() - before
}
