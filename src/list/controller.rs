//! Drives a [`PageSource`] and folds its pages into a [`ListState`].

use std::sync::Arc;

use parking_lot::Mutex;

use crate::api::{Filters, PageRequest, PageSource, SortDirection, TransportError};
use crate::config::{Defaults, ListConfig};
use crate::mvi::dispatch;

use super::intent::ListIntent;
use super::reducer::ListReducer;
use super::state::{ListError, ListItem, ListState, LoadPhase, DEFAULT_PAGE_SIZE};

/// Result of one controller operation.
///
/// Transport errors end here: they become [`ListError`] state and a
/// `Failed` outcome, never an `Err`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The page was merged; `appended` new items became visible.
    Applied { appended: usize },
    /// Nothing was requested (already loading, or nothing left).
    Skipped,
    /// The response arrived after a newer load and was discarded.
    Stale,
    /// The request failed; `message` is what the view shows.
    Failed { message: String },
}

/// Static settings for one list instance.
#[derive(Debug, Clone, PartialEq)]
pub struct ListOptions {
    /// Used in logs.
    pub name: String,
    pub page_size: usize,
    pub order_by: Option<String>,
    pub order_direction: Option<SortDirection>,
    /// Sent with every request; per-load filters win on conflict.
    pub base_filters: Filters,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            name: "list".to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            order_by: None,
            order_direction: None,
            base_filters: Filters::new(),
        }
    }
}

impl ListOptions {
    pub fn from_config(list: &ListConfig, defaults: &Defaults) -> Self {
        Self {
            name: list.name.clone(),
            page_size: list.effective_page_size(defaults) as usize,
            order_by: list.order_by.clone(),
            order_direction: list.order_direction,
            base_filters: list.filters.clone(),
        }
    }
}

struct Inner<S: PageSource> {
    source: S,
    options: ListOptions,
    state: Mutex<ListState<S::Item>>,
}

/// Incrementally loads a filtered, server-paginated collection.
///
/// Cloning yields another handle to the same list. The state lock is
/// only held between awaits, never across a fetch.
pub struct PagedListController<S: PageSource> {
    inner: Arc<Inner<S>>,
}

impl<S: PageSource> Clone for PagedListController<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: PageSource> std::fmt::Debug for PagedListController<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.state.lock();
        f.debug_struct("PagedListController")
            .field("name", &self.inner.options.name)
            .field("items", &state.items.len())
            .field("total", &state.total)
            .field("generation", &state.generation)
            .finish()
    }
}

/// A request captured under the state lock, to run after releasing it.
struct Ticket {
    generation: u64,
    phase: LoadPhase,
    request: PageRequest,
}

impl<S> PagedListController<S>
where
    S: PageSource,
    S::Item: ListItem,
{
    pub fn new(source: S, options: ListOptions) -> Self {
        let state = ListState::new(options.page_size);
        Self {
            inner: Arc::new(Inner {
                source,
                options,
                state: Mutex::new(state),
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.inner.options.name
    }

    pub fn options(&self) -> &ListOptions {
        &self.inner.options
    }

    /// Load the first page with `filters`.
    ///
    /// Current items stay visible until the page arrives; on failure they
    /// are left as they were.
    pub async fn load_initial(&self, filters: Filters) -> LoadOutcome {
        let ticket = self.begin_initial(ListIntent::InitialStarted { filters });
        self.run(ticket).await
    }

    /// Discard the list and load the first page with `filters`.
    ///
    /// Anything still in flight from before the reset is ignored when it
    /// lands.
    pub async fn reset(&self, filters: Filters) -> LoadOutcome {
        let ticket = self.begin_initial(ListIntent::Reset { filters });
        self.run(ticket).await
    }

    /// Load the page after the last one applied.
    ///
    /// Returns [`LoadOutcome::Skipped`] without fetching when a request is
    /// already in flight, no first page has loaded, or the list is complete.
    pub async fn load_more(&self) -> LoadOutcome {
        let ticket = {
            let mut state = self.inner.state.lock();
            if !state.can_load_more() {
                tracing::debug!(
                    list = %self.name(),
                    loading = state.loading,
                    loading_more = state.loading_more,
                    all_loaded = state.all_loaded(),
                    "load_more skipped"
                );
                return LoadOutcome::Skipped;
            }
            dispatch::<ListReducer<S::Item>>(&mut *state, ListIntent::MoreStarted);
            Ticket {
                generation: state.generation,
                phase: LoadPhase::More,
                request: self.request_for(state.next_offset(), &state.filters),
            }
        };
        self.run(ticket).await
    }

    /// Keep calling [`load_more`](Self::load_more) until the list is
    /// complete, a request fails, or `max_pages` further pages were loaded.
    ///
    /// Returns the number of pages applied and the last outcome.
    pub async fn load_remaining(&self, max_pages: Option<usize>) -> (usize, LoadOutcome) {
        let mut pages = 0;
        loop {
            if max_pages.is_some_and(|max| pages >= max) {
                return (pages, LoadOutcome::Skipped);
            }
            match self.load_more().await {
                LoadOutcome::Applied { .. } => pages += 1,
                other => return (pages, other),
            }
        }
    }

    /// Show a locally created item right away.
    ///
    /// Returns `false` if an item with the same id is already listed.
    pub fn insert_optimistic(&self, item: S::Item) -> bool {
        let mut state = self.inner.state.lock();
        let before = state.items.len();
        dispatch::<ListReducer<S::Item>>(&mut *state, ListIntent::Inserted { item });
        let inserted = state.items.len() > before;
        tracing::debug!(list = %self.name(), inserted, "Optimistic insert");
        inserted
    }

    pub fn dismiss_error(&self) {
        let mut state = self.inner.state.lock();
        dispatch::<ListReducer<S::Item>>(&mut *state, ListIntent::ErrorDismissed);
    }

    /// Copy of the current state, for rendering.
    pub fn snapshot(&self) -> ListState<S::Item> {
        self.inner.state.lock().clone()
    }

    pub fn items(&self) -> Vec<S::Item> {
        self.inner.state.lock().items.clone()
    }

    pub fn len(&self) -> usize {
        self.inner.state.lock().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.state.lock().items.is_empty()
    }

    pub fn total(&self) -> usize {
        self.inner.state.lock().total
    }

    pub fn offset(&self) -> usize {
        self.inner.state.lock().offset
    }

    pub fn is_loading(&self) -> bool {
        self.inner.state.lock().loading
    }

    pub fn is_loading_more(&self) -> bool {
        self.inner.state.lock().loading_more
    }

    pub fn all_loaded(&self) -> bool {
        self.inner.state.lock().all_loaded()
    }

    pub fn error(&self) -> Option<ListError> {
        self.inner.state.lock().error.clone()
    }

    fn begin_initial(&self, intent: ListIntent<S::Item>) -> Ticket {
        let mut state = self.inner.state.lock();
        dispatch::<ListReducer<S::Item>>(&mut *state, intent);
        Ticket {
            generation: state.generation,
            phase: LoadPhase::Initial,
            request: self.request_for(0, &state.filters),
        }
    }

    fn request_for(&self, offset: usize, filters: &Filters) -> PageRequest {
        let options = &self.inner.options;
        let mut merged = options.base_filters.clone();
        merged.extend(filters.iter().map(|(k, v)| (k.clone(), v.clone())));
        PageRequest::new(options.page_size, offset, merged)
            .with_order(options.order_by.clone(), options.order_direction)
    }

    async fn run(&self, ticket: Ticket) -> LoadOutcome {
        tracing::debug!(
            list = %self.name(),
            generation = ticket.generation,
            phase = ?ticket.phase,
            offset = ticket.request.offset,
            limit = ticket.request.limit,
            "Requesting page"
        );
        let result = self.inner.source.fetch_page(&ticket.request).await;
        self.apply(ticket, result)
    }

    fn apply(
        &self,
        ticket: Ticket,
        result: Result<crate::api::PageResult<S::Item>, TransportError>,
    ) -> LoadOutcome {
        let mut state = self.inner.state.lock();

        if state.generation != ticket.generation {
            tracing::warn!(
                list = %self.name(),
                issued = ticket.generation,
                current = state.generation,
                "Dropping stale response"
            );
            return LoadOutcome::Stale;
        }

        match result {
            Ok(page) => {
                let before = match ticket.phase {
                    LoadPhase::Initial => 0,
                    LoadPhase::More => state.items.len(),
                };
                dispatch::<ListReducer<S::Item>>(
                    &mut *state,
                    ListIntent::PageLoaded {
                        generation: ticket.generation,
                        phase: ticket.phase,
                        offset: ticket.request.offset,
                        page,
                    },
                );
                let appended = state.items.len() - before;
                tracing::info!(
                    list = %self.name(),
                    generation = ticket.generation,
                    offset = state.offset,
                    appended,
                    loaded = state.items.len(),
                    total = state.total,
                    "Page applied"
                );
                LoadOutcome::Applied { appended }
            }
            Err(err) => {
                let message = err.display_message();
                tracing::warn!(
                    list = %self.name(),
                    generation = ticket.generation,
                    phase = ?ticket.phase,
                    error_type = err.error_type(),
                    error = %err,
                    "Page request failed"
                );
                dispatch::<ListReducer<S::Item>>(
                    &mut *state,
                    ListIntent::PageFailed {
                        generation: ticket.generation,
                        phase: ticket.phase,
                        message: message.clone(),
                    },
                );
                LoadOutcome::Failed { message }
            }
        }
    }
}
