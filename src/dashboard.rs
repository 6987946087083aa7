// src/dashboard.rs
//! Dashboard view-state machine: URL-synced filters, debounced search,
//! and stale-response suppression.
//!
//! Every fetch is tagged with a monotonically increasing generation; only
//! the response matching the latest generation may commit to the visible
//! view, so out-of-order resolutions for filters the user has navigated
//! away from are discarded. Search-text changes are debounced before
//! triggering a fetch, collapsing rapid keystrokes into one request.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tracing::debug;

use crate::dtos::product::ProductPage;
use crate::filters::{ProductFilters, SortField, SortOrder};
use crate::services::products::ProductService;

/// The three must-be-distinguishable view states: loading skeleton,
/// rendered content (possibly empty), and the error panel.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> ViewState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, ViewState::Ready(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, ViewState::Failed(_))
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            ViewState::Ready(value) => Some(value),
            _ => None,
        }
    }
}

struct DashboardState {
    filters: ProductFilters,
    /// Visible location query string. Replaced in place on every filter
    /// change, never pushed, so history stays intact.
    url_query: String,
    /// Generation of the newest issued fetch; older responses are dropped.
    fetch_gen: u64,
    /// Generation of the newest search keystroke; superseded debounce
    /// timers fire into the void.
    search_gen: u64,
    view: ViewState<ProductPage>,
}

/// Controller for the product-list dashboard.
///
/// Clones share state; clone freely into spawned tasks.
#[derive(Clone)]
pub struct Dashboard {
    products: ProductService,
    state: Arc<Mutex<DashboardState>>,
    debounce: Duration,
}

impl Dashboard {
    pub fn new(products: ProductService, debounce: Duration) -> Self {
        let filters = ProductFilters::default();
        let url_query = filters.encode();
        Self {
            products,
            state: Arc::new(Mutex::new(DashboardState {
                filters,
                url_query,
                fetch_gen: 0,
                search_gen: 0,
                view: ViewState::Loading,
            })),
            debounce,
        }
    }

    /// Restore filter state from a URL query string and fetch.
    pub async fn restore(&self, query: &str) {
        self.apply(ProductFilters::decode(query)).await;
    }

    pub fn filters(&self) -> ProductFilters {
        self.lock().filters.clone()
    }

    /// The query string the browser location should currently show.
    pub fn url_query(&self) -> String {
        self.lock().url_query.clone()
    }

    pub fn view(&self) -> ViewState<ProductPage> {
        self.lock().view.clone()
    }

    /// Commit new filters, sync the URL, and fetch the matching page.
    /// A response only becomes visible if no newer fetch was issued while
    /// it was in flight.
    pub async fn apply(&self, filters: ProductFilters) {
        let generation = {
            let mut state = self.lock();
            state.filters = filters.clone();
            state.url_query = filters.encode();
            state.fetch_gen += 1;
            state.view = ViewState::Loading;
            state.fetch_gen
        };

        let result = self.products.list(&filters).await;

        let mut state = self.lock();
        if state.fetch_gen != generation {
            debug!(generation, latest = state.fetch_gen, "discarding stale response");
            return;
        }
        state.view = match result {
            Ok(page) => ViewState::Ready(page),
            Err(e) => ViewState::Failed(e.to_string()),
        };
    }

    pub async fn refresh(&self) {
        let filters = self.filters();
        self.apply(filters).await;
    }

    pub async fn set_category(&self, category: impl Into<String>) {
        let filters = self.filters().with_category(category);
        self.apply(filters).await;
    }

    pub async fn set_sort(&self, sort_by: SortField, sort_order: SortOrder) {
        let filters = self.filters().with_sort(sort_by, sort_order);
        self.apply(filters).await;
    }

    pub async fn set_page(&self, page: u32) {
        let filters = self.filters().with_page(page);
        self.apply(filters).await;
    }

    /// Record a search keystroke. The fetch fires only after the debounce
    /// window passes with no newer keystroke.
    pub fn set_search(&self, search: impl Into<String>) {
        let search = search.into();
        let generation = {
            let mut state = self.lock();
            state.search_gen += 1;
            state.search_gen
        };

        let dashboard = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(dashboard.debounce).await;
            let filters = {
                let state = dashboard.lock();
                if state.search_gen != generation {
                    return; // superseded by a newer keystroke
                }
                state.filters.with_search(search)
            };
            dashboard.apply(filters).await;
        });
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, DashboardState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}
