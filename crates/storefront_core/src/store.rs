//! Owner of the catalog view state.
//!
//! Every mutator runs to completion and re-establishes the page invariant
//! (`1 <= page <= total_pages`) before observers are notified, so a reader
//! never sees a half-applied change.

use std::fmt;

use shared::{
    domain::{CategoryTag, Product},
    error::ApiError,
};
use tracing::debug;

use crate::{
    filter::{filter_products, parse_filter_tag},
    pagination::{self, PaginationBar, DEFAULT_PAGE_SIZE},
};

#[derive(Debug, Clone, PartialEq)]
pub struct CatalogState {
    products: Vec<Product>,
    filtered: Vec<Product>,
    loading: bool,
    active_filter: CategoryTag,
    page: usize,
    page_size: usize,
    load_error: Option<ApiError>,
}

impl CatalogState {
    fn empty(page_size: usize) -> Self {
        Self {
            products: Vec::new(),
            filtered: Vec::new(),
            loading: false,
            active_filter: CategoryTag::All,
            page: 1,
            page_size: page_size.max(1),
            load_error: None,
        }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn filtered_products(&self) -> &[Product] {
        &self.filtered
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn active_filter(&self) -> CategoryTag {
        self.active_filter
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn load_error(&self) -> Option<&ApiError> {
        self.load_error.as_ref()
    }

    pub fn total_pages(&self) -> usize {
        pagination::total_pages(self.filtered.len(), self.page_size)
    }

    pub fn visible_products(&self) -> &[Product] {
        pagination::visible_slice(&self.filtered, self.page, self.page_size)
    }

    /// Page-button model for the current page, including the single-page case.
    pub fn pagination(&self) -> PaginationBar {
        PaginationBar::new(self.page, self.total_pages())
    }

    /// The bar to render; `None` when there is nothing to paginate.
    pub fn pagination_bar(&self) -> Option<PaginationBar> {
        pagination::pagination_bar(self.page, self.total_pages())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum StoreChange {
    LoadStarted,
    ProductsReplaced { count: usize },
    FilterChanged { tag: CategoryTag, matched: usize },
    PageChanged { page: usize },
    LoadFinished,
    LoadFailed(ApiError),
}

pub type StoreObserver = Box<dyn FnMut(&StoreChange, &CatalogState) + Send>;

pub struct CatalogStore {
    state: CatalogState,
    revision: u64,
    observers: Vec<StoreObserver>,
}

impl fmt::Debug for CatalogStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogStore")
            .field("state", &self.state)
            .field("revision", &self.revision)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl CatalogStore {
    pub fn new(page_size: usize) -> Self {
        Self {
            state: CatalogState::empty(page_size),
            revision: 0,
            observers: Vec::new(),
        }
    }

    pub fn state(&self) -> &CatalogState {
        &self.state
    }

    /// Bumped once per effective mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn subscribe(&mut self, observer: impl FnMut(&StoreChange, &CatalogState) + Send + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Replaces the catalog. The filtered list is rebuilt for the active
    /// filter (identical to `products` under `All`) and the page resets.
    pub fn set_products(&mut self, products: Vec<Product>) {
        let count = products.len();
        self.state.filtered = filter_products(&products, self.state.active_filter);
        self.state.products = products;
        self.state.page = 1;
        self.commit(StoreChange::ProductsReplaced { count });
    }

    pub fn set_filter(&mut self, tag: CategoryTag) {
        self.state.active_filter = tag;
        self.state.filtered = filter_products(&self.state.products, tag);
        self.state.page = 1;
        debug!(
            filter = tag.as_str(),
            matched = self.state.filtered.len(),
            "catalog filter changed"
        );
        let matched = self.state.filtered.len();
        self.commit(StoreChange::FilterChanged { tag, matched });
    }

    pub fn set_filter_tag(&mut self, raw: &str) {
        self.set_filter(parse_filter_tag(raw));
    }

    /// Out-of-range requests are clamped into `[1, total_pages]`. Returns
    /// the page now current.
    pub fn set_page(&mut self, requested: usize) -> usize {
        let total = self.state.total_pages();
        let page = pagination::clamp_page(requested, total);
        if page != requested {
            debug!(requested, page, total, "clamped page request");
        }
        if page != self.state.page {
            self.state.page = page;
            self.commit(StoreChange::PageChanged { page });
        }
        page
    }

    pub fn next_page(&mut self) -> usize {
        self.set_page(self.state.page.saturating_add(1))
    }

    pub fn previous_page(&mut self) -> usize {
        self.set_page(self.state.page.saturating_sub(1))
    }

    pub fn begin_load(&mut self) {
        self.state.loading = true;
        self.state.load_error = None;
        self.commit(StoreChange::LoadStarted);
    }

    pub fn end_load(&mut self) {
        self.state.loading = false;
        self.commit(StoreChange::LoadFinished);
    }

    pub fn fail_load(&mut self, error: ApiError) {
        self.state.loading = false;
        self.state.load_error = Some(error.clone());
        self.commit(StoreChange::LoadFailed(error));
    }

    fn commit(&mut self, change: StoreChange) {
        self.revision += 1;
        for observer in &mut self.observers {
            observer(&change, &self.state);
        }
    }
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
