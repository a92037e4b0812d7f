//! One mounted catalog view: a store plus the lifecycle of its single load.
//! Dropping the view tears it down and cancels an outstanding load.

use shared::{
    domain::{CategoryTag, Product},
    error::ApiError,
};

use crate::{
    card::{cards_for, ProductCard},
    fetch::{fetch_catalog, ApplyOutcome, FetchLifecycle, LoadHandle, RetryPolicy},
    source::CatalogSource,
    stock::StockPolicy,
    store::{CatalogState, CatalogStore, StoreChange},
};

#[derive(Debug)]
pub struct CatalogView {
    store: CatalogStore,
    lifecycle: FetchLifecycle,
}

impl CatalogView {
    pub fn mount(page_size: usize) -> Self {
        Self {
            store: CatalogStore::new(page_size),
            lifecycle: FetchLifecycle::new(),
        }
    }

    pub fn state(&self) -> &CatalogState {
        self.store.state()
    }

    pub fn revision(&self) -> u64 {
        self.store.revision()
    }

    pub fn subscribe(&mut self, observer: impl FnMut(&StoreChange, &CatalogState) + Send + 'static) {
        self.store.subscribe(observer);
    }

    pub fn start_load(&mut self) -> Option<LoadHandle> {
        self.lifecycle.begin(&mut self.store)
    }

    pub fn finish_load(
        &mut self,
        handle: &LoadHandle,
        result: Result<Vec<Product>, ApiError>,
    ) -> ApplyOutcome {
        self.lifecycle.apply(&mut self.store, handle, result)
    }

    /// Runs the whole load inline. `None` when no load may start.
    pub async fn load_from<S>(
        &mut self,
        source: &S,
        stock: &dyn StockPolicy,
        retry: &RetryPolicy,
    ) -> Option<ApplyOutcome>
    where
        S: CatalogSource + ?Sized,
    {
        let handle = self.start_load()?;
        let result = fetch_catalog(source, stock, retry, &handle)
            .await
            .map_err(ApiError::from);
        Some(self.finish_load(&handle, result))
    }

    pub fn select_filter(&mut self, tag: CategoryTag) {
        self.store.set_filter(tag);
    }

    pub fn select_filter_tag(&mut self, raw: &str) {
        self.store.set_filter_tag(raw);
    }

    pub fn go_to_page(&mut self, page: usize) -> usize {
        self.store.set_page(page)
    }

    pub fn next_page(&mut self) -> usize {
        self.store.next_page()
    }

    pub fn previous_page(&mut self) -> usize {
        self.store.previous_page()
    }

    /// Cards for the products on the current page.
    pub fn cards(&self) -> Vec<ProductCard> {
        cards_for(self.store.state().visible_products())
    }

    pub fn teardown(&mut self) {
        self.lifecycle.teardown();
    }

    pub fn is_torn_down(&self) -> bool {
        self.lifecycle.is_torn_down()
    }
}

#[cfg(test)]
#[path = "tests/view_tests.rs"]
mod tests;
