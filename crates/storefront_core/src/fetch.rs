//! Fetch lifecycle for one mounted catalog view.
//!
//! A view owns a [`FetchLifecycle`]. Starting a load hands out a
//! [`LoadHandle`] that travels with the asynchronous request; the result is
//! only applied if it comes back with the view's current handle and the
//! handle has not been cancelled by teardown.

use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};

use shared::{domain::Product, error::ApiError};
use tracing::{debug, info, warn};

use crate::{
    error::CatalogError,
    source::{products_from_records, CatalogSource},
    stock::StockPolicy,
    store::CatalogStore,
};

const DEFAULT_FETCH_ATTEMPTS: u32 = 3;
const DEFAULT_FETCH_RETRY_DELAY: Duration = Duration::from_millis(500);

/// Cancellation token for one catalog load.
#[derive(Debug, Clone)]
pub struct LoadHandle {
    cancelled: Arc<AtomicBool>,
}

impl LoadHandle {
    pub fn new() -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// True when both handles were cloned from the same load.
    pub fn same_load(&self, other: &LoadHandle) -> bool {
        Arc::ptr_eq(&self.cancelled, &other.cancelled)
    }
}

impl Default for LoadHandle {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_FETCH_ATTEMPTS,
            delay: DEFAULT_FETCH_RETRY_DELAY,
        }
    }
}

impl RetryPolicy {
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            delay: Duration::ZERO,
        }
    }
}

/// Fetches the catalog, retrying retryable failures up to the policy's
/// attempt budget. Stops early once `handle` is cancelled.
pub async fn fetch_catalog<S>(
    source: &S,
    stock: &dyn StockPolicy,
    retry: &RetryPolicy,
    handle: &LoadHandle,
) -> Result<Vec<Product>, CatalogError>
where
    S: CatalogSource + ?Sized,
{
    let attempts = retry.max_attempts.max(1);
    let mut attempt = 1;
    loop {
        if handle.is_cancelled() {
            return Err(CatalogError::Cancelled);
        }
        match source.fetch_records().await {
            Ok(records) => return Ok(products_from_records(records, stock)),
            Err(err) if err.is_retryable() && attempt < attempts => {
                warn!(attempt, attempts, "catalog fetch failed, retrying: {err}");
                attempt += 1;
                tokio::time::sleep(retry.delay).await;
            }
            Err(err) => {
                warn!(attempt, attempts, "catalog fetch failed: {err}");
                return Err(err);
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Applied { products: usize },
    Failed,
    /// The view was torn down or the result belongs to an older load.
    Discarded,
}

#[derive(Debug, Default)]
pub struct FetchLifecycle {
    current: Option<LoadHandle>,
    in_flight: bool,
    torn_down: bool,
}

impl FetchLifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a load: marks the store loading and returns the handle the
    /// request must carry. Returns `None` while a load is outstanding, after
    /// a successful load, or after teardown.
    pub fn begin(&mut self, store: &mut CatalogStore) -> Option<LoadHandle> {
        if self.torn_down || self.in_flight {
            return None;
        }
        if self.current.is_some() && store.state().load_error().is_none() {
            return None;
        }
        let handle = LoadHandle::new();
        self.current = Some(handle.clone());
        self.in_flight = true;
        store.begin_load();
        info!("catalog load started");
        Some(handle)
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// The single point where a finished request may touch the store.
    pub fn apply(
        &mut self,
        store: &mut CatalogStore,
        handle: &LoadHandle,
        result: Result<Vec<Product>, ApiError>,
    ) -> ApplyOutcome {
        let is_current = self
            .current
            .as_ref()
            .is_some_and(|current| current.same_load(handle));
        if self.torn_down || handle.is_cancelled() || !is_current || !self.in_flight {
            debug!(
                torn_down = self.torn_down,
                is_current, "discarding catalog load result"
            );
            return ApplyOutcome::Discarded;
        }

        self.in_flight = false;
        match result {
            Ok(products) => {
                let count = products.len();
                store.set_products(products);
                store.end_load();
                info!(products = count, "catalog load finished");
                ApplyOutcome::Applied { products: count }
            }
            Err(error) => {
                warn!(code = ?error.code, "catalog load failed: {}", error.message);
                store.fail_load(error);
                ApplyOutcome::Failed
            }
        }
    }

    /// Cancels the outstanding load, if any. Later results are dropped.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        if let Some(handle) = &self.current {
            handle.cancel();
        }
        debug!(in_flight = self.in_flight, "catalog view torn down");
    }
}

impl Drop for FetchLifecycle {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
#[path = "tests/fetch_tests.rs"]
mod tests;
