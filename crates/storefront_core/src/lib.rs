//! Catalog view-state machine for the storefront: filtering, pagination,
//! the fetch lifecycle of a mounted view, product cards and the cart.

pub mod card;
pub mod cart;
pub mod config;
pub mod error;
pub mod fetch;
pub mod filter;
pub mod pagination;
pub mod source;
pub mod stock;
pub mod store;
pub mod view;

pub use card::{AddToCartOutcome, ProductCard};
pub use cart::{Cart, CartDispatcher, CartLine};
pub use config::{load_settings, Settings, SettingsError};
pub use error::CatalogError;
pub use fetch::{fetch_catalog, ApplyOutcome, FetchLifecycle, LoadHandle, RetryPolicy};
pub use filter::{filter_products, parse_filter_tag};
pub use pagination::{PageButton, PaginationBar, DEFAULT_PAGE_SIZE};
pub use source::{products_from_records, CatalogSource, HttpCatalogSource};
pub use stock::{QuantityStock, SimulatedStock, StockPolicy};
pub use store::{CatalogState, CatalogStore, StoreChange};
pub use view::CatalogView;

#[cfg(test)]
#[path = "tests/support.rs"]
mod test_support;
