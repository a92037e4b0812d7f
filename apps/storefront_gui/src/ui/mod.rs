//! UI layer for the storefront window: app shell, catalog grid and cart panel.

pub mod app;
pub mod cart;
pub mod catalog;

pub use app::StorefrontApp;
