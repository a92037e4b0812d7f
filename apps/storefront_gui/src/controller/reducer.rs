//! Reducer-like state transitions for the storefront window.
//!
//! UI actions and backend events both funnel through [`AppState`]; the
//! catalog view lives only while the catalog route is shown, so leaving the
//! route tears the view down and cancels its load.

use shared::{
    domain::{CategoryTag, Product, ProductId},
    error::{ApiError, ErrorCode},
    protocol::CartAction,
};
use storefront_core::{AddToCartOutcome, ApplyOutcome, Cart, CartDispatcher, CatalogView, ProductCard};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Catalog,
    Cart,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UiAction {
    SelectFilter(CategoryTag),
    GoToPage(usize),
    NextPage,
    PreviousPage,
    AddToCart(ProductId),
    CartIncrement(ProductId),
    CartDecrement(ProductId),
    CartRemove(ProductId),
    Navigate(Route),
    RetryLoad,
    FetchImage { id: ProductId, url: String },
}

pub struct AppState {
    pub route: Route,
    pub catalog: Option<CatalogView>,
    pub cart: Cart,
    pub status: String,
    pub banner: Option<UiError>,
    page_size: usize,
}

impl AppState {
    pub fn new(page_size: usize) -> Self {
        Self {
            route: Route::Catalog,
            catalog: None,
            cart: Cart::new(),
            status: "Starting".to_string(),
            banner: None,
            page_size,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.catalog
            .as_ref()
            .is_some_and(|view| view.state().is_loading())
    }

    /// Applies one UI action. Returns the backend command it triggers, if any.
    pub fn reduce_action(&mut self, action: UiAction) -> Option<BackendCommand> {
        match action {
            UiAction::SelectFilter(tag) => {
                if let Some(view) = self.catalog.as_mut() {
                    view.select_filter(tag);
                }
                None
            }
            UiAction::GoToPage(page) => {
                if let Some(view) = self.catalog.as_mut() {
                    view.go_to_page(page);
                }
                None
            }
            UiAction::NextPage => {
                if let Some(view) = self.catalog.as_mut() {
                    view.next_page();
                }
                None
            }
            UiAction::PreviousPage => {
                if let Some(view) = self.catalog.as_mut() {
                    view.previous_page();
                }
                None
            }
            UiAction::AddToCart(id) => {
                self.add_to_cart(id);
                None
            }
            UiAction::CartIncrement(id) => {
                self.dispatch_cart_line(id, CartAction::AddItem);
                None
            }
            UiAction::CartDecrement(id) => {
                self.dispatch_cart_line(id, CartAction::DelItem);
                None
            }
            UiAction::CartRemove(id) => {
                self.dispatch_cart_line(id, CartAction::RemoveItem);
                None
            }
            UiAction::Navigate(route) => self.navigate(route),
            UiAction::RetryLoad => {
                self.banner = None;
                self.start_load()
            }
            UiAction::FetchImage { id, url } => Some(BackendCommand::FetchProductImage { id, url }),
        }
    }

    pub fn reduce_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::Info(message) => self.status = message,
            UiEvent::Error(err) => {
                self.status = err.message().to_string();
                self.banner = Some(err);
            }
            UiEvent::CatalogLoaded { handle, result } => {
                let Some(view) = self.catalog.as_mut() else {
                    tracing::debug!("catalog result arrived with no mounted view");
                    return;
                };
                match view.finish_load(&handle, result) {
                    ApplyOutcome::Applied { products } => {
                        self.banner = None;
                        self.status = format!("Loaded {products} products");
                    }
                    ApplyOutcome::Failed => {
                        if let Some(error) = view.state().load_error() {
                            let err = UiError::from_api(UiErrorContext::CatalogLoad, error);
                            self.status = err.message().to_string();
                            self.banner = Some(err);
                        }
                    }
                    ApplyOutcome::Discarded => {}
                }
            }
            // Pixels belong to the catalog UI, which intercepts these first.
            UiEvent::ProductImageLoaded { id, .. } | UiEvent::ProductImageFailed { id } => {
                tracing::debug!(product_id = id.0, "product image event reached the reducer");
            }
        }
    }

    /// Unwinds a load the backend queue refused so the view is not left
    /// loading forever.
    pub fn command_rejected(&mut self, cmd: BackendCommand, reason: &str) {
        if let BackendCommand::LoadCatalog { handle } = cmd {
            self.reduce_event(UiEvent::CatalogLoaded {
                handle,
                result: Err(ApiError::new(ErrorCode::Internal, reason)),
            });
        }
    }

    fn navigate(&mut self, route: Route) -> Option<BackendCommand> {
        self.route = route;
        match route {
            Route::Catalog => {
                if self.catalog.is_some() {
                    return None;
                }
                self.catalog = Some(CatalogView::mount(self.page_size));
                self.start_load()
            }
            Route::Cart => {
                // Dropping the view cancels a load that is still in flight.
                self.catalog = None;
                None
            }
        }
    }

    fn start_load(&mut self) -> Option<BackendCommand> {
        let handle = self.catalog.as_mut()?.start_load()?;
        self.status = "Loading catalog…".to_string();
        Some(BackendCommand::LoadCatalog { handle })
    }

    fn add_to_cart(&mut self, id: ProductId) {
        let Some(view) = self.catalog.as_ref() else {
            return;
        };
        let Some(product) = view.state().products().iter().find(|p| p.id == id) else {
            tracing::warn!(product_id = id.0, "add to cart for unknown product");
            return;
        };
        let card = ProductCard::new(product.clone());
        self.status = match card.add_to_cart(&mut self.cart) {
            AddToCartOutcome::Added => format!("Added \"{}\" to cart", card.product().title),
            AddToCartOutcome::Unavailable => format!("\"{}\" is out of stock", card.product().title),
        };
    }

    fn dispatch_cart_line(&mut self, id: ProductId, action: fn(Product) -> CartAction) {
        let Some(line) = self.cart.lines().iter().find(|line| line.product.id == id) else {
            return;
        };
        let product = line.product.clone();
        self.cart.dispatch(action(product));
    }
}

#[cfg(test)]
#[path = "tests/reducer_tests.rs"]
mod tests;
