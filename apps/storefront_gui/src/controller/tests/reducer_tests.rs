use shared::{
    domain::{CategoryTag, Product, ProductId},
    error::{ApiError, ErrorCode},
};

use super::{AppState, Route, UiAction};
use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiErrorContext, UiEvent};

fn product(id: i64, category: &str) -> Product {
    Product {
        id: ProductId(id),
        title: format!("Product {id}"),
        price: 5.0 * id as f64,
        image: String::new(),
        category: category.to_string(),
        in_stock: id % 3 != 0,
        variants: Vec::new(),
    }
}

fn catalog(total: i64) -> Vec<Product> {
    (1..=total)
        .map(|id| product(id, if id % 2 == 0 { "electronics" } else { "jewelery" }))
        .collect()
}

fn mounted_with(products: Vec<Product>) -> AppState {
    let mut state = AppState::new(8);
    let Some(BackendCommand::LoadCatalog { handle }) =
        state.reduce_action(UiAction::Navigate(Route::Catalog))
    else {
        panic!("mounting the catalog should request a load");
    };
    assert!(state.is_loading());
    state.reduce_event(UiEvent::CatalogLoaded {
        handle,
        result: Ok(products),
    });
    state
}

#[test]
fn mounting_loads_once_and_applies_products() {
    let mut state = mounted_with(catalog(20));
    assert!(!state.is_loading());
    assert_eq!(state.status, "Loaded 20 products");
    let view = state.catalog.as_ref().expect("mounted view");
    assert_eq!(view.state().total_pages(), 3);

    assert!(state
        .reduce_action(UiAction::Navigate(Route::Catalog))
        .is_none());
    assert!(state.reduce_action(UiAction::RetryLoad).is_none());
}

#[test]
fn filter_and_paging_actions_reach_the_view() {
    let mut state = mounted_with(catalog(20));
    state.reduce_action(UiAction::GoToPage(3));
    assert_eq!(state.catalog.as_ref().unwrap().state().page(), 3);

    state.reduce_action(UiAction::SelectFilter(CategoryTag::Electronics));
    let view = state.catalog.as_ref().unwrap().state();
    assert_eq!(view.page(), 1);
    assert_eq!(view.filtered_products().len(), 10);

    state.reduce_action(UiAction::NextPage);
    state.reduce_action(UiAction::NextPage);
    assert_eq!(state.catalog.as_ref().unwrap().state().page(), 2);
    state.reduce_action(UiAction::PreviousPage);
    assert_eq!(state.catalog.as_ref().unwrap().state().page(), 1);
}

#[test]
fn leaving_the_catalog_cancels_the_outstanding_load() {
    let mut state = AppState::new(8);
    let Some(BackendCommand::LoadCatalog { handle }) =
        state.reduce_action(UiAction::Navigate(Route::Catalog))
    else {
        panic!("expected a load command");
    };

    state.reduce_action(UiAction::Navigate(Route::Cart));
    assert!(handle.is_cancelled());
    assert!(state.catalog.is_none());

    state.reduce_event(UiEvent::CatalogLoaded {
        handle,
        result: Ok(catalog(5)),
    });
    assert!(state.catalog.is_none());

    let Some(BackendCommand::LoadCatalog { handle: second }) =
        state.reduce_action(UiAction::Navigate(Route::Catalog))
    else {
        panic!("remounting should request a fresh load");
    };
    assert!(!second.is_cancelled());
    assert!(state.catalog.as_ref().unwrap().state().products().is_empty());
}

#[test]
fn stale_result_from_a_previous_mount_is_ignored() {
    let mut state = AppState::new(8);
    let Some(BackendCommand::LoadCatalog { handle: first }) =
        state.reduce_action(UiAction::Navigate(Route::Catalog))
    else {
        panic!("expected a load command");
    };
    state.reduce_action(UiAction::Navigate(Route::Cart));
    let _second = state.reduce_action(UiAction::Navigate(Route::Catalog));

    state.reduce_event(UiEvent::CatalogLoaded {
        handle: first,
        result: Ok(catalog(5)),
    });
    let view = state.catalog.as_ref().unwrap().state();
    assert!(view.products().is_empty());
    assert!(view.is_loading());
}

#[test]
fn failed_load_raises_banner_and_can_be_retried() {
    let mut state = AppState::new(8);
    let Some(BackendCommand::LoadCatalog { handle }) =
        state.reduce_action(UiAction::Navigate(Route::Catalog))
    else {
        panic!("expected a load command");
    };
    state.reduce_event(UiEvent::CatalogLoaded {
        handle,
        result: Err(ApiError::new(ErrorCode::Transport, "connection refused")),
    });

    let banner = state.banner.as_ref().expect("error banner");
    assert_eq!(banner.context(), UiErrorContext::CatalogLoad);
    assert!(banner.is_retryable());
    assert!(!state.is_loading());

    let retry = state.reduce_action(UiAction::RetryLoad);
    assert!(matches!(retry, Some(BackendCommand::LoadCatalog { .. })));
    assert!(state.banner.is_none());
    assert!(state.is_loading());
}

#[test]
fn rejected_command_unwinds_loading_state() {
    let mut state = AppState::new(8);
    let cmd = state
        .reduce_action(UiAction::Navigate(Route::Catalog))
        .expect("load command");
    state.command_rejected(cmd, "UI command queue is full; please retry");

    assert!(!state.is_loading());
    let error = state
        .catalog
        .as_ref()
        .and_then(|view| view.state().load_error().cloned())
        .expect("load error recorded");
    assert_eq!(error.code, ErrorCode::Internal);
    assert!(state.reduce_action(UiAction::RetryLoad).is_some());
}

#[test]
fn add_to_cart_respects_stock_and_cart_line_actions() {
    let mut state = mounted_with(catalog(6));

    state.reduce_action(UiAction::AddToCart(ProductId(3)));
    assert!(state.cart.is_empty());
    assert_eq!(state.status, "\"Product 3\" is out of stock");

    state.reduce_action(UiAction::AddToCart(ProductId(2)));
    state.reduce_action(UiAction::AddToCart(ProductId(2)));
    state.reduce_action(UiAction::AddToCart(ProductId(4)));
    assert_eq!(state.cart.quantity_of(ProductId(2)), 2);
    assert_eq!(state.cart.item_count(), 3);

    state.reduce_action(UiAction::CartIncrement(ProductId(4)));
    assert_eq!(state.cart.quantity_of(ProductId(4)), 2);
    state.reduce_action(UiAction::CartDecrement(ProductId(2)));
    state.reduce_action(UiAction::CartDecrement(ProductId(2)));
    assert_eq!(state.cart.quantity_of(ProductId(2)), 0);
    state.reduce_action(UiAction::CartRemove(ProductId(4)));
    assert!(state.cart.is_empty());

    state.reduce_action(UiAction::CartIncrement(ProductId(5)));
    assert!(state.cart.is_empty());
}

#[test]
fn cart_survives_leaving_the_catalog() {
    let mut state = mounted_with(catalog(4));
    state.reduce_action(UiAction::AddToCart(ProductId(1)));
    state.reduce_action(UiAction::Navigate(Route::Cart));
    assert_eq!(state.route, Route::Cart);
    assert_eq!(state.cart.item_count(), 1);
}

#[test]
fn undecodable_catalog_offers_no_retry() {
    let mut state = AppState::new(8);
    let Some(BackendCommand::LoadCatalog { handle }) =
        state.reduce_action(UiAction::Navigate(Route::Catalog))
    else {
        panic!("expected a load command");
    };
    state.reduce_event(UiEvent::CatalogLoaded {
        handle,
        result: Err(ApiError::new(ErrorCode::Decode, "expected a sequence")),
    });

    let banner = state.banner.as_ref().expect("error banner");
    assert!(!banner.is_retryable());
}

#[test]
fn image_requests_become_backend_commands() {
    let mut state = mounted_with(catalog(2));
    let cmd = state.reduce_action(UiAction::FetchImage {
        id: ProductId(2),
        url: "https://fakestoreapi.com/img/2.jpg".to_string(),
    });
    match cmd {
        Some(BackendCommand::FetchProductImage { id, url }) => {
            assert_eq!(id, ProductId(2));
            assert_eq!(url, "https://fakestoreapi.com/img/2.jpg");
        }
        _ => panic!("expected an image fetch"),
    }
    assert_eq!(state.status, "Loaded 2 products");
}
