use super::*;
use crate::test_support::product;

#[test]
fn add_appends_then_increments() {
    let mut cart = Cart::new();
    let jacket = product(3, "men's clothing");
    let ring = product(5, "jewelery");

    cart.dispatch(CartAction::AddItem(jacket.clone()));
    cart.dispatch(CartAction::AddItem(ring.clone()));
    cart.dispatch(CartAction::AddItem(jacket.clone()));

    assert_eq!(
        cart.lines()
            .iter()
            .map(|line| (line.product.id, line.qty))
            .collect::<Vec<_>>(),
        vec![(jacket.id, 2), (ring.id, 1)]
    );
    assert_eq!(cart.item_count(), 3);
    assert!((cart.total() - (2.0 * jacket.price + ring.price)).abs() < 1e-9);
}

#[test]
fn del_decrements_and_drops_last_unit() {
    let mut cart = Cart::new();
    let ring = product(5, "jewelery");
    cart.dispatch(CartAction::AddItem(ring.clone()));
    cart.dispatch(CartAction::AddItem(ring.clone()));

    cart.dispatch(CartAction::DelItem(ring.clone()));
    assert_eq!(cart.quantity_of(ring.id), 1);

    cart.dispatch(CartAction::DelItem(ring.clone()));
    assert_eq!(cart.quantity_of(ring.id), 0);
    assert!(cart.is_empty());
}

#[test]
fn remove_drops_line_regardless_of_quantity() {
    let mut cart = Cart::new();
    let drive = product(9, "electronics");
    for _ in 0..4 {
        cart.dispatch(CartAction::AddItem(drive.clone()));
    }
    cart.dispatch(CartAction::RemoveItem(drive.clone()));
    assert!(cart.is_empty());
}

#[test]
fn unknown_products_are_ignored_by_del_and_remove() {
    let mut cart = Cart::new();
    cart.dispatch(CartAction::AddItem(product(1, "jewelery")));
    let before = cart.clone();

    cart.dispatch(CartAction::DelItem(product(2, "jewelery")));
    cart.dispatch(CartAction::RemoveItem(product(2, "jewelery")));
    assert_eq!(cart, before);
}
