//! Client-side cart state driven by `ADDITEM` / `DELITEM` / `REMOVEITEM`.

use shared::{
    domain::{Product, ProductId},
    protocol::CartAction,
};
use tracing::debug;

/// Receiver of cart actions. The cart itself is one; tests substitute spies.
pub trait CartDispatcher {
    fn dispatch(&mut self, action: CartAction);
}

#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub product: Product,
    pub qty: u32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn quantity_of(&self, id: ProductId) -> u32 {
        self.position(id).map(|i| self.lines[i].qty).unwrap_or(0)
    }

    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|line| line.qty).sum()
    }

    pub fn total(&self) -> f64 {
        self.lines
            .iter()
            .map(|line| line.product.price * f64::from(line.qty))
            .sum()
    }

    pub fn apply(&mut self, action: &CartAction) {
        let id = action.product().id;
        match (action, self.position(id)) {
            (CartAction::AddItem(_), Some(i)) => self.lines[i].qty += 1,
            (CartAction::AddItem(product), None) => self.lines.push(CartLine {
                product: product.clone(),
                qty: 1,
            }),
            (CartAction::DelItem(_), Some(i)) => {
                if self.lines[i].qty <= 1 {
                    self.lines.remove(i);
                } else {
                    self.lines[i].qty -= 1;
                }
            }
            (CartAction::RemoveItem(_), Some(i)) => {
                self.lines.remove(i);
            }
            (CartAction::DelItem(_) | CartAction::RemoveItem(_), None) => {}
        }
        debug!(
            action = action.kind(),
            product_id = id.0,
            items = self.item_count(),
            "cart updated"
        );
    }

    fn position(&self, id: ProductId) -> Option<usize> {
        self.lines.iter().position(|line| line.product.id == id)
    }
}

impl CartDispatcher for Cart {
    fn dispatch(&mut self, action: CartAction) {
        self.apply(&action);
    }
}

#[cfg(test)]
#[path = "tests/cart_tests.rs"]
mod tests;
