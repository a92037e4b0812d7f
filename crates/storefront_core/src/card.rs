use shared::{domain::Product, protocol::CartAction};

use crate::cart::CartDispatcher;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddToCartOutcome {
    Added,
    Unavailable,
}

/// Functional state behind one product card.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductCard {
    product: Product,
    selected_variant: Option<String>,
    disabled: bool,
}

impl ProductCard {
    pub fn new(product: Product) -> Self {
        let selected_variant = product.variants.first().cloned();
        Self {
            product,
            selected_variant,
            disabled: false,
        }
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn product(&self) -> &Product {
        &self.product
    }

    pub fn in_stock(&self) -> bool {
        self.product.in_stock
    }

    pub fn variants(&self) -> &[String] {
        &self.product.variants
    }

    pub fn selected_variant(&self) -> Option<&str> {
        self.selected_variant.as_deref()
    }

    pub fn can_add_to_cart(&self) -> bool {
        self.product.in_stock && !self.disabled
    }

    pub fn stock_label(&self) -> &'static str {
        if self.product.in_stock {
            "In Stock"
        } else {
            "Out of Stock"
        }
    }

    pub fn price_label(&self) -> String {
        format!("${}", self.product.price)
    }

    /// Variant selection is locked while the card cannot add to cart, and
    /// values outside the variant list are ignored.
    pub fn select_variant(&mut self, variant: &str) -> bool {
        if !self.can_add_to_cart() || !self.product.variants.iter().any(|v| v == variant) {
            return false;
        }
        self.selected_variant = Some(variant.to_string());
        true
    }

    /// Dispatches `ADDITEM` only when the product can be added.
    pub fn add_to_cart(&self, cart: &mut dyn CartDispatcher) -> AddToCartOutcome {
        if !self.can_add_to_cart() {
            tracing::debug!(product_id = self.product.id.0, "add to cart refused");
            return AddToCartOutcome::Unavailable;
        }
        cart.dispatch(CartAction::AddItem(self.product.clone()));
        AddToCartOutcome::Added
    }
}

pub fn cards_for(products: &[Product]) -> Vec<ProductCard> {
    products.iter().cloned().map(ProductCard::new).collect()
}
