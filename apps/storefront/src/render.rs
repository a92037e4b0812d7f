//! Plain-text rendering of the catalog page for the terminal.

use shared::domain::CategoryTag;
use storefront_core::{CatalogState, PageButton, PaginationBar, ProductCard};

pub fn filter_bar(active: CategoryTag) -> String {
    CategoryTag::ALL
        .iter()
        .map(|tag| {
            if *tag == active {
                format!("[{}]", tag.label())
            } else {
                tag.label().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("  ")
}

pub fn product_line(card: &ProductCard) -> String {
    let product = card.product();
    let mut line = format!(
        "#{:<4} {:<48} {:>10}  {}",
        product.id.0,
        truncate(&product.title, 48),
        card.price_label(),
        card.stock_label()
    );
    if !card.variants().is_empty() {
        line.push_str(&format!("  ({})", card.variants().join("/")));
    }
    line
}

/// `«` / `»` stand for Previous / Next; a disabled one renders as `·`.
pub fn pagination_line(bar: &PaginationBar) -> String {
    let mut parts = Vec::with_capacity(bar.buttons.len() + 2);
    parts.push(if bar.previous_enabled() { "«" } else { "·" }.to_string());
    for button in &bar.buttons {
        parts.push(match button {
            PageButton::Page { number, active: true } => format!("[{number}]"),
            PageButton::Page { number, .. } => number.to_string(),
            PageButton::Ellipsis => "…".to_string(),
        });
    }
    parts.push(if bar.next_enabled() { "»" } else { "·" }.to_string());
    parts.join(" ")
}

pub fn page(state: &CatalogState, cards: &[ProductCard]) -> String {
    let mut out = String::new();
    out.push_str(&filter_bar(state.active_filter()));
    out.push('\n');
    if cards.is_empty() {
        out.push_str("No products match this filter.\n");
    }
    for card in cards {
        out.push_str(&product_line(card));
        out.push('\n');
    }
    if let Some(bar) = state.pagination_bar() {
        out.push_str(&pagination_line(&bar));
        out.push('\n');
    }
    out
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{kept}…")
}

#[cfg(test)]
mod tests {
    use shared::domain::{Product, ProductId};
    use storefront_core::CatalogStore;

    use super::*;

    fn product(id: i64, category: &str) -> Product {
        Product {
            id: ProductId(id),
            title: format!("Item {id}"),
            price: 20.0,
            image: String::new(),
            category: category.into(),
            in_stock: id % 3 != 0,
            variants: Vec::new(),
        }
    }

    #[test]
    fn marks_active_filter() {
        let bar = filter_bar(CategoryTag::Jewelery);
        assert!(bar.contains("[Jewelery]"));
        assert!(bar.starts_with("All"));
    }

    #[test]
    fn renders_window_with_ellipses_and_disabled_edges() {
        assert_eq!(
            pagination_line(&PaginationBar::new(6, 12)),
            "« 1 … 4 5 [6] 7 8 … 12 »"
        );
        assert_eq!(pagination_line(&PaginationBar::new(1, 3)), "· [1] 2 3 »");
        assert_eq!(pagination_line(&PaginationBar::new(3, 3)), "« 1 2 [3] ·");
    }

    #[test]
    fn single_page_renders_no_pagination_line() {
        let mut store = CatalogStore::default();
        store.set_products((1..=5).map(|id| product(id, "electronics")).collect());
        let cards: Vec<ProductCard> = store
            .state()
            .visible_products()
            .iter()
            .cloned()
            .map(ProductCard::new)
            .collect();
        let text = page(store.state(), &cards);
        assert_eq!(text.lines().count(), 1 + 5);
        assert!(text.contains("Out of Stock"));
    }

    #[test]
    fn long_titles_are_truncated() {
        let mut item = product(1, "jewelery");
        item.title = "x".repeat(80);
        let line = product_line(&ProductCard::new(item));
        assert!(line.contains(&format!("{}…", "x".repeat(47))));
    }
}
