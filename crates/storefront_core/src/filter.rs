//! Category filtering over the fetched catalog.

use shared::domain::{CategoryTag, Product};

/// Subsequence of `products` whose category matches `tag`, in source order.
/// `CategoryTag::All` returns the input as is.
pub fn filter_products(products: &[Product], tag: CategoryTag) -> Vec<Product> {
    if tag == CategoryTag::All {
        return products.to_vec();
    }
    products
        .iter()
        .filter(|product| tag.matches(&product.category))
        .cloned()
        .collect()
}

/// Unknown tags degrade to `All`.
pub fn parse_filter_tag(raw: &str) -> CategoryTag {
    match CategoryTag::parse(raw.trim()) {
        Some(tag) => tag,
        None => {
            tracing::warn!(tag = raw, "unrecognized category filter; showing all products");
            CategoryTag::All
        }
    }
}

#[cfg(test)]
#[path = "tests/filter_tests.rs"]
mod tests;
