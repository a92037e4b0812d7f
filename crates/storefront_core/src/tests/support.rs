use shared::domain::{Product, ProductId};

pub fn product(id: i64, category: &str) -> Product {
    Product {
        id: ProductId(id),
        title: format!("Product {id}"),
        price: 10.0 + id as f64,
        image: format!("https://fakestoreapi.com/img/{id}.jpg"),
        category: category.to_string(),
        in_stock: id % 3 != 0,
        variants: Vec::new(),
    }
}

/// `total` products cycling through `categories` in order.
pub fn catalog(total: usize, categories: &[&str]) -> Vec<Product> {
    (0..total)
        .map(|i| product(i as i64 + 1, categories[i % categories.len()]))
        .collect()
}

/// `total` products of which exactly `electronics` are electronics, spread
/// through the list.
pub fn catalog_with_electronics(total: usize, electronics: usize) -> Vec<Product> {
    let stride = total / electronics.max(1);
    (0..total)
        .map(|i| {
            let category = if electronics > 0 && i % stride == 0 && i / stride < electronics {
                "electronics"
            } else if i % 2 == 0 {
                "jewelery"
            } else {
                "men's clothing"
            };
            product(i as i64 + 1, category)
        })
        .collect()
}
