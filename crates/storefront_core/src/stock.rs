use shared::protocol::CatalogRecord;

/// Decides whether a catalog record can be added to the cart.
pub trait StockPolicy: Send + Sync {
    fn in_stock(&self, record: &CatalogRecord) -> bool;
}

/// An explicit `stock` quantity wins. Without one, the demo catalog marks a
/// record available when it has ratings and its id is not a multiple of 3.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulatedStock;

impl StockPolicy for SimulatedStock {
    fn in_stock(&self, record: &CatalogRecord) -> bool {
        match record.stock {
            Some(quantity) => quantity > 0,
            None => record.rating_count() > 0 && record.id % 3 != 0,
        }
    }
}

/// Only trusts the `stock` field; records without one are unavailable.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuantityStock;

impl StockPolicy for QuantityStock {
    fn in_stock(&self, record: &CatalogRecord) -> bool {
        record.stock.is_some_and(|quantity| quantity > 0)
    }
}

#[cfg(test)]
mod tests {
    use shared::protocol::RatingRecord;

    use super::*;

    fn record(id: i64, count: Option<i64>, stock: Option<i64>) -> CatalogRecord {
        CatalogRecord {
            id,
            title: format!("item {id}"),
            price: 1.0,
            category: "electronics".into(),
            image: String::new(),
            description: None,
            rating: count.map(|count| RatingRecord { rate: 4.0, count }),
            stock,
            size: None,
            color: None,
        }
    }

    #[test]
    fn simulated_stock_skips_every_third_id() {
        let policy = SimulatedStock;
        assert!(policy.in_stock(&record(1, Some(120), None)));
        assert!(!policy.in_stock(&record(3, Some(120), None)));
        assert!(!policy.in_stock(&record(4, Some(0), None)));
        assert!(!policy.in_stock(&record(5, None, None)));
    }

    #[test]
    fn explicit_quantity_overrides_simulation() {
        let policy = SimulatedStock;
        assert!(policy.in_stock(&record(3, Some(120), Some(2))));
        assert!(!policy.in_stock(&record(1, Some(120), Some(0))));
    }

    #[test]
    fn quantity_policy_ignores_ratings() {
        let policy = QuantityStock;
        assert!(!policy.in_stock(&record(1, Some(120), None)));
        assert!(policy.in_stock(&record(3, None, Some(1))));
    }
}
