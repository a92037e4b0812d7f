use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{Product, ProductId};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RatingRecord {
    #[serde(default)]
    pub rate: f64,
    #[serde(default)]
    pub count: i64,
}

/// One element of the catalog endpoint's JSON array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogRecord {
    pub id: i64,
    pub title: String,
    pub price: f64,
    pub category: String,
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<RatingRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Value>,
}

impl CatalogRecord {
    pub fn product_id(&self) -> ProductId {
        ProductId(self.id)
    }

    pub fn rating_count(&self) -> i64 {
        self.rating.as_ref().map(|r| r.count).unwrap_or(0)
    }

    /// Variants come from the first truthy of `size` / `color`; anything but
    /// an array yields no variants.
    pub fn variants(&self) -> Vec<String> {
        let picked = [&self.size, &self.color]
            .into_iter()
            .flatten()
            .find(|value| is_truthy(value));
        match picked {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_owned))
                .collect(),
            _ => Vec::new(),
        }
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Actions understood by the cart reducer, serialized as
/// `{"type": "ADDITEM", "payload": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum CartAction {
    #[serde(rename = "ADDITEM")]
    AddItem(Product),
    #[serde(rename = "DELITEM")]
    DelItem(Product),
    #[serde(rename = "REMOVEITEM")]
    RemoveItem(Product),
}

impl CartAction {
    pub fn kind(&self) -> &'static str {
        match self {
            CartAction::AddItem(_) => "ADDITEM",
            CartAction::DelItem(_) => "DELITEM",
            CartAction::RemoveItem(_) => "REMOVEITEM",
        }
    }

    pub fn product(&self) -> &Product {
        match self {
            CartAction::AddItem(p) | CartAction::DelItem(p) | CartAction::RemoveItem(p) => p,
        }
    }
}
