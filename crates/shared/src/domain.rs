use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub i64);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Category filter offered by the storefront. `All` disables filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CategoryTag {
    #[default]
    #[serde(rename = "all")]
    All,
    #[serde(rename = "men's clothing")]
    MensClothing,
    #[serde(rename = "women's clothing")]
    WomensClothing,
    #[serde(rename = "jewelery")]
    Jewelery,
    #[serde(rename = "electronics")]
    Electronics,
}

impl CategoryTag {
    /// Filter bar order.
    pub const ALL: [CategoryTag; 5] = [
        CategoryTag::All,
        CategoryTag::MensClothing,
        CategoryTag::WomensClothing,
        CategoryTag::Jewelery,
        CategoryTag::Electronics,
    ];

    /// Category string as it appears in catalog records.
    pub fn as_str(self) -> &'static str {
        match self {
            CategoryTag::All => "all",
            CategoryTag::MensClothing => "men's clothing",
            CategoryTag::WomensClothing => "women's clothing",
            CategoryTag::Jewelery => "jewelery",
            CategoryTag::Electronics => "electronics",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CategoryTag::All => "All",
            CategoryTag::MensClothing => "Men's Clothing",
            CategoryTag::WomensClothing => "Women's Clothing",
            CategoryTag::Jewelery => "Jewelery",
            CategoryTag::Electronics => "Electronics",
        }
    }

    /// Exact match against the record strings; callers decide what an
    /// unknown tag degrades to.
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tag| tag.as_str() == raw)
    }

    pub fn matches(self, category: &str) -> bool {
        self == CategoryTag::All || self.as_str() == category
    }
}

impl fmt::Display for CategoryTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A catalog entry after conversion from its wire record. Identity is `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: f64,
    pub image: String,
    pub category: String,
    #[serde(rename = "inStock")]
    pub in_stock: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variants: Vec<String>,
}
