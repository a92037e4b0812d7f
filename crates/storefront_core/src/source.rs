use std::{collections::HashSet, time::Duration};

use async_trait::async_trait;
use reqwest::Client;
use shared::{domain::Product, protocol::CatalogRecord};
use tracing::{debug, warn};

use crate::{config::Settings, error::CatalogError, stock::StockPolicy};

/// Where the catalog comes from. One call returns the whole catalog.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch_records(&self) -> Result<Vec<CatalogRecord>, CatalogError>;
}

pub struct HttpCatalogSource {
    http: Client,
    endpoint: String,
}

impl HttpCatalogSource {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn with_timeout(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, CatalogError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, CatalogError> {
        Self::with_timeout(settings.catalog_url.clone(), settings.request_timeout())
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogSource {
    async fn fetch_records(&self) -> Result<Vec<CatalogRecord>, CatalogError> {
        let res = self.http.get(&self.endpoint).send().await?;
        let status = res.status();
        if !status.is_success() {
            return Err(CatalogError::Status {
                status: status.as_u16(),
            });
        }
        let body = res.bytes().await?;
        let records: Vec<CatalogRecord> = serde_json::from_slice(&body)?;
        debug!(endpoint = %self.endpoint, records = records.len(), "catalog records received");
        Ok(records)
    }
}

/// Converts wire records into products, keeping source order. Records with
/// an invalid price or a repeated id are dropped.
pub fn products_from_records(records: Vec<CatalogRecord>, policy: &dyn StockPolicy) -> Vec<Product> {
    let mut seen = HashSet::with_capacity(records.len());
    let mut products = Vec::with_capacity(records.len());

    for record in records {
        let id = record.product_id();
        if !record.price.is_finite() || record.price < 0.0 {
            warn!(product_id = id.0, price = record.price, "dropping record with invalid price");
            continue;
        }
        if !seen.insert(id) {
            warn!(product_id = id.0, "dropping record with duplicate id");
            continue;
        }

        let in_stock = policy.in_stock(&record);
        let variants = record.variants();
        products.push(Product {
            id,
            title: record.title,
            price: record.price,
            image: record.image,
            category: record.category,
            in_stock,
            variants,
        });
    }

    products
}

#[cfg(test)]
#[path = "tests/source_tests.rs"]
mod tests;
