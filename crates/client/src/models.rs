//! Wire types exchanged with the catalog API.

use catalog_core::types::{DbId, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Minimal category embedded in every product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub id: DbId,
    pub name: String,
}

/// Category row as returned by `GET /api/categories`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryWithCount {
    pub id: DbId,
    pub name: String,
    pub products_count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: DbId,
    pub name: String,
    pub price: Decimal,
    #[serde(default)]
    pub tags: Vec<String>,
    pub category_id: DbId,
    pub category: CategorySummary,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Body for `POST /api/products` and `PUT /api/products/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductPayload {
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub category_id: DbId,
    pub tags: Vec<String>,
}

impl From<&Product> for ProductPayload {
    /// Pre-fill an edit form from an existing record.
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            price: product.price,
            category_id: product.category_id,
            tags: product.tags.clone(),
        }
    }
}
