//! Product entity model and DTOs.

use catalog_core::types::{DbId, Timestamp};
use catalog_core::validation::{normalize_price, FieldErrors, Lenient};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::category::CategorySummary;

/// A product row joined with its category's name.
#[derive(Debug, Clone, FromRow)]
pub struct ProductRow {
    pub id: DbId,
    pub name: String,
    pub price: Decimal,
    pub tags: Vec<String>,
    pub category_id: DbId,
    pub category_name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A product as returned by the API, with its category embedded.
#[derive(Debug, Clone, Serialize)]
pub struct Product {
    pub id: DbId,
    pub name: String,
    /// Serialized as a JSON number.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub tags: Vec<String>,
    pub category_id: DbId,
    pub category: CategorySummary,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            price: row.price,
            tags: row.tags,
            category_id: row.category_id,
            category: CategorySummary {
                id: row.category_id,
                name: row.category_name,
            },
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Request body for creating or replacing a product.
///
/// Every field is optional and type-lenient at the decode stage, so a
/// missing or mistyped value is reported on its own field instead of
/// failing the whole body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductInput {
    pub name: Option<Lenient<String>>,
    pub price: Option<Lenient<Decimal>>,
    pub category_id: Option<Lenient<DbId>>,
    pub tags: Option<Lenient<Vec<String>>>,
}

/// [`ProductInput`] after type checks, before the value rules run.
#[derive(Debug, Validate)]
struct ProductDraft {
    #[validate(
        length(max = 255, message = "The name field must not be greater than 255 characters."),
        custom(function = "catalog_core::validation::validate_not_blank")
    )]
    name: Option<String>,

    #[validate(custom(function = "catalog_core::validation::validate_price"))]
    price: Option<Decimal>,

    category_id: Option<DbId>,

    #[validate(custom(function = "catalog_core::validation::validate_tags"))]
    tags: Option<Vec<String>>,
}

/// A validated product: the complete set of fillable columns.
///
/// Create inserts these; update replaces all of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductFields {
    pub name: String,
    pub price: Decimal,
    pub category_id: DbId,
    pub tags: Vec<String>,
}

impl TryFrom<ProductInput> for ProductFields {
    type Error = FieldErrors;

    fn try_from(input: ProductInput) -> Result<Self, Self::Error> {
        let mut errors = FieldErrors::new();

        let draft = ProductDraft {
            name: Lenient::accept(input.name, "name", "The name field must be a string.", &mut errors),
            price: Lenient::accept(input.price, "price", "The price field must be a number.", &mut errors),
            category_id: Lenient::accept(
                input.category_id,
                "category_id",
                "The category id field must be an integer.",
                &mut errors,
            ),
            tags: Lenient::accept(input.tags, "tags", "The tags field must be an array.", &mut errors),
        };

        if let Err(e) = draft.validate() {
            errors.extend(FieldErrors::from(&e));
        }

        // Required, unless the field was present with the wrong type.
        for (field, absent, message) in [
            ("name", draft.name.is_none(), "The name field is required."),
            ("price", draft.price.is_none(), "The price field is required."),
            ("category_id", draft.category_id.is_none(), "The category id field is required."),
        ] {
            if absent && errors.get(field).is_none() {
                errors.add(field, message);
            }
        }

        match (draft.name, draft.price, draft.category_id) {
            (Some(name), Some(price), Some(category_id)) if errors.is_empty() => Ok(Self {
                name: name.trim().to_string(),
                price: normalize_price(price),
                category_id,
                tags: draft
                    .tags
                    .unwrap_or_default()
                    .into_iter()
                    .map(|t| t.trim().to_string())
                    .collect(),
            }),
            _ => Err(errors),
        }
    }
}
