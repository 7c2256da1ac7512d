//! Category entity model and DTOs.

use catalog_core::types::{DbId, Timestamp};
use catalog_core::validation::FieldErrors;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A category row from the `categories` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Category {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A category with the number of products currently referencing it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CategoryWithCount {
    pub id: DbId,
    pub name: String,
    pub products_count: i64,
}

/// The minimal category fields embedded in product responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySummary {
    pub id: DbId,
    pub name: String,
}

/// Request body for creating a category.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CategoryInput {
    #[validate(
        required(message = "The name field is required."),
        length(max = 255, message = "The name field must not be greater than 255 characters."),
        custom(function = "catalog_core::validation::validate_not_blank")
    )]
    pub name: Option<String>,
}

/// A validated category ready to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    pub name: String,
}

impl TryFrom<CategoryInput> for NewCategory {
    type Error = FieldErrors;

    fn try_from(input: CategoryInput) -> Result<Self, Self::Error> {
        input.validate().map_err(|e| FieldErrors::from(&e))?;
        match input.name {
            Some(name) => Ok(Self {
                name: name.trim().to_string(),
            }),
            None => Err(FieldErrors::single("name", "The name field is required.")),
        }
    }
}
