//! Handlers for the `/categories` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use catalog_core::error::CoreError;
use catalog_core::types::DbId;
use catalog_db::models::category::{Category, CategoryInput, CategoryWithCount, NewCategory};
use catalog_db::repositories::CategoryRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::state::AppState;

/// GET /api/categories
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<CategoryWithCount>>> {
    let categories = CategoryRepo::list_with_counts(&state.pool).await?;
    Ok(Json(categories))
}

/// POST /api/categories
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CategoryInput>,
) -> AppResult<(StatusCode, Json<Category>)> {
    let input = NewCategory::try_from(input)?;
    let category = CategoryRepo::create(&state.pool, &input)
        .await
        .map_err(|err| {
            let duplicate = matches!(
                &err,
                sqlx::Error::Database(db_err) if db_err.constraint() == Some("uq_categories_name")
            );
            if duplicate {
                AppError::Core(CoreError::Conflict(format!(
                    "A category named '{}' already exists",
                    input.name
                )))
            } else {
                AppError::Database(err)
            }
        })?;
    tracing::info!(category_id = category.id, "Category created");
    Ok((StatusCode::CREATED, Json(category)))
}

/// DELETE /api/categories/{id}
///
/// Products in the category go with it (`ON DELETE CASCADE`).
pub async fn delete(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    if CategoryRepo::delete(&state.pool, id).await? {
        tracing::info!(category_id = id, "Category deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id,
        }))
    }
}
