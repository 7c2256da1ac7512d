//! Handlers for the `/products` resource.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use catalog_core::error::CoreError;
use catalog_core::listing::{ListingParams, ListingQuery, Page};
use catalog_core::types::DbId;
use catalog_core::validation::FieldErrors;
use catalog_db::models::product::{Product, ProductFields, ProductInput};
use catalog_db::repositories::{CategoryRepo, ProductRepo};
use catalog_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Product",
        id,
    })
}

/// Validate the body, then confirm the referenced category exists.
async fn validated_fields(pool: &DbPool, input: ProductInput) -> AppResult<ProductFields> {
    let fields = ProductFields::try_from(input)?;
    if !CategoryRepo::exists(pool, fields.category_id).await? {
        let errors = FieldErrors::single("category_id", "The selected category id is invalid.");
        return Err(errors.into());
    }
    Ok(fields)
}

/// GET /api/products
///
/// Never fails on bad filter values: anything unparseable is dropped.
/// The query string is taken as raw pairs so a repeated key cannot reject
/// the request.
pub async fn list(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> AppResult<Json<Page<Product>>> {
    let query = ListingQuery::from_params(&ListingParams::from_pairs(pairs));
    if !query.ignored.is_empty() {
        tracing::debug!(ignored = ?query.ignored, "Ignoring malformed listing parameters");
    }
    let page = ProductRepo::list(&state.pool, &query).await?;
    Ok(Json(page))
}

/// POST /api/products
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<ProductInput>,
) -> AppResult<(StatusCode, Json<Product>)> {
    let fields = validated_fields(&state.pool, input).await?;
    let product = ProductRepo::create(&state.pool, &fields).await?;
    tracing::info!(product_id = product.id, "Product created");
    Ok((StatusCode::CREATED, Json(product)))
}

/// GET /api/products/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<Product>> {
    let product = ProductRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(product))
}

/// PUT /api/products/{id}
pub async fn update(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<ProductInput>,
) -> AppResult<Json<Product>> {
    let fields = validated_fields(&state.pool, input).await?;
    let product = ProductRepo::update(&state.pool, id, &fields)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(product_id = id, "Product updated");
    Ok(Json(product))
}

/// DELETE /api/products/{id}
pub async fn delete(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    if ProductRepo::delete(&state.pool, id).await? {
        tracing::info!(product_id = id, "Product deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
