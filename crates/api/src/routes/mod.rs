pub mod category;
pub mod health;
pub mod product;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /products                list (filtered, sorted, paged), create
/// /products/{id}           get, update, delete
///
/// /categories              list with product counts, create
/// /categories/{id}         delete (cascades to products)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/products", product::router())
        .nest("/categories", category::router())
}
