//! HTTP-level integration tests for the `/api/categories` endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, create_category, create_product, delete, get, post_json};
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_includes_product_counts(pool: PgPool) {
    let tech = create_category(&pool, "Tech").await;
    create_category(&pool, "Empty").await;
    create_product(&pool, tech, "Phone", 100.0).await;
    create_product(&pool, tech, "Tablet", 200.0).await;

    let response = get(build_test_app(pool), "/api/categories").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(
        json,
        serde_json::json!([
            { "id": tech, "name": "Tech", "products_count": 2 },
            { "id": tech + 1, "name": "Empty", "products_count": 0 },
        ])
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_returns_201(pool: PgPool) {
    let response = post_json(
        build_test_app(pool),
        "/api/categories",
        serde_json::json!({ "name": "  Garden  " }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["name"], "Garden");
    assert!(json["id"].is_number());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_blank_name_returns_422(pool: PgPool) {
    let response = post_json(
        build_test_app(pool),
        "/api/categories",
        serde_json::json!({ "name": "   " }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body_json(response).await["errors"]["name"].is_array());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_name_returns_409(pool: PgPool) {
    create_category(&pool, "Tech").await;

    let response = post_json(
        build_test_app(pool),
        "/api/categories",
        serde_json::json!({ "name": "Tech" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "CONFLICT");
    assert_eq!(json["error"], "A category named 'Tech' already exists");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_cascades_to_products(pool: PgPool) {
    let tech = create_category(&pool, "Tech").await;
    let home = create_category(&pool, "Home").await;
    let phone = create_product(&pool, tech, "Phone", 100.0).await["id"]
        .as_i64()
        .unwrap();
    create_product(&pool, home, "Chair", 50.0).await;

    let response = delete(build_test_app(pool.clone()), &format!("/api/categories/{tech}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(build_test_app(pool.clone()), &format!("/api/products/{phone}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let list = body_json(get(build_test_app(pool), "/api/products").await).await;
    assert_eq!(list["total"], 1);
    assert_eq!(list["data"][0]["name"], "Chair");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_missing_category_returns_404(pool: PgPool) {
    let response = delete(build_test_app(pool), "/api/categories/999999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
