//! Repository for the `products` table.
//!
//! Every read joins `categories` so rows carry their category's name.

use catalog_core::listing::{ListingQuery, Page, Predicate};
use catalog_core::search::TEXT_SEARCH_CONFIG;
use catalog_core::types::DbId;
use sqlx::PgPool;

use crate::models::product::{Product, ProductFields, ProductRow};

/// Columns selected from `products p JOIN categories c`.
const JOINED_COLUMNS: &str = "\
    p.id, p.name, p.price, p.tags, p.category_id, c.name AS category_name, \
    p.created_at, p.updated_at";

/// Provides CRUD and listing operations for products.
pub struct ProductRepo;

impl ProductRepo {
    /// Insert a new product, returning it with its category.
    pub async fn create(pool: &PgPool, input: &ProductFields) -> Result<Product, sqlx::Error> {
        let query = format!(
            "WITH p AS ( \
                 INSERT INTO products (name, price, tags, category_id) \
                 VALUES ($1, $2, $3, $4) \
                 RETURNING * \
             ) \
             SELECT {JOINED_COLUMNS} FROM p JOIN categories c ON c.id = p.category_id"
        );
        let row = sqlx::query_as::<_, ProductRow>(&query)
            .bind(&input.name)
            .bind(input.price)
            .bind(&input.tags)
            .bind(input.category_id)
            .fetch_one(pool)
            .await?;
        Ok(row.into())
    }

    /// Find a product by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Product>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} \
             FROM products p JOIN categories c ON c.id = p.category_id \
             WHERE p.id = $1"
        );
        let row = sqlx::query_as::<_, ProductRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(Product::from))
    }

    /// Replace every fillable column of a product.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &ProductFields,
    ) -> Result<Option<Product>, sqlx::Error> {
        let query = format!(
            "WITH p AS ( \
                 UPDATE products SET name = $2, price = $3, tags = $4, category_id = $5 \
                 WHERE id = $1 \
                 RETURNING * \
             ) \
             SELECT {JOINED_COLUMNS} FROM p JOIN categories c ON c.id = p.category_id"
        );
        let row = sqlx::query_as::<_, ProductRow>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.price)
            .bind(&input.tags)
            .bind(input.category_id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(Product::from))
    }

    /// Delete a product by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Fetch one page of products matching every predicate in `query`.
    ///
    /// The page rows and the total count share one WHERE clause, so `total`
    /// always reflects the filters.
    pub async fn list(pool: &PgPool, query: &ListingQuery) -> Result<Page<Product>, sqlx::Error> {
        let predicates = query.filter.predicates();
        let sql = ListingSql::build(query, &predicates);

        let mut rows_q = sqlx::query_as::<_, ProductRow>(&sql.rows);
        let mut count_q = sqlx::query_scalar::<_, i64>(&sql.count);

        for predicate in &predicates {
            match predicate {
                Predicate::TextMatches(tsquery) => {
                    rows_q = rows_q.bind(tsquery);
                    count_q = count_q.bind(tsquery);
                }
                Predicate::CategoryIs(id) => {
                    rows_q = rows_q.bind(*id);
                    count_q = count_q.bind(*id);
                }
                Predicate::PriceAtLeast(price) | Predicate::PriceAtMost(price) => {
                    rows_q = rows_q.bind(*price);
                    count_q = count_q.bind(*price);
                }
            }
        }
        rows_q = rows_q.bind(query.limit()).bind(query.offset());

        let total = count_q.fetch_one(pool).await?;
        let rows = rows_q.fetch_all(pool).await?;
        tracing::debug!(
            total,
            page = query.page,
            returned = rows.len(),
            "Listed products"
        );

        Ok(Page::new(
            rows.into_iter().map(Product::from).collect(),
            query.page,
            total,
        ))
    }
}

/// SQL text for one listing request. Placeholders `$1..$n` follow the
/// predicate order; the row query adds `LIMIT $n+1 OFFSET $n+2`.
#[derive(Debug)]
struct ListingSql {
    rows: String,
    count: String,
}

impl ListingSql {
    fn build(query: &ListingQuery, predicates: &[Predicate]) -> Self {
        let mut conditions: Vec<String> = Vec::with_capacity(predicates.len());
        let mut order_terms: Vec<String> = Vec::new();

        for (i, predicate) in predicates.iter().enumerate() {
            let idx = i + 1;
            let condition = match predicate {
                Predicate::TextMatches(_) => {
                    order_terms.push(format!(
                        "ts_rank(p.search_vector, to_tsquery('{TEXT_SEARCH_CONFIG}', ${idx})) DESC"
                    ));
                    format!("p.search_vector @@ to_tsquery('{TEXT_SEARCH_CONFIG}', ${idx})")
                }
                Predicate::CategoryIs(_) => format!("p.category_id = ${idx}"),
                Predicate::PriceAtLeast(_) => format!("p.price >= ${idx}"),
                Predicate::PriceAtMost(_) => format!("p.price <= ${idx}"),
            };
            conditions.push(condition);
        }

        if let Some(sort) = query.sort {
            order_terms.push(format!(
                "{} {}",
                sort.field.column(),
                sort.direction.as_sql()
            ));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", conditions.join(" AND "))
        };
        let order_clause = if order_terms.is_empty() {
            String::new()
        } else {
            format!(" ORDER BY {}", order_terms.join(", "))
        };

        let limit_idx = predicates.len() + 1;
        let offset_idx = limit_idx + 1;
        let from = "FROM products p JOIN categories c ON c.id = p.category_id";

        Self {
            rows: format!(
                "SELECT {JOINED_COLUMNS} {from}{where_clause}{order_clause} \
                 LIMIT ${limit_idx} OFFSET ${offset_idx}"
            ),
            count: format!("SELECT COUNT(*) {from}{where_clause}"),
        }
    }
}
