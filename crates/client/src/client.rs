//! HTTP client for the `/api` routes.

use catalog_core::listing::Page;
use catalog_core::types::DbId;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::list_view::ListFilters;
use crate::models::{CategoryWithCount, Product, ProductPayload};

/// Thin typed wrapper over `reqwest` for the catalog endpoints.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: Client,
    base_url: String,
}

impl CatalogClient {
    pub fn new(config: &ClientConfig) -> Self {
        Self::with_client(Client::new(), &config.base_url)
    }

    /// Reuse an existing `reqwest::Client` (connection pool, timeouts, ...).
    pub fn with_client(http: Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{path}", self.base_url)
    }

    /// GET /api/products with the non-empty filter values as query parameters.
    pub async fn list_products(&self, filters: &ListFilters) -> Result<Page<Product>, ClientError> {
        let response = self
            .http
            .get(self.url("/products"))
            .query(&filters.to_params())
            .send()
            .await?;
        decode(response).await
    }

    pub async fn get_product(&self, id: DbId) -> Result<Product, ClientError> {
        let response = self.http.get(self.url(&format!("/products/{id}"))).send().await?;
        decode(response).await
    }

    pub async fn create_product(&self, payload: &ProductPayload) -> Result<Product, ClientError> {
        let response = self
            .http
            .post(self.url("/products"))
            .json(payload)
            .send()
            .await?;
        decode(response).await
    }

    pub async fn update_product(
        &self,
        id: DbId,
        payload: &ProductPayload,
    ) -> Result<Product, ClientError> {
        let response = self
            .http
            .put(self.url(&format!("/products/{id}")))
            .json(payload)
            .send()
            .await?;
        decode(response).await
    }

    pub async fn delete_product(&self, id: DbId) -> Result<(), ClientError> {
        let response = self
            .http
            .delete(self.url(&format!("/products/{id}")))
            .send()
            .await?;
        check(response).await.map(|_| ())
    }

    pub async fn list_categories(&self) -> Result<Vec<CategoryWithCount>, ClientError> {
        let response = self.http.get(self.url("/categories")).send().await?;
        decode(response).await
    }
}

/// Pass success responses through; turn anything else into a [`ClientError`].
async fn check(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    tracing::debug!(status = status.as_u16(), %body, "Catalog API returned an error");
    Err(ClientError::from_response(status.as_u16(), &body))
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    Ok(check(response).await?.json::<T>().await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_are_rooted_under_api() {
        let client = CatalogClient::with_client(Client::new(), "http://localhost:3000/");
        assert_eq!(client.url("/products/7"), "http://localhost:3000/api/products/7");
    }
}
