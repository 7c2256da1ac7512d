//! List-view controller for the product table.
//!
//! Holds the current filters and the last page shown. Filter edits are
//! debounced: every edit bumps a generation counter and schedules a timer,
//! and only the timer whose generation is still current issues a request.
//! Every request carries a sequence number; a response is applied only if
//! no newer request was issued while it was in flight.
//!
//! Rendering code observes [`ListState`] through [`ListView::subscribe`].

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use catalog_core::listing::{ListingParams, Page, SortDirection, SortField};
use catalog_core::types::DbId;
use rust_decimal::Decimal;
use tokio::sync::watch;

use crate::client::CatalogClient;
use crate::error::ClientError;
use crate::models::{CategoryWithCount, Product, ProductPayload};

// ---------------------------------------------------------------------------
// Filters
// ---------------------------------------------------------------------------

/// Filter, sort and page selection of the product table.
#[derive(Debug, Clone, PartialEq)]
pub struct ListFilters {
    pub search: String,
    pub category_id: Option<DbId>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub sort_by: SortField,
    pub sort_dir: SortDirection,
    pub page: i64,
}

impl Default for ListFilters {
    fn default() -> Self {
        Self {
            search: String::new(),
            category_id: None,
            min_price: None,
            max_price: None,
            sort_by: SortField::DEFAULT,
            sort_dir: SortDirection::DEFAULT,
            page: 1,
        }
    }
}

impl ListFilters {
    /// Query parameters for `GET /api/products`. Empty values are left out.
    pub fn to_params(&self) -> ListingParams {
        let search = self.search.trim();
        ListingParams {
            search: (!search.is_empty()).then(|| search.to_string()),
            category_id: self.category_id.map(|id| id.to_string()),
            min_price: self.min_price.map(|p| p.to_string()),
            max_price: self.max_price.map(|p| p.to_string()),
            sort_by: Some(self.sort_by.as_str().to_string()),
            sort_dir: Some(self.sort_dir.as_str().to_string()),
            page: Some(self.page.to_string()),
        }
    }

    /// Both bounds set with `min_price > max_price`; nothing can match.
    pub fn has_inverted_price_range(&self) -> bool {
        matches!((self.min_price, self.max_price), (Some(min), Some(max)) if min > max)
    }
}

// ---------------------------------------------------------------------------
// Data source
// ---------------------------------------------------------------------------

/// Backend operations the list view depends on.
#[async_trait]
pub trait ProductSource: Send + Sync {
    async fn list_products(&self, filters: &ListFilters) -> Result<Page<Product>, ClientError>;

    async fn list_categories(&self) -> Result<Vec<CategoryWithCount>, ClientError>;

    async fn create_product(&self, payload: &ProductPayload) -> Result<Product, ClientError>;

    async fn update_product(
        &self,
        id: DbId,
        payload: &ProductPayload,
    ) -> Result<Product, ClientError>;

    async fn delete_product(&self, id: DbId) -> Result<(), ClientError>;
}

#[async_trait]
impl ProductSource for CatalogClient {
    async fn list_products(&self, filters: &ListFilters) -> Result<Page<Product>, ClientError> {
        CatalogClient::list_products(self, filters).await
    }

    async fn list_categories(&self) -> Result<Vec<CategoryWithCount>, ClientError> {
        CatalogClient::list_categories(self).await
    }

    async fn create_product(&self, payload: &ProductPayload) -> Result<Product, ClientError> {
        CatalogClient::create_product(self, payload).await
    }

    async fn update_product(
        &self,
        id: DbId,
        payload: &ProductPayload,
    ) -> Result<Product, ClientError> {
        CatalogClient::update_product(self, id, payload).await
    }

    async fn delete_product(&self, id: DbId) -> Result<(), ClientError> {
        CatalogClient::delete_product(self, id).await
    }
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// Snapshot of everything the table renders.
#[derive(Debug, Clone, Default)]
pub struct ListState {
    pub filters: ListFilters,
    /// Last applied page; `None` until the first response arrives.
    pub page: Option<Page<Product>>,
    pub categories: Vec<CategoryWithCount>,
    /// A request is in flight.
    pub loading: bool,
    /// Message of the last failed list request, cleared on success.
    pub error: Option<String>,
    /// `min_price > max_price`; list requests are withheld until fixed.
    pub invalid_price_range: bool,
    /// Sequence number of the response currently in `page`.
    pub shown_seq: u64,
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

struct Inner<S> {
    source: S,
    debounce: Duration,
    state: watch::Sender<ListState>,
    /// Bumped on every filter edit.
    generation: AtomicU64,
    /// Sequence number of the most recently issued list request.
    issued: AtomicU64,
}

/// Drives the product table. Cheap to clone; clones share state.
pub struct ListView<S> {
    inner: Arc<Inner<S>>,
}

impl<S> Clone for ListView<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: ProductSource + 'static> ListView<S> {
    pub fn new(source: S, debounce: Duration) -> Self {
        let (state, _) = watch::channel(ListState::default());
        Self {
            inner: Arc::new(Inner {
                source,
                debounce,
                state,
                generation: AtomicU64::new(0),
                issued: AtomicU64::new(0),
            }),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<ListState> {
        self.inner.state.subscribe()
    }

    pub fn state(&self) -> ListState {
        self.inner.state.borrow().clone()
    }

    pub fn filters(&self) -> ListFilters {
        self.inner.state.borrow().filters.clone()
    }

    pub fn set_search(&self, search: impl Into<String>) {
        let search = search.into();
        self.edit(|f| f.search = search);
    }

    pub fn set_category(&self, category_id: Option<DbId>) {
        self.edit(|f| f.category_id = category_id);
    }

    pub fn set_min_price(&self, min_price: Option<Decimal>) {
        self.edit(|f| f.min_price = min_price);
    }

    pub fn set_max_price(&self, max_price: Option<Decimal>) {
        self.edit(|f| f.max_price = max_price);
    }

    pub fn set_sort(&self, sort_by: SortField, sort_dir: SortDirection) {
        self.edit(|f| {
            f.sort_by = sort_by;
            f.sort_dir = sort_dir;
        });
    }

    /// Clear every filter back to its default.
    pub fn reset_filters(&self) {
        self.edit(|f| *f = ListFilters::default());
    }

    /// Jump to `page` and load it right away (no debounce).
    pub async fn set_page(&self, page: i64) {
        self.inner
            .state
            .send_modify(|s| s.filters.page = page.max(1));
        self.inner.fetch().await;
    }

    /// Reload the current page immediately.
    pub async fn refresh(&self) {
        self.inner.fetch().await;
    }

    /// Populate the category dropdown.
    pub async fn load_categories(&self) -> Result<(), ClientError> {
        let categories = self.inner.source.list_categories().await?;
        self.inner.state.send_modify(|s| s.categories = categories);
        Ok(())
    }

    pub async fn create(&self, payload: &ProductPayload) -> Result<Product, ClientError> {
        let product = self.inner.source.create_product(payload).await?;
        self.refresh().await;
        Ok(product)
    }

    pub async fn update(&self, id: DbId, payload: &ProductPayload) -> Result<Product, ClientError> {
        let product = self.inner.source.update_product(id, payload).await?;
        self.refresh().await;
        Ok(product)
    }

    pub async fn delete(&self, id: DbId) -> Result<(), ClientError> {
        self.inner.source.delete_product(id).await?;
        self.refresh().await;
        Ok(())
    }

    /// Apply a filter edit, return to page 1 and schedule a debounced reload.
    fn edit(&self, change: impl FnOnce(&mut ListFilters)) {
        self.inner.state.send_modify(|s| {
            change(&mut s.filters);
            s.filters.page = 1;
        });

        let generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            tokio::time::sleep(inner.debounce).await;
            if inner.generation.load(Ordering::SeqCst) != generation {
                return;
            }
            inner.fetch().await;
        });
    }
}

impl<S: ProductSource> Inner<S> {
    async fn fetch(&self) {
        let filters = self.state.borrow().filters.clone();

        if filters.has_inverted_price_range() {
            tracing::debug!(
                min_price = ?filters.min_price,
                max_price = ?filters.max_price,
                "Withholding list request for inverted price range"
            );
            // Supersedes any request still in flight for the previous filters.
            self.issued.fetch_add(1, Ordering::SeqCst);
            self.state.send_modify(|s| {
                s.invalid_price_range = true;
                s.loading = false;
            });
            return;
        }

        let seq = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.send_modify(|s| {
            s.loading = true;
            s.invalid_price_range = false;
        });

        let result = self.source.list_products(&filters).await;

        if self.issued.load(Ordering::SeqCst) != seq {
            tracing::debug!(seq, "Discarding stale list response");
            return;
        }

        self.state.send_modify(|s| {
            s.loading = false;
            match result {
                Ok(page) => {
                    s.page = Some(page);
                    s.error = None;
                    s.shown_seq = seq;
                }
                Err(err) => {
                    tracing::warn!(error = %err, "Product list request failed");
                    s.error = Some(err.to_string());
                }
            }
        });
    }
}
