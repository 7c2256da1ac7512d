//! Typed client for the catalog API plus the list-view controller that
//! drives a product table: filter state, debounced reloads and
//! stale-response discard.

pub mod client;
pub mod config;
pub mod error;
pub mod list_view;
pub mod models;

pub use client::CatalogClient;
pub use config::ClientConfig;
pub use error::ClientError;
pub use list_view::{ListFilters, ListState, ListView, ProductSource};
