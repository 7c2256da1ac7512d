//! Domain logic for the product catalog.
//!
//! This crate performs no I/O. It holds the listing contract (filters,
//! sort allow-list, page math), the text-search query builder, and the
//! field validators shared by the database and HTTP layers.

pub mod error;
pub mod listing;
pub mod search;
pub mod types;
pub mod validation;
