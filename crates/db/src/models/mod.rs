//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A `Deserialize` input DTO with every field optional, so missing
//!   fields surface as validation messages rather than decode errors
//! - A validated, complete form of that input consumed by the repositories

pub mod category;
pub mod product;
