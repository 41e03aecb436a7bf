//! Shared product catalog domain primitives.
//!
//! This crate owns request validation, list shaping, and the response
//! contracts of the catalog handlers. It intentionally excludes AWS SDK and
//! Lambda runtime concerns; those live in `product_catalog_lambda`.

pub mod contract;
pub mod listing;
pub mod product;
pub mod validation;
