//! AWS-oriented adapters and handlers for the product catalog.
//!
//! This crate owns runtime integration details (Lambda handlers, the
//! DynamoDB-backed product store, and environment configuration). Validation,
//! list shaping, and response contracts come from `product_catalog_core`.

pub mod adapters;
pub mod config;
pub mod handlers;
