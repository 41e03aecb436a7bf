pub mod dynamodb;
pub mod product_store;
