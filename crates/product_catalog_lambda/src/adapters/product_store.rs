use product_catalog_core::product::Product;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("failed to scan table '{table}': {message}")]
    Scan { table: String, message: String },
    #[error("failed to put item into table '{table}': {message}")]
    Put { table: String, message: String },
    #[error("malformed record in table '{table}': {message}")]
    MalformedRecord { table: String, message: String },
}

pub trait ProductStore {
    /// Returns every record in the table, in scan order.
    fn scan_products(&self) -> Result<Vec<Product>, StoreError>;

    fn put_product(&self, product: &Product) -> Result<(), StoreError>;
}
