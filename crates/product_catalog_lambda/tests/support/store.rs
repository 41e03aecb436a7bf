#![allow(dead_code)]

use std::sync::Mutex;

use product_catalog_core::product::Product;
use product_catalog_lambda::adapters::product_store::{ProductStore, StoreError};

/// In-memory stand-in for the products table that keeps insertion order.
#[derive(Default)]
pub struct MemoryProductStore {
    products: Mutex<Vec<Product>>,
    unavailable: Mutex<bool>,
}

impl MemoryProductStore {
    pub fn set_unavailable(&self, unavailable: bool) {
        *self.unavailable.lock().expect("poisoned mutex") = unavailable;
    }

    pub fn product_count(&self) -> usize {
        self.products.lock().expect("poisoned mutex").len()
    }

    fn is_unavailable(&self) -> bool {
        *self.unavailable.lock().expect("poisoned mutex")
    }
}

impl ProductStore for MemoryProductStore {
    fn scan_products(&self) -> Result<Vec<Product>, StoreError> {
        if self.is_unavailable() {
            return Err(StoreError::Scan {
                table: "products".to_string(),
                message: "simulated outage".to_string(),
            });
        }
        Ok(self.products.lock().expect("poisoned mutex").clone())
    }

    fn put_product(&self, product: &Product) -> Result<(), StoreError> {
        if self.is_unavailable() {
            return Err(StoreError::Put {
                table: "products".to_string(),
                message: "simulated outage".to_string(),
            });
        }
        self.products
            .lock()
            .expect("poisoned mutex")
            .push(product.clone());
        Ok(())
    }
}
