use serde::Serialize;
use thiserror::Error;

use crate::product::Product;

pub const PRODUCT_CREATED_MESSAGE: &str = "Product created successfully";
pub const INTERNAL_SERVER_ERROR: &str = "Internal server error";
pub const METHOD_NOT_ALLOWED: &str = "Method not allowed";

/// Caller mistakes detected while validating a create request.
///
/// The `Display` output of each variant is the stable `error` string returned
/// in the 400 response body.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientInputError {
    #[error("Missing request body")]
    MissingBody,
    #[error("Invalid JSON in request body")]
    MalformedBody,
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
    #[error("Invalid price: {0}")]
    InvalidPrice(String),
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ListProductsResponse {
    pub success: bool,
    pub count: usize,
    pub products: Vec<Product>,
}

impl ListProductsResponse {
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            success: true,
            count: products.len(),
            products,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CreateProductResponse {
    pub success: bool,
    pub message: String,
    pub product: Product,
}

impl CreateProductResponse {
    pub fn new(product: Product) -> Self {
        Self {
            success: true,
            message: PRODUCT_CREATED_MESSAGE.to_string(),
            product,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorResponse {
    pub fn client(error: &ClientInputError) -> Self {
        Self::bare(error.to_string())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: INTERNAL_SERVER_ERROR.to_string(),
            message: Some(message.into()),
        }
    }

    pub fn bare(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            message: None,
        }
    }
}
