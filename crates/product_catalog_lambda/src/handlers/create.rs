use chrono::{SecondsFormat, Utc};
use product_catalog_core::contract::CreateProductResponse;
use product_catalog_core::validation::parse_create_request;
use serde_json::Value;
use uuid::Uuid;

use crate::adapters::product_store::ProductStore;
use crate::handlers::http::{
    client_error_response, internal_error_response, normalize_apigw_event, success_response,
    ApiGatewayEvent, ApiGatewayResponse,
};

pub const CREATE_ALLOWED_METHODS: &str = "POST,OPTIONS";

/// Identity and timestamp assigned to a product at creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateContext {
    pub product_id: String,
    pub timestamp: String,
}

impl CreateContext {
    pub fn now() -> Self {
        Self {
            product_id: Uuid::new_v4().to_string(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
        }
    }
}

pub fn handle_create_event(event: &Value, store: &dyn ProductStore) -> ApiGatewayResponse {
    match normalize_apigw_event(event) {
        Ok(event) => create_product(&event, CreateContext::now(), store),
        Err(message) => {
            tracing::error!(
                component = "create_handler",
                event = "request_failed",
                error = %message
            );
            internal_error_response(message)
        }
    }
}

/// Validates the body, persists one new product, and echoes it back.
///
/// Validation stops at the first failure. Nothing is written unless every
/// check passes.
pub fn create_product(
    event: &ApiGatewayEvent,
    context: CreateContext,
    store: &dyn ProductStore,
) -> ApiGatewayResponse {
    let new_product = match event
        .body_text()
        .and_then(|body| parse_create_request(body.as_deref()))
    {
        Ok(value) => value,
        Err(error) => {
            tracing::info!(
                component = "create_handler",
                event = "request_rejected",
                error = %error
            );
            return client_error_response(&error);
        }
    };

    let product = new_product.into_product(context.product_id, &context.timestamp);

    if let Err(error) = store.put_product(&product) {
        tracing::error!(
            component = "create_handler",
            event = "request_failed",
            product_id = %product.product_id,
            error = %error
        );
        return internal_error_response(error.to_string());
    }

    tracing::info!(
        component = "create_handler",
        event = "product_created",
        product_id = %product.product_id,
        category = %product.category
    );

    success_response(
        201,
        CREATE_ALLOWED_METHODS,
        &CreateProductResponse::new(product),
    )
}
