use product_catalog_core::contract::ListProductsResponse;
use product_catalog_core::listing::{shape_listing, ListQuery};
use serde_json::Value;

use crate::adapters::product_store::ProductStore;
use crate::handlers::http::{
    internal_error_response, normalize_apigw_event, success_response, ApiGatewayEvent,
    ApiGatewayResponse,
};

pub const LIST_ALLOWED_METHODS: &str = "GET,OPTIONS";

/// Lists products, optionally filtered by `category` and capped by `limit`.
///
/// Query parameters are never rejected; only store or serialization faults
/// produce an error response.
pub fn handle_list_event(event: &Value, store: &dyn ProductStore) -> ApiGatewayResponse {
    match normalize_apigw_event(event) {
        Ok(event) => list_products(&event, store),
        Err(message) => {
            tracing::error!(
                component = "list_handler",
                event = "request_failed",
                error = %message
            );
            internal_error_response(message)
        }
    }
}

pub fn list_products(event: &ApiGatewayEvent, store: &dyn ProductStore) -> ApiGatewayResponse {
    let query = ListQuery::from_params(&event.query_string_parameters);
    tracing::info!(
        component = "list_handler",
        event = "list_requested",
        category = ?query.category,
        limit = ?query.limit
    );

    let products = match store.scan_products() {
        Ok(value) => value,
        Err(error) => {
            tracing::error!(
                component = "list_handler",
                event = "request_failed",
                error = %error
            );
            return internal_error_response(error.to_string());
        }
    };

    let products = shape_listing(products, &query);
    tracing::info!(
        component = "list_handler",
        event = "products_listed",
        count = products.len()
    );

    success_response(
        200,
        LIST_ALLOWED_METHODS,
        &ListProductsResponse::new(products),
    )
}
