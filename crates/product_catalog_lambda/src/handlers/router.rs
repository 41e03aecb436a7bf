use product_catalog_core::contract::METHOD_NOT_ALLOWED;
use serde_json::Value;

use crate::adapters::product_store::ProductStore;
use crate::handlers::create::{create_product, CreateContext};
use crate::handlers::http::{
    internal_error_response, method_not_allowed_response, normalize_apigw_event,
    preflight_response, ApiGatewayResponse,
};
use crate::handlers::list::list_products;

pub const ROUTER_ALLOWED_METHODS: &str = "GET,POST,OPTIONS";

/// Serves both catalog operations from a single function, keyed on method.
pub fn route_event(event: &Value, store: &dyn ProductStore) -> ApiGatewayResponse {
    let event = match normalize_apigw_event(event) {
        Ok(value) => value,
        Err(message) => {
            tracing::error!(component = "router", event = "request_failed", error = %message);
            return internal_error_response(message);
        }
    };
    let method = event.http_method.as_deref().map(str::to_ascii_uppercase);

    match method.as_deref() {
        Some("GET") => list_products(&event, store),
        Some("POST") => create_product(&event, CreateContext::now(), store),
        Some("OPTIONS") => preflight_response(ROUTER_ALLOWED_METHODS),
        other => {
            tracing::info!(
                component = "router",
                event = "method_rejected",
                method = ?other
            );
            method_not_allowed_response(METHOD_NOT_ALLOWED, ROUTER_ALLOWED_METHODS)
        }
    }
}
