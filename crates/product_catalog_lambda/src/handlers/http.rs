use std::collections::HashMap;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use product_catalog_core::contract::{ClientInputError, ErrorResponse, INTERNAL_SERVER_ERROR};
use serde::Serialize;
use serde_json::{json, Map, Value};

/// The subset of an API Gateway proxy event the catalog handlers read.
///
/// Built by [`normalize_apigw_event`] from the raw payload, so a loosely typed
/// field never fails the invocation before a response can be formatted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiGatewayEvent {
    pub http_method: Option<String>,
    pub body: Option<Value>,
    pub is_base64_encoded: bool,
    pub query_string_parameters: HashMap<String, String>,
}

impl ApiGatewayEvent {
    /// Returns the request body as text, decoding base64 payloads.
    ///
    /// An object body is taken as the request document itself. Any other
    /// non-string body is malformed.
    pub fn body_text(&self) -> Result<Option<String>, ClientInputError> {
        let body = match &self.body {
            None => return Ok(None),
            Some(Value::Object(_)) => return Ok(self.body.as_ref().map(Value::to_string)),
            Some(Value::String(text)) => text,
            Some(_) => return Err(ClientInputError::MalformedBody),
        };

        if !self.is_base64_encoded {
            return Ok(Some(body.clone()));
        }

        let bytes = STANDARD
            .decode(body)
            .map_err(|_| ClientInputError::MalformedBody)?;
        String::from_utf8(bytes)
            .map(Some)
            .map_err(|_| ClientInputError::MalformedBody)
    }
}

/// Reads a raw proxy payload into an [`ApiGatewayEvent`].
///
/// Only a non-object payload is an error. Query values that are numbers or
/// booleans are kept as their text; other non-string values are dropped.
pub fn normalize_apigw_event(event: &Value) -> Result<ApiGatewayEvent, String> {
    let Some(object) = event.as_object() else {
        return Err("Request payload must be a JSON object".to_string());
    };

    let body = match object.get("body") {
        None | Some(Value::Null) => None,
        Some(value) => Some(value.clone()),
    };

    Ok(ApiGatewayEvent {
        http_method: object
            .get("httpMethod")
            .and_then(Value::as_str)
            .map(str::to_string),
        body,
        is_base64_encoded: object
            .get("isBase64Encoded")
            .and_then(Value::as_bool)
            .unwrap_or(false),
        query_string_parameters: object
            .get("queryStringParameters")
            .and_then(Value::as_object)
            .map(query_params)
            .unwrap_or_default(),
    })
}

fn query_params(params: &Map<String, Value>) -> HashMap<String, String> {
    params
        .iter()
        .filter_map(|(key, value)| {
            let text = match value {
                Value::String(text) => text.clone(),
                Value::Number(number) => number.to_string(),
                Value::Bool(flag) => flag.to_string(),
                _ => return None,
            };
            Some((key.clone(), text))
        })
        .collect()
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ApiGatewayResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub headers: Value,
    pub body: String,
}

impl ApiGatewayResponse {
    pub fn body_json(&self) -> Result<Value, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

/// Headers for successful responses; error responses carry only the origin.
pub fn cors_headers(allow_methods: &str) -> Value {
    json!({
        "Content-Type": "application/json",
        "Access-Control-Allow-Origin": "*",
        "Access-Control-Allow-Headers": "Content-Type",
        "Access-Control-Allow-Methods": allow_methods,
    })
}

fn error_headers() -> Value {
    json!({
        "Content-Type": "application/json",
        "Access-Control-Allow-Origin": "*",
    })
}

pub fn success_response(
    status_code: u16,
    allow_methods: &str,
    payload: &impl Serialize,
) -> ApiGatewayResponse {
    match serde_json::to_string(payload) {
        Ok(body) => ApiGatewayResponse {
            status_code,
            headers: cors_headers(allow_methods),
            body,
        },
        Err(error) => {
            let message = format!("failed to serialize response body: {error}");
            tracing::error!(component = "http", event = "serialization_failed", error = %message);
            internal_error_response(message)
        }
    }
}

pub fn client_error_response(error: &ClientInputError) -> ApiGatewayResponse {
    error_response(400, error_headers(), &ErrorResponse::client(error))
}

pub fn internal_error_response(message: impl Into<String>) -> ApiGatewayResponse {
    error_response(500, error_headers(), &ErrorResponse::internal(message))
}

pub fn method_not_allowed_response(error: &str, allow_methods: &str) -> ApiGatewayResponse {
    let mut headers = error_headers();
    headers["Allow"] = Value::from(allow_methods);
    error_response(405, headers, &ErrorResponse::bare(error))
}

pub fn preflight_response(allow_methods: &str) -> ApiGatewayResponse {
    ApiGatewayResponse {
        status_code: 204,
        headers: cors_headers(allow_methods),
        body: String::new(),
    }
}

fn error_response(status_code: u16, headers: Value, payload: &ErrorResponse) -> ApiGatewayResponse {
    let body = serde_json::to_string(payload).unwrap_or_else(|_| {
        json!({
            "success": false,
            "error": INTERNAL_SERVER_ERROR,
        })
        .to_string()
    });

    ApiGatewayResponse {
        status_code,
        headers,
        body,
    }
}
