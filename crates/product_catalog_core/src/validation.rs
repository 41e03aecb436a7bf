use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use crate::contract::ClientInputError;
use crate::product::{parse_decimal, NewProduct, DEFAULT_CATEGORY};

/// Create payload as sent by the caller, before validation.
///
/// `price` stays untyped so that a non-numeric value is reported as an
/// invalid price rather than as a malformed body.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct CreateProductRequest {
    pub name: Option<String>,
    pub price: Option<Value>,
    pub description: Option<String>,
    pub category: Option<String>,
}

pub fn parse_create_request(body: Option<&str>) -> Result<NewProduct, ClientInputError> {
    let body = match body {
        Some(text) if !text.is_empty() => text,
        _ => return Err(ClientInputError::MissingBody),
    };

    let request: CreateProductRequest =
        serde_json::from_str(body).map_err(|_| ClientInputError::MalformedBody)?;

    validate_create_request(request)
}

pub fn validate_create_request(
    request: CreateProductRequest,
) -> Result<NewProduct, ClientInputError> {
    let name = match request.name {
        Some(name) if !name.trim().is_empty() => name,
        _ => return Err(ClientInputError::MissingField("name")),
    };

    let price = match request.price {
        Some(value) if !value.is_null() => parse_price(&value)?,
        _ => return Err(ClientInputError::MissingField("price")),
    };

    Ok(NewProduct {
        name,
        description: request.description.unwrap_or_default(),
        price,
        category: request
            .category
            .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
    })
}

pub fn parse_price(value: &Value) -> Result<Decimal, ClientInputError> {
    let text = match value {
        Value::Number(number) => number.to_string(),
        Value::String(text) => text.clone(),
        other => {
            return Err(ClientInputError::InvalidPrice(format!(
                "expected a number, got {}",
                json_type_name(other)
            )));
        }
    };

    let price =
        parse_decimal(&text).map_err(|error| ClientInputError::InvalidPrice(error.to_string()))?;

    if price < Decimal::ZERO {
        return Err(ClientInputError::InvalidPrice(
            "Price cannot be negative".to_string(),
        ));
    }

    Ok(price)
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
