use std::collections::HashMap;

use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::AttributeValue;
use product_catalog_core::product::{parse_decimal, Product};

use crate::adapters::product_store::{ProductStore, StoreError};

pub type Item = HashMap<String, AttributeValue>;

/// Product store over a single DynamoDB table keyed by `productId`.
///
/// The client is built once per process and shared across invocations; calls
/// bridge onto the current multi-threaded Tokio runtime.
#[derive(Debug, Clone)]
pub struct DynamoDbProductStore {
    client: aws_sdk_dynamodb::Client,
    table_name: String,
}

impl DynamoDbProductStore {
    pub fn new(client: aws_sdk_dynamodb::Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }
}

impl ProductStore for DynamoDbProductStore {
    fn scan_products(&self) -> Result<Vec<Product>, StoreError> {
        let client = self.client.clone();
        let table_name = self.table_name.clone();

        let items: Vec<Item> = tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                client
                    .scan()
                    .table_name(table_name)
                    .into_paginator()
                    .items()
                    .send()
                    .collect::<Result<Vec<_>, _>>()
                    .await
            })
        })
        .map_err(|error| StoreError::Scan {
            table: self.table_name.clone(),
            message: DisplayErrorContext(&error).to_string(),
        })?;

        tracing::debug!(
            component = "dynamodb_store",
            event = "table_scanned",
            table = %self.table_name,
            items = items.len()
        );

        items
            .iter()
            .map(|item| {
                product_from_item(item).map_err(|message| StoreError::MalformedRecord {
                    table: self.table_name.clone(),
                    message,
                })
            })
            .collect()
    }

    fn put_product(&self, product: &Product) -> Result<(), StoreError> {
        let client = self.client.clone();
        let table_name = self.table_name.clone();
        let item = product_to_item(product);

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                client
                    .put_item()
                    .table_name(table_name)
                    .set_item(Some(item))
                    .send()
                    .await
                    .map(|_| ())
            })
        })
        .map_err(|error| StoreError::Put {
            table: self.table_name.clone(),
            message: DisplayErrorContext(&error).to_string(),
        })
    }
}

pub fn product_to_item(product: &Product) -> Item {
    HashMap::from([
        (
            "productId".to_string(),
            AttributeValue::S(product.product_id.clone()),
        ),
        ("name".to_string(), AttributeValue::S(product.name.clone())),
        (
            "description".to_string(),
            AttributeValue::S(product.description.clone()),
        ),
        (
            "price".to_string(),
            AttributeValue::N(product.price.to_string()),
        ),
        (
            "category".to_string(),
            AttributeValue::S(product.category.clone()),
        ),
        (
            "createdAt".to_string(),
            AttributeValue::S(product.created_at.clone()),
        ),
        (
            "updatedAt".to_string(),
            AttributeValue::S(product.updated_at.clone()),
        ),
    ])
}

pub fn product_from_item(item: &Item) -> Result<Product, String> {
    let product_id = required_string(item, "productId")?;
    let price_text = item
        .get("price")
        .ok_or_else(|| format!("record {product_id} is missing attribute 'price'"))?
        .as_n()
        .map_err(|_| format!("record {product_id} has a non-numeric 'price'"))?;
    let price = parse_decimal(price_text)
        .map_err(|error| format!("record {product_id} has an invalid 'price': {error}"))?;

    Ok(Product {
        name: required_string(item, "name")?,
        description: optional_string(item, "description")?,
        price,
        category: optional_string(item, "category")?,
        created_at: optional_string(item, "createdAt")?,
        updated_at: optional_string(item, "updatedAt")?,
        product_id,
    })
}

fn required_string(item: &Item, key: &str) -> Result<String, String> {
    match item.get(key) {
        Some(value) => string_value(value, key),
        None => Err(format!("missing attribute '{key}'")),
    }
}

fn optional_string(item: &Item, key: &str) -> Result<String, String> {
    match item.get(key) {
        Some(AttributeValue::Null(_)) | None => Ok(String::new()),
        Some(value) => string_value(value, key),
    }
}

fn string_value(value: &AttributeValue, key: &str) -> Result<String, String> {
    value
        .as_s()
        .cloned()
        .map_err(|_| format!("attribute '{key}' must be a string"))
}
