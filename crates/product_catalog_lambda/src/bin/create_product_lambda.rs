use lambda_runtime::{service_fn, Error, LambdaEvent};
use product_catalog_lambda::adapters::dynamodb::DynamoDbProductStore;
use product_catalog_lambda::config::CatalogConfig;
use product_catalog_lambda::handlers::create::handle_create_event;
use product_catalog_lambda::handlers::http::ApiGatewayResponse;
use serde_json::Value;

async fn handle_request(
    store: &DynamoDbProductStore,
    event: LambdaEvent<Value>,
) -> Result<ApiGatewayResponse, Error> {
    Ok(handle_create_event(&event.payload, store))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    lambda_runtime::tracing::init_default_subscriber();

    let config = CatalogConfig::from_env()?;
    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let store = DynamoDbProductStore::new(
        aws_sdk_dynamodb::Client::new(&aws_config),
        config.table_name,
    );

    lambda_runtime::run(service_fn(|event| handle_request(&store, event))).await
}
