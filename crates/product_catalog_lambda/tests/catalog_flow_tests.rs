mod support;

use product_catalog_lambda::handlers::create::{create_product, handle_create_event, CreateContext};
use product_catalog_lambda::handlers::http::normalize_apigw_event;
use product_catalog_lambda::handlers::list::handle_list_event;
use product_catalog_lambda::handlers::router::route_event;
use serde_json::{json, Value};

use support::store::MemoryProductStore;

fn post(body: Value) -> Value {
    json!({"httpMethod": "POST", "body": body.to_string()})
}

fn get(pairs: &[(&str, &str)]) -> Value {
    let params: serde_json::Map<String, Value> = pairs
        .iter()
        .map(|(key, value)| (key.to_string(), Value::from(*value)))
        .collect();
    json!({
        "httpMethod": "GET",
        "queryStringParameters": (!params.is_empty()).then_some(params),
    })
}

fn create_at(store: &MemoryProductStore, id: &str, timestamp: &str, body: Value) -> Value {
    let event = normalize_apigw_event(&post(body)).expect("event should normalize");
    let response = create_product(
        &event,
        CreateContext {
            product_id: id.to_string(),
            timestamp: timestamp.to_string(),
        },
        store,
    );
    assert_eq!(response.status_code, 201, "{}", response.body);
    response.body_json().expect("body should be json")
}

#[test]
fn created_price_survives_listing_without_drift() {
    let store = MemoryProductStore::default();
    let created = handle_create_event(&post(json!({"name": "Lamp", "price": 19.99})), &store);
    assert_eq!(created.status_code, 201);

    let listed = handle_list_event(&get(&[]), &store);
    let body = listed.body_json().expect("body should be json");
    assert_eq!(body["count"], 1);
    assert_eq!(body["products"][0]["price"].as_f64(), Some(19.99));
    assert_eq!(body["products"][0]["price"].to_string(), "19.99");
}

#[test]
fn category_and_limit_return_most_recent_match() {
    let store = MemoryProductStore::default();
    create_at(
        &store,
        "hammer",
        "2026-02-14T09:00:00.000000Z",
        json!({"name": "Hammer", "price": 12, "category": "Tools"}),
    );
    create_at(
        &store,
        "fern",
        "2026-02-14T10:00:00.000000Z",
        json!({"name": "Fern", "price": 4.5, "category": "Garden"}),
    );
    create_at(
        &store,
        "wrench",
        "2026-02-14T11:00:00.000000Z",
        json!({"name": "Wrench", "price": "8.25", "category": "Tools"}),
    );

    let response = handle_list_event(&get(&[("category", "Tools"), ("limit", "1")]), &store);
    assert_eq!(response.status_code, 200);
    let body = response.body_json().expect("body should be json");
    assert_eq!(body["count"], 1);
    assert_eq!(body["products"][0]["productId"], "wrench");

    let response = handle_list_event(&get(&[("category", "Tools")]), &store);
    let body = response.body_json().expect("body should be json");
    let products = body["products"].as_array().expect("products should be an array");
    assert_eq!(products.len(), 2);
    assert!(products
        .iter()
        .all(|product| product["category"] == "Tools"));
}

#[test]
fn limit_never_exceeds_requested_count() {
    let store = MemoryProductStore::default();
    for index in 0..5 {
        create_at(
            &store,
            &format!("p{index}"),
            &format!("2026-02-14T00:00:0{index}.000000Z"),
            json!({"name": format!("Item {index}"), "price": index}),
        );
    }

    for limit in 0..7usize {
        let limit_text = limit.to_string();
        let response = handle_list_event(&get(&[("limit", &limit_text)]), &store);
        let body = response.body_json().expect("body should be json");
        let count = body["count"].as_u64().expect("count should be a number") as usize;
        assert_eq!(count, limit.min(5));
        if count > 0 {
            assert_eq!(body["products"][0]["productId"], "p4");
        }
    }
}

#[test]
fn rejected_requests_leave_store_untouched() {
    let store = MemoryProductStore::default();
    let cases = [
        (json!({"price": 3}), "Missing required field: name"),
        (json!({"name": "Widget"}), "Missing required field: price"),
        (json!({"name": "Widget", "price": -3}), "Invalid price: Price cannot be negative"),
    ];

    for (payload, expected) in cases {
        let response = handle_create_event(&post(payload), &store);
        assert_eq!(response.status_code, 400);
        let body = response.body_json().expect("body should be json");
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], expected);
    }

    assert_eq!(store.product_count(), 0);
}

#[test]
fn outage_surfaces_as_internal_error_for_both_operations() {
    let store = MemoryProductStore::default();
    store.set_unavailable(true);

    let listed = handle_list_event(&get(&[]), &store);
    assert_eq!(listed.status_code, 500);
    assert_eq!(listed.headers["Access-Control-Allow-Origin"], "*");

    let created = handle_create_event(&post(json!({"name": "Widget", "price": 1})), &store);
    assert_eq!(created.status_code, 500);
    let body = created.body_json().expect("body should be json");
    assert_eq!(body["error"], "Internal server error");
    assert!(body["message"]
        .as_str()
        .expect("message should be a string")
        .contains("simulated outage"));
}

#[test]
fn router_serves_full_catalog_flow_from_proxy_events() {
    let store = MemoryProductStore::default();

    let create_event = json!({
        "httpMethod": "POST",
        "path": "/products",
        "body": "{\"name\":\"Widget\",\"price\":9.99,\"category\":\"Tools\"}",
        "isBase64Encoded": false,
        "queryStringParameters": null
    });
    let created = route_event(&create_event, &store);
    assert_eq!(created.status_code, 201);
    let created_body = created.body_json().expect("body should be json");
    assert_eq!(created_body["product"]["description"], "");

    let list_event = json!({
        "httpMethod": "GET",
        "path": "/products",
        "queryStringParameters": {"category": "Tools"}
    });
    let listed = route_event(&list_event, &store);
    let listed_body = listed.body_json().expect("body should be json");
    assert_eq!(listed_body["count"], 1);
    assert_eq!(
        listed_body["products"][0]["productId"],
        created_body["product"]["productId"]
    );
}

#[test]
fn lambda_payloads_with_loose_field_types_still_get_formatted_responses() {
    let store = MemoryProductStore::default();

    let created = handle_create_event(
        &json!({"httpMethod": "POST", "body": {"name": "Widget", "price": 1}}),
        &store,
    );
    assert_eq!(created.status_code, 201, "{}", created.body);
    create_at(
        &store,
        "later",
        "2999-01-01T00:00:00.000000Z",
        json!({"name": "Gadget", "price": 2}),
    );

    let listed = handle_list_event(
        &json!({"httpMethod": "GET", "queryStringParameters": {"limit": 1}}),
        &store,
    );
    assert_eq!(listed.status_code, 200);
    assert_eq!(listed.headers["Access-Control-Allow-Origin"], "*");
    let body = listed.body_json().expect("body should be json");
    assert_eq!(body["count"], 1);
    assert_eq!(body["products"][0]["productId"], "later");

    let rejected = handle_create_event(&json!({"httpMethod": "POST", "body": 12}), &store);
    assert_eq!(rejected.status_code, 400);
    assert_eq!(store.product_count(), 2);
}
