//! End-to-end tests for the order HTTP API
//!
//! Each test starts the full router on an ephemeral port backed by the
//! in-memory store and talks to it over real HTTP.

use std::sync::Arc;

use reqwest::StatusCode;
use serde_json::{Value, json};
use tokio::net::TcpListener;

use menu_digital::gateway;
use menu_digital::{AppState, InMemoryOrderRepository, OrderService};

async fn spawn_app() -> String {
    let repo = Arc::new(InMemoryOrderRepository::new());
    let orders = Arc::new(OrderService::new(repo));
    let state = Arc::new(AppState::new(orders, None));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, gateway::router(state)).await.unwrap();
    });
    format!("http://{}", addr)
}

fn lunch_order() -> Value {
    json!({
        "customerName": "Ana",
        "tableNumber": "7",
        "items": [
            { "name": "Burger", "price": 25.0, "quantity": 2 },
            { "name": "Soda", "price": 7.5, "quantity": 2 }
        ]
    })
}

async fn create(client: &reqwest::Client, base: &str, body: &Value) -> Value {
    let resp = client
        .post(format!("{}/api/orders", base))
        .json(body)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    resp.json().await.unwrap()
}

#[tokio::test]
async fn test_create_order_computes_total_and_issues_token() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();

    let order = create(&client, &base, &lunch_order()).await;

    assert_eq!(order["total"], json!(65.0));
    assert_eq!(order["status"], "PENDING");
    assert_eq!(order["customerName"], "Ana");
    assert_eq!(order["tableNumber"], "7");
    assert_eq!(order["token"].as_str().unwrap().len(), 36);
    assert!(order["createdAt"].is_string());

    let items = order["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["name"], "Burger");
    assert_eq!(items[0]["price"], json!(25.0));
    assert_eq!(items[0]["quantity"], 2);
    assert!(items[0].get("orderId").is_none());
}

#[tokio::test]
async fn test_get_by_id_and_by_token_return_same_order() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();
    let created = create(&client, &base, &lunch_order()).await;

    let by_id: Value = client
        .get(format!("{}/api/orders/{}", base, created["id"]))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(by_id, created);

    let token = created["token"].as_str().unwrap();
    let resp = client
        .get(format!("{}/api/orders/token/{}", base, token))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let by_token: Value = resp.json().await.unwrap();
    assert_eq!(by_token["id"], created["id"]);
    assert_eq!(by_token["total"], json!(65.0));
}

#[tokio::test]
async fn test_unknown_token_is_not_found() {
    let base = spawn_app().await;
    let resp = reqwest::get(format!("{}/api/orders/token/nope", base))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["code"], 4001);
    assert!(body["msg"].as_str().unwrap().contains("nope"));
}

#[tokio::test]
async fn test_update_replaces_items_and_recomputes_total() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();
    let created = create(&client, &base, &lunch_order()).await;

    let resp = client
        .put(format!("{}/api/orders/{}", base, created["id"]))
        .json(&json!({
            "customerName": "Ana",
            "tableNumber": "9",
            "items": [{ "name": "Pizza", "price": 30.0, "quantity": 1 }]
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Value = resp.json().await.unwrap();

    assert_eq!(updated["total"], json!(30.0));
    assert_eq!(updated["tableNumber"], "9");
    assert_eq!(updated["items"].as_array().unwrap().len(), 1);
    assert_eq!(updated["items"][0]["name"], "Pizza");
    // Identity fields survive the replacement
    assert_eq!(updated["token"], created["token"]);
    assert_eq!(updated["status"], "PENDING");
    assert_eq!(updated["createdAt"], created["createdAt"]);
}

#[tokio::test]
async fn test_update_unknown_order_is_not_found() {
    let base = spawn_app().await;
    let resp = reqwest::Client::new()
        .put(format!("{}/api/orders/999", base))
        .json(&lunch_order())
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_then_get_and_delete_again_are_not_found() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();
    let created = create(&client, &base, &lunch_order()).await;
    let url = format!("{}/api/orders/{}", base, created["id"]);

    let resp = client.delete(&url).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = client.get(&url).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = client.delete(&url).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let token = created["token"].as_str().unwrap();
    let resp = client
        .get(format!("{}/api/orders/token/{}", base, token))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_returns_every_order() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();

    let empty: Vec<Value> = reqwest::get(format!("{}/api/orders", base))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(empty.is_empty());

    let a = create(&client, &base, &lunch_order()).await;
    let b = create(&client, &base, &lunch_order()).await;
    assert_ne!(a["token"], b["token"]);

    let all: Vec<Value> = reqwest::get(format!("{}/api/orders", base))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(all.len(), 2);
    assert!(all.iter().all(|o| o["items"].as_array().unwrap().len() == 2));
}

#[tokio::test]
async fn test_malformed_payloads_are_rejected() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();
    let url = format!("{}/api/orders", base);

    // Not JSON at all
    let resp = client
        .post(&url)
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["code"], 1001);

    // Negative price
    let resp = client
        .post(&url)
        .json(&json!({ "items": [{ "name": "Soup", "price": -1.0, "quantity": 1 }] }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // No items
    let resp = client
        .post(&url)
        .json(&json!({ "customerName": "Ana", "items": [] }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let all: Vec<Value> = client.get(&url).send().await.unwrap().json().await.unwrap();
    assert!(all.is_empty(), "rejected payloads must not be stored");
}

#[tokio::test]
async fn test_unknown_id_is_not_found() {
    let base = spawn_app().await;
    let resp = reqwest::get(format!("{}/api/orders/424242", base))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["code"], 4001);
}

#[tokio::test]
async fn test_health_reports_memory_backend() {
    let base = spawn_app().await;
    let resp = reqwest::get(format!("{}/api/health", base)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["code"], 0);
    assert_eq!(body["data"]["storage"], "memory");
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let base = spawn_app().await;
    let resp = reqwest::get(format!("{}/api-docs/openapi.json", base))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let doc: Value = resp.json().await.unwrap();
    assert!(doc["paths"]["/api/orders/token/{token}"].is_object());
}

#[tokio::test]
async fn test_non_numeric_id_uses_error_envelope() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();
    let url = format!("{}/api/orders/abc", base);

    let responses = [
        client.get(&url).send().await.unwrap(),
        client.put(&url).json(&lunch_order()).send().await.unwrap(),
        client.delete(&url).send().await.unwrap(),
    ];
    for resp in responses {
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["code"], 1001);
        assert!(body["msg"].as_str().unwrap().starts_with("Invalid order id"));
    }
}
