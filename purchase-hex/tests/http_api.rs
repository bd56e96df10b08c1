//! HTTP-level tests for the purchase API.
//!
//! These drive the full router against in-memory SQLite and a local stand-in
//! for the Treasury feed, so the envelope shapes and status codes are checked
//! end to end.
//!
//! This test requires the `sqlite` feature flag.

#![cfg(feature = "sqlite")]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    body::Body,
    extract::{Query, State},
    http::{Method, Request, StatusCode},
    routing::get,
};
use exchange_rates::TreasuryRates;
use http_body_util::BodyExt;
use purchase_hex::{PurchaseService, inbound::HttpServer};
use purchase_repo::SqliteRepo;
use serde_json::{Value, json};
use tower::ServiceExt;

type Queries = Arc<Mutex<Vec<HashMap<String, String>>>>;

/// Serves `records` as the feed's `data` array and records every query string.
async fn spawn_feed(records: Value) -> (String, Queries) {
    spawn_feed_responding(StatusCode::OK, json!({ "data": records })).await
}

/// Feed stand-in that answers every lookup with `status` and `body`.
async fn spawn_feed_responding(status: StatusCode, body: Value) -> (String, Queries) {
    let queries: Queries = Arc::new(Mutex::new(Vec::new()));

    let app = Router::new()
        .route(
            "/rates_of_exchange",
            get(
                move |State((body, seen)): State<(Value, Queries)>,
                      Query(params): Query<HashMap<String, String>>| async move {
                    seen.lock().unwrap().push(params);
                    (status, Json(body))
                },
            ),
        )
        .with_state((body, queries.clone()));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}/rates_of_exchange", addr), queries)
}

/// Helper to create a router backed by in-memory SQLite and the given feed.
async fn create_test_app(feed_url: &str) -> Router {
    let repo = SqliteRepo::new("sqlite::memory:").await.unwrap();
    let rates = TreasuryRates::new(feed_url);
    HttpServer::new(PurchaseService::new(repo, rates)).router()
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(b) => {
            builder = builder.header("Content-Type", "application/json");
            Body::from(b.to_string())
        }
        None => Body::empty(),
    };

    let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

async fn create(app: &Router, body: &str) -> (StatusCode, Value) {
    send(app, Method::POST, "/purchase", Some(body)).await
}

/// Records a purchase dated 2024-03-15 and returns its id.
async fn create_purchase_id(app: &Router) -> String {
    let (status, created) = create(
        app,
        r#"{"description": "Desk", "date": "2024-03-15", "amount": 10}"#,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    created["data"]["data"]["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_health() {
    let (feed, _) = spawn_feed(json!([])).await;
    let app = create_test_app(&feed).await;

    let (status, body) = send(&app, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let (feed, _) = spawn_feed(json!([])).await;
    let app = create_test_app(&feed).await;

    let (status, body) = send(&app, Method::GET, "/api-docs/openapi.json", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/purchase"].is_object());
}

#[tokio::test]
async fn test_create_purchase_returns_201_envelope() {
    let (feed, _) = spawn_feed(json!([])).await;
    let app = create_test_app(&feed).await;

    let (status, body) = create(
        &app,
        r#"{"description": "Office chair", "date": "2024-03-15", "amount": 100}"#,
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], 201);
    assert_eq!(body["message"], "success");

    let purchase = &body["data"]["data"];
    assert!(purchase["id"].as_str().is_some_and(|id| !id.is_empty()));
    assert_eq!(purchase["description"], "Office chair");
    assert_eq!(purchase["date"], "2024-03-15");
    assert_eq!(purchase["amount"].as_f64(), Some(100.0));
}

#[tokio::test]
async fn test_create_purchase_accepts_timestamp_date() {
    let (feed, _) = spawn_feed(json!([])).await;
    let app = create_test_app(&feed).await;

    let (status, body) = create(
        &app,
        r#"{"description": "Lamp", "date": "2024-03-15T10:30:00Z", "amount": 12.5}"#,
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["data"]["date"], "2024-03-15");
}

#[tokio::test]
async fn test_create_purchase_validation_errors() {
    let (feed, _) = spawn_feed(json!([])).await;
    let app = create_test_app(&feed).await;

    let cases = [
        r#"{"description": "", "date": "2024-03-15", "amount": 10}"#,
        r#"{"description": "Desk", "date": "2024-03-15", "amount": 0}"#,
        r#"{"description": "Desk", "date": "2024-03-15", "amount": -3}"#,
        r#"{"description": "Desk", "date": "not a date", "amount": 10}"#,
        r#"{"description": "Desk", "amount": 10}"#,
        r#"{not json"#,
    ];

    for case in cases {
        let (status, body) = create(&app, case).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body: {}", case);
        assert_eq!(body["status"], 400);
        assert_eq!(body["message"], "error");
        assert!(body["data"]["data"].is_string(), "body: {}", case);
    }

    // Nothing was stored
    let (_, body) = send(&app, Method::GET, "/purchase", None).await;
    assert_eq!(body["data"]["data"], json!([]));
}

#[tokio::test]
async fn test_list_purchases() {
    let (feed, _) = spawn_feed(json!([])).await;
    let app = create_test_app(&feed).await;

    let (status, body) = send(&app, Method::GET, "/purchase", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], 200);
    assert_eq!(body["message"], "success");
    assert_eq!(body["data"]["data"], json!([]));

    for i in 0..3 {
        let req = format!(
            r#"{{"description": "Item {}", "date": "2024-03-15", "amount": 5}}"#,
            i
        );
        let (status, _) = create(&app, &req).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (_, body) = send(&app, Method::GET, "/purchase", None).await;
    assert_eq!(body["data"]["data"].as_array().map(Vec::len), Some(3));
}

#[tokio::test]
async fn test_convert_purchase() {
    let (feed, queries) = spawn_feed(json!([
        {"record_date": "2024-03-01", "currency": "Euro", "exchange_rate": "0.9123"}
    ]))
    .await;
    let app = create_test_app(&feed).await;

    let (_, created) = create(
        &app,
        r#"{"description": "Office chair", "date": "2024-03-15", "amount": 100}"#,
    )
    .await;
    let id = created["data"]["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/purchase/{}/currency/Euro", id),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], 200);
    assert_eq!(body["message"], "success");

    let converted = &body["data"]["data"];
    assert_eq!(converted["id"], id);
    assert_eq!(converted["description"], "Office chair");
    assert_eq!(converted["date"], "2024-03-15");
    assert_eq!(converted["amount"].as_f64(), Some(100.0));
    assert_eq!(converted["exchangeRate"].as_f64(), Some(0.91));
    assert_eq!(converted["convertedAmount"].as_f64(), Some(91.23));

    let queries = queries.lock().unwrap();
    assert_eq!(queries.len(), 1);
    assert_eq!(
        queries[0]["filter"],
        "record_date:gte:2023-09-15,record_date:lte:2024-03-15,currency:eq:Euro"
    );
    assert_eq!(queries[0]["sort"], "-record_date");
    assert_eq!(queries[0]["page[size]"], "1");
}

#[tokio::test]
async fn test_convert_without_rate_returns_500_message_only() {
    let (feed, _) = spawn_feed(json!([])).await;
    let app = create_test_app(&feed).await;

    let (_, created) = create(
        &app,
        r#"{"description": "Desk", "date": "2024-03-15", "amount": 10}"#,
    )
    .await;
    let id = created["data"]["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/purchase/{}/currency/Euro", id),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["status"], 500);
    assert_eq!(
        body["message"],
        "Purchase cannot be converted to the target currency: Euro"
    );
    assert!(body.get("data").is_none());
}

#[tokio::test]
async fn test_convert_unknown_purchase_returns_500() {
    let (feed, queries) = spawn_feed(json!([
        {"record_date": "2024-03-01", "currency": "Euro", "exchange_rate": "0.9"}
    ]))
    .await;
    let app = create_test_app(&feed).await;

    for id in ["3f0e8f4c-6a4b-4b7e-9a37-0d5b6c1f2a10", "not-an-id"] {
        let (status, body) = send(
            &app,
            Method::GET,
            &format!("/purchase/{}/currency/Euro", id),
            None,
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["status"], 500);
        assert_eq!(body["message"], "error");
    }

    assert!(queries.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_convert_feed_error_status_returns_500() {
    let (feed, queries) =
        spawn_feed_responding(StatusCode::SERVICE_UNAVAILABLE, json!({"error": "down"})).await;
    let app = create_test_app(&feed).await;
    let id = create_purchase_id(&app).await;

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/purchase/{}/currency/Euro", id),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["status"], 500);
    assert_eq!(body["message"], "error");
    assert!(body["data"]["data"].as_str().is_some_and(|d| d.contains("503")));
    assert_eq!(queries.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_convert_unparseable_rate_returns_500() {
    let (feed, _) = spawn_feed(json!([
        {"record_date": "2024-03-01", "currency": "Euro", "exchange_rate": "n/a"}
    ]))
    .await;
    let app = create_test_app(&feed).await;
    let id = create_purchase_id(&app).await;

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/purchase/{}/currency/Euro", id),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["status"], 500);
    assert_eq!(body["message"], "error");
    assert!(body["data"]["data"].as_str().is_some_and(|d| d.contains("n/a")));
}

#[tokio::test]
async fn test_convert_blank_currency_returns_500() {
    let (feed, queries) = spawn_feed(json!([
        {"record_date": "2024-03-01", "currency": "Euro", "exchange_rate": "0.9"}
    ]))
    .await;
    let app = create_test_app(&feed).await;
    let id = create_purchase_id(&app).await;

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/purchase/{}/currency/%20", id),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["status"], 500);
    assert!(
        body["message"]
            .as_str()
            .is_some_and(|m| m.starts_with("Purchase cannot be converted"))
    );
    assert!(queries.lock().unwrap().is_empty());
}
