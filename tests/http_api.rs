//! Drives the JSON API through the router without binding a socket.

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use locapay::{
    api,
    config::{BillingConfig, Config, ServerConfig, StorageConfig},
    controller::AppState,
    repo::{seed_roster, MemoryRepository},
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".into(),
            port: 0,
            request_timeout_secs: 5,
            enable_cors: false,
        },
        billing: BillingConfig {
            currency: "FCFA".into(),
            default_bill_amount: 45000,
        },
        storage: StorageConfig {
            path: "unused.json".into(),
            seed_on_missing: true,
        },
    }
}

async fn app() -> (Router, Arc<MemoryRepository>) {
    let repo = Arc::new(MemoryRepository::new(seed_roster()));
    let cfg = test_config();
    let state = AppState::with_repository(cfg.clone(), repo.clone())
        .await
        .expect("state");
    (api::router(state, &cfg), repo)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(v) => builder
            .header("content-type", "application/json")
            .body(Body::from(v.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };
    (status, value)
}

#[tokio::test]
async fn test_healthz() {
    let (app, _) = app().await;
    let (status, _) = send(&app, "GET", "/api/v1/healthz", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_list_and_search() {
    let (app, _) = app().await;
    let (status, body) = send(&app, "GET", "/api/v1/tenants", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 5);

    let (_, body) = send(&app, "GET", "/api/v1/tenants?q=b-20", None).await;
    assert_eq!(body["total"], 2);
}

#[tokio::test]
async fn test_add_tenant_with_loose_numbers() {
    let (app, repo) = app().await;
    let form = json!({
        "name": "Kone",
        "first_name": "Awa",
        "room_label": "C-302",
        "rent": "120000",
        "initial_meter_reading": "75",
        "phone": "+228 90 00 11 22"
    });
    let (status, body) = send(&app, "POST", "/api/v1/tenants", Some(form)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["id"], 6);
    assert_eq!(body["meter_previous"], 75);
    assert_eq!(body["meter_current"], 75);
    assert_eq!(repo.save_count().await, 1);
}

#[tokio::test]
async fn test_add_tenant_rejections() {
    let (app, repo) = app().await;

    let dup = json!({"name": "X", "first_name": "Y", "room_label": "a-101", "rent": 1});
    let (status, body) = send(&app, "POST", "/api/v1/tenants", Some(dup)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "DuplicateRoom");

    let no_rent = json!({"name": "X", "first_name": "Y", "room_label": "Z-1", "rent": "abc"});
    let (status, body) = send(&app, "POST", "/api/v1/tenants", Some(no_rent)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "MissingRequiredField");

    let bad_phone = json!({"name": "X", "first_name": "Y", "room_label": "Z-1", "rent": 1, "phone": "12"});
    let (status, body) = send(&app, "POST", "/api/v1/tenants", Some(bad_phone)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "InvalidForm");

    assert_eq!(repo.save_count().await, 0);
}

#[tokio::test]
async fn test_meter_update_validation() {
    let (app, repo) = app().await;

    let (status, body) = send(
        &app,
        "PUT",
        "/api/v1/tenants/1/meter",
        Some(json!({"meter_previous": 300, "meter_current": "200"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "CurrentBelowPrevious");

    let (status, body) = send(
        &app,
        "PUT",
        "/api/v1/tenants/1/meter",
        Some(json!({"meter_previous": "-4", "meter_current": 10})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "NegativeValue");

    let (_, body) = send(&app, "GET", "/api/v1/tenants/1", None).await;
    assert_eq!(body["meter_previous"], 120);
    assert_eq!(body["meter_current"], 245);
    assert_eq!(repo.save_count().await, 0);

    let (status, body) = send(
        &app,
        "PUT",
        "/api/v1/tenants/1/meter",
        Some(json!({"meter_previous": 245, "meter_current": 300})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meter_current"], 300);
    assert_eq!(repo.save_count().await, 1);
}

#[tokio::test]
async fn test_edit_keeps_current_reading() {
    let (app, _) = app().await;
    let form = json!({
        "name": "Diallo",
        "first_name": "Mamadou",
        "room_label": "A-101",
        "rent": 160000,
        "initial_meter_reading": 200
    });
    let (status, body) = send(&app, "PUT", "/api/v1/tenants/1", Some(form)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["rent"], 160000);
    assert_eq!(body["meter_previous"], 200);
    assert_eq!(body["meter_current"], 245);
}

#[tokio::test]
async fn test_delete_tenant() {
    let (app, _) = app().await;
    let (status, _) = send(&app, "DELETE", "/api/v1/tenants/3", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, "DELETE", "/api/v1/tenants/3", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "TenantNotFound");

    let (_, body) = send(&app, "GET", "/api/v1/tenants", None).await;
    assert_eq!(body["total"], 4);
}

#[tokio::test]
async fn test_statement() {
    let (app, _) = app().await;
    let (status, body) = send(&app, "GET", "/api/v1/statement?bill_amount=76500", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totals"]["total_consumption_kwh"], 765);
    assert_eq!(body["totals"]["bill_amount"], 76500);
    // 125 / 765 * 76500
    assert_eq!(body["lines"][0]["electricity_share"], 12500);
    assert_eq!(body["lines"][0]["total_due"], 162500);

    let (_, body) = send(&app, "GET", "/api/v1/statement", None).await;
    assert_eq!(body["totals"]["bill_amount"], 45000);

    let (status, body) = send(&app, "GET", "/api/v1/statement?bill_amount=76500&format=text", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_str().unwrap().contains("C-301"));

    let (status, _) = send(&app, "GET", "/api/v1/statement?bill_amount=-10", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_meter_calculator() {
    let (app, _) = app().await;
    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/meter/consumption",
        Some(json!({"meter_previous": "120", "meter_current": "245"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["consumption_kwh"], 125);

    let (status, _) = send(
        &app,
        "POST",
        "/api/v1/meter/consumption",
        Some(json!({"meter_previous": 245, "meter_current": 120})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
