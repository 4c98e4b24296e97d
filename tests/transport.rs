//! HTTP transport against a live local server.
//!
//! Each test binds an axum router on a random port and talks to it through
//! `HttpTransport`, so header handling and status mapping run over real HTTP.

use std::time::Duration;

use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use smartshopr::transport::{HttpTransport, Method, Transport};
use smartshopr::ApiError;
use tokio::net::TcpListener;

const API_KEY: &str = "test-key-0123456789";

async fn serve(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}/functions/v1/ha-api")
}

fn authorized(headers: &HeaderMap) -> bool {
    headers.get("authorization").and_then(|v| v.to_str().ok()) == Some("Bearer test-key-0123456789")
}

fn app() -> Router {
    Router::new()
        .route(
            "/functions/v1/ha-api/lists",
            get(|headers: HeaderMap| async move {
                if !authorized(&headers) {
                    return (StatusCode::UNAUTHORIZED, Json(json!({"error": "bad key"})));
                }
                let content_type = headers
                    .get("content-type")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                (
                    StatusCode::OK,
                    Json(json!({"lists": [{"id": "l1", "name": "Groceries"}], "content_type": content_type})),
                )
            }),
        )
        .route(
            "/functions/v1/ha-api/lists/{id}/items",
            get(|| async { Json(json!({"items": []})) }).post(|Json(body): Json<Value>| async move {
                (StatusCode::CREATED, Json(json!({"item": {"id": "i1", "name": body["name"]}, "echo": body})))
            }),
        )
        .route(
            "/functions/v1/ha-api/items/{id}",
            axum::routing::patch(|Json(body): Json<Value>| async move { Json(json!({"item": null, "echo": body})) })
                .delete(|| async { Json(json!({"success": true})) }),
        )
        .route(
            "/functions/v1/ha-api/budgets",
            get(|| async { (StatusCode::FORBIDDEN, Json(json!({"error": "nope"}))) }),
        )
        .route(
            "/functions/v1/ha-api/expenses/month",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"error": "database unavailable"}))) }),
        )
        .route(
            "/functions/v1/ha-api/broken",
            get(|| async { (StatusCode::BAD_GATEWAY, "<html>upstream</html>") }),
        )
        .route("/functions/v1/ha-api/text", get(|| async { "not json" }))
        .route(
            "/functions/v1/ha-api/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_millis(500)).await;
                Json(json!({}))
            }),
        )
}

#[tokio::test]
async fn test_get_sends_bearer_and_content_type() {
    let base_url = serve(app()).await;
    let transport = HttpTransport::new(&base_url, API_KEY).unwrap();

    let value = transport.request(Method::GET, "lists", None).await.unwrap();
    assert_eq!(value["lists"][0]["id"], "l1");
    assert_eq!(value["content_type"], "application/json");
}

#[tokio::test]
async fn test_unauthorized_maps_to_auth_error() {
    let base_url = serve(app()).await;
    let transport = HttpTransport::new(&base_url, "wrong").unwrap();

    let err = transport.request(Method::GET, "lists", None).await.unwrap_err();
    assert_eq!(err, ApiError::Auth);
}

#[tokio::test]
async fn test_forbidden_maps_to_access_denied() {
    let base_url = serve(app()).await;
    let transport = HttpTransport::new(&base_url, API_KEY).unwrap();

    let err = transport.request(Method::GET, "budgets", None).await.unwrap_err();
    assert_eq!(err, ApiError::AccessDenied);
    assert!(!err.is_auth());
}

#[tokio::test]
async fn test_error_body_message_is_surfaced() {
    let base_url = serve(app()).await;
    let transport = HttpTransport::new(&base_url, API_KEY).unwrap();

    let err = transport.request(Method::GET, "expenses/month", None).await.unwrap_err();
    assert_eq!(err, ApiError::api("database unavailable"));

    let err = transport.request(Method::GET, "broken", None).await.unwrap_err();
    assert_eq!(err, ApiError::api("Unknown error"));

    let err = transport.request(Method::GET, "missing", None).await.unwrap_err();
    assert_eq!(err, ApiError::api("Unknown error"));
}

#[tokio::test]
async fn test_non_json_success_body_is_api_error() {
    let base_url = serve(app()).await;
    let transport = HttpTransport::new(&base_url, API_KEY).unwrap();

    let err = transport.request(Method::GET, "text", None).await.unwrap_err();
    assert!(matches!(err, ApiError::Api { ref message } if message.starts_with("Invalid response")));
}

#[tokio::test]
async fn test_post_patch_delete_round_trip() {
    let base_url = serve(app()).await;
    let transport = HttpTransport::new(&base_url, API_KEY).unwrap();

    let body = json!({"name": "Milk", "quantity_value": 2});
    let value = transport
        .request(Method::POST, "lists/l1/items", Some(body.clone()))
        .await
        .unwrap();
    assert_eq!(value["echo"], body);
    assert_eq!(value["item"]["name"], "Milk");

    let value = transport
        .request(Method::PATCH, "items/i1", Some(json!({"is_completed": true})))
        .await
        .unwrap();
    assert_eq!(value["echo"], json!({"is_completed": true}));

    let value = transport.request(Method::DELETE, "items/i1", None).await.unwrap();
    assert_eq!(value["success"], true);
}

#[tokio::test]
async fn test_unsupported_method_is_rejected_locally() {
    let transport = HttpTransport::new("http://127.0.0.1:9", API_KEY).unwrap();

    let err = transport.request(Method::PUT, "items/i1", None).await.unwrap_err();
    assert_eq!(err, ApiError::api("Unknown method: PUT"));
}

#[tokio::test]
async fn test_timeout_maps_to_api_error() {
    let base_url = serve(app()).await;
    let transport = HttpTransport::with_timeout(&base_url, API_KEY, Duration::from_millis(100)).unwrap();

    let err = transport.request(Method::GET, "slow", None).await.unwrap_err();
    assert_eq!(err, ApiError::api("Request timeout"));
}

#[tokio::test]
async fn test_connection_failure_maps_to_api_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let transport = HttpTransport::new(&format!("http://{addr}"), API_KEY).unwrap();

    let err = transport.request(Method::GET, "lists", None).await.unwrap_err();
    assert!(matches!(err, ApiError::Api { ref message } if message.starts_with("Connection error")));
}
