//! Router-level tests: the externally visible contract, driven through
//! `tower::ServiceExt::oneshot` against the in-memory store.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use larder::{common_routes, model, resource_routes, AppState, MemoryStore};
use serde_json::{json, Value};
use tower::ServiceExt;

fn app() -> Router {
    let state = AppState::new(Arc::new(MemoryStore::new()), model());
    Router::new().merge(common_routes()).merge(resource_routes(state))
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn create_product(app: &Router, name: &str, store: &str, threshold: i64) -> String {
    let response = app
        .clone()
        .oneshot(post(
            "/products",
            json!({"productName": name, "store": store, "threshold": threshold}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn list_returns_bare_json_array() {
    let app = app();
    create_product(&app, "Corn syrup", "willies", 25).await;
    create_product(&app, "Peas Snow", "coop", 0).await;

    let response = app.clone().oneshot(get("/products")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn list_applies_filters_from_query_parameters() {
    let app = app();
    create_product(&app, "Corn syrup", "willies", 25).await;
    create_product(&app, "Peas Snow", "coop", 0).await;

    let response = app
        .clone()
        .oneshot(get("/products?store=willies"))
        .await
        .unwrap();
    let body = body_json(response).await;
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["productName"], json!("Corn syrup"));
}

#[tokio::test]
async fn non_numeric_filter_value_is_400() {
    let app = app();
    let response = app.clone().oneshot(get("/users?age=abc")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], json!("malformed_parameter"));
}

#[tokio::test]
async fn get_by_id_round_trips_a_created_document() {
    let app = app();
    let id = create_product(&app, "Corn syrup", "willies", 25).await;

    let response = app
        .clone()
        .oneshot(get(&format!("/products/{id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["productName"], json!("Corn syrup"));
    assert_eq!(body["id"], json!(id));
}

#[tokio::test]
async fn get_distinguishes_malformed_from_absent_ids() {
    let app = app();
    let response = app
        .clone()
        .oneshot(get("/products/not-a-uuid"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let absent = uuid::Uuid::new_v4();
    let response = app
        .clone()
        .oneshot(get(&format!("/products/{absent}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn create_reports_first_failing_rule_message() {
    let app = app();
    let response = app
        .clone()
        .oneshot(post(
            "/shoppinglist",
            json!({"productName": "", "store": "coop", "quantity": 5}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(
        body["error"]["message"],
        json!("ShoppingList must have a non-empty shoppingList name")
    );
}

#[tokio::test]
async fn delete_then_delete_again_is_404() {
    let app = app();
    let id = create_product(&app, "Corn syrup", "willies", 25).await;

    let response = app
        .clone()
        .oneshot(delete(&format!("/products/{id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(delete(&format!("/products/{id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_with_malformed_id_is_404_not_400() {
    let app = app();
    let response = app
        .clone()
        .oneshot(delete("/products/not-a-uuid"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unknown_resource_segment_is_404() {
    let app = app();
    let response = app.clone().oneshot(get("/orders")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn sorted_list_respects_sortby_and_sortorder() {
    let app = app();
    create_product(&app, "A", "willies", 5).await;
    create_product(&app, "B", "willies", 25).await;
    create_product(&app, "C", "willies", 12).await;

    let response = app
        .clone()
        .oneshot(get("/products?sortby=threshold&sortorder=desc"))
        .await
        .unwrap();
    let body = body_json(response).await;
    let thresholds: Vec<i64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["threshold"].as_i64().unwrap())
        .collect();
    assert_eq!(thresholds, vec![25, 12, 5]);
}

#[tokio::test]
async fn health_and_version_respond() {
    let app = app();
    let response = app.clone().oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.clone().oneshot(get("/version")).await.unwrap();
    let body = body_json(response).await;
    assert_eq!(body["name"], json!("larder"));
}
