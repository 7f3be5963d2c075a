//! Request validation over HTTP. None of these requests may reach the
//! database, so the service runs over a pool that cannot connect.

mod common;

use reqwest::StatusCode;
use serde_json::{json, Value};

async fn get(base: &str, path: &str) -> (StatusCode, Value) {
    let resp = reqwest::get(format!("{}{}", base, path)).await.unwrap();
    let status = resp.status();
    (status, resp.json().await.unwrap_or(Value::Null))
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn search_without_filters_is_rejected() {
    let base = common::spawn_app(common::offline_service()).await;

    for path in [
        "/api/chair/search?page=0&perPage=10",
        "/api/estate/search?page=0&perPage=10",
        "/api/chair/search?priceRangeId=&features=&page=0&perPage=10",
    ] {
        let (status, body) = get(&base, path).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{path}");
        assert_eq!(body["success"], json!(false));
        assert_eq!(body["error"], json!("Search condition not found"));
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn unknown_range_ids_are_rejected() {
    let base = common::spawn_app(common::offline_service()).await;

    for path in [
        "/api/chair/search?priceRangeId=6&page=0&perPage=10",
        "/api/chair/search?priceRangeId=-1&page=0&perPage=10",
        "/api/chair/search?heightRangeId=abc&page=0&perPage=10",
        "/api/estate/search?rentRangeId=4&page=0&perPage=10",
    ] {
        let (status, _) = get(&base, path).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{path}");
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn malformed_pagination_is_rejected() {
    let base = common::spawn_app(common::offline_service()).await;

    for path in [
        "/api/chair/search?priceRangeId=1",
        "/api/chair/search?priceRangeId=1&page=0",
        "/api/chair/search?priceRangeId=1&page=-1&perPage=10",
        "/api/chair/search?priceRangeId=1&page=01&perPage=10",
        "/api/estate/search?rentRangeId=1&page=0&perPage=ten",
    ] {
        let (status, _) = get(&base, path).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{path}");
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn unknown_features_are_rejected() {
    let base = common::spawn_app(common::offline_service()).await;

    let (status, body) = get(
        &base,
        "/api/chair/search?features=%E8%82%98%E6%8E%9B%E3%81%91,jetpack&page=0&perPage=10",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("jetpack"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn nazotte_requires_a_polygon() {
    let base = common::spawn_app(common::offline_service()).await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{}/api/estate/nazotte", base))
        .json(&json!({"coordinates": [
            {"latitude": 35.0, "longitude": 139.0},
            {"latitude": 35.1, "longitude": 139.1}
        ]}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = client
        .post(format!("{}/api/estate/nazotte", base))
        .json(&json!({"points": []}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn malformed_ids_are_rejected() {
    let base = common::spawn_app(common::offline_service()).await;

    let (status, _) = get(&base, "/api/chair/abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = get(&base, "/api/recommended_estate/1.5").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn condition_documents_are_served_verbatim() {
    let base = common::spawn_app(common::offline_service()).await;

    let (status, body) = get(&base, "/api/chair/search/condition").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["price"]["ranges"].as_array().unwrap().len(), 6);
    assert_eq!(body["price"]["ranges"][5], json!({"id": 5, "min": 15000, "max": -1}));
    assert!(body["color"]["list"].as_array().unwrap().contains(&json!("黒")));

    let (status, body) = get(&base, "/api/estate/search/condition").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["rent"]["ranges"][0], json!({"id": 0, "min": -1, "max": 50000}));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn health_reports_an_unreachable_database() {
    let base = common::spawn_app(common::offline_service()).await;

    let (status, body) = get(&base, "/health").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["data"]["status"], json!("unhealthy"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn openapi_document_lists_every_route() {
    let base = common::spawn_app(common::offline_service()).await;

    let (status, body) = get(&base, "/api-docs/openapi.json").await;
    assert_eq!(status, StatusCode::OK);
    let paths = body["paths"].as_object().unwrap();
    for path in [
        "/api/chair/search",
        "/api/chair/buy/{id}",
        "/api/estate/nazotte",
        "/api/recommended_estate/{id}",
    ] {
        assert!(paths.contains_key(path), "{path}");
    }
}
