//! Status, catalog search and absent-stage responses.

use serde_json::Value;

use crate::common::{planner, spawn_server};

#[tokio::test]
async fn status_without_credential_shows_warning() {
    let base = spawn_server(planner(None)).await;
    let body: Value = reqwest::get(format!("{}/api/status", base))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["has_credential"], false);
    assert!(body["warning"].as_str().unwrap().contains("GROQ_API_KEY"));
    assert_eq!(body["catalog_size"], 2);
    assert_eq!(body["stages"], serde_json::json!([]));
    assert_eq!(body["busy"], false);
}

#[tokio::test]
async fn generation_without_credential_is_503() {
    let base = spawn_server(planner(None)).await;
    let resp = reqwest::Client::new()
        .post(format!("{}/api/usecase/draft", base))
        .json(&serde_json::json!({"text": "洪水"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 503);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["kind"], "missing_credential");
}

#[tokio::test]
async fn catalog_search_filters_by_band() {
    let base = spawn_server(planner(None)).await;
    let body: Value = reqwest::get(format!(
        "{}/api/catalog/search?bands=SAR&resolution=10&revisit=5",
        base
    ))
    .await
    .unwrap()
    .json()
    .await
    .unwrap();
    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["record"]["mission_name"], "Sentinel-1");
}

#[tokio::test]
async fn absent_stages_are_404_and_confirm_without_draft_is_409() {
    let base = spawn_server(planner(None)).await;
    let client = reqwest::Client::new();
    for path in ["/api/usecase/draft", "/api/plan", "/api/configuration", "/api/download/plan"] {
        let resp = client.get(format!("{}{}", base, path)).send().await.unwrap();
        assert_eq!(resp.status().as_u16(), 404, "{}", path);
    }
    let resp = client
        .post(format!("{}/api/usecase/confirm", base))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 409);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["kind"], "missing_prerequisite");

    let resp = client
        .get(format!("{}/api/download/other", base))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 400);
}

#[tokio::test]
async fn malformed_draft_body_is_json_bad_request() {
    let base = spawn_server(planner(None)).await;
    let resp = reqwest::Client::new()
        .post(format!("{}/api/usecase/draft", base))
        .header(reqwest::header::CONTENT_TYPE, "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 400);
    assert!(resp.headers()[reqwest::header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("application/json"));
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["kind"], "bad_request");
    assert!(body["error"].as_str().unwrap().contains("JSON"));
}

#[tokio::test]
async fn non_numeric_search_target_is_json_bad_request() {
    let base = spawn_server(planner(None)).await;
    let resp = reqwest::get(format!("{}/api/catalog/search?resolution=abc", base))
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["kind"], "bad_request");
}
