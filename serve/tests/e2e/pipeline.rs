//! Full stage sequence over HTTP with a scripted completion service.

use std::sync::Arc;

use reqwest::header::CONTENT_DISPOSITION;
use serde_json::{json, Value};
use skyplan::MockLlm;

use crate::common::{planner, spawn_server, CONFIG_REPLY, DRAFT_REPLY};

#[tokio::test]
async fn draft_confirm_configure_download_and_clear() {
    let mock = Arc::new(MockLlm::with_replies(vec![
        DRAFT_REPLY.to_string(),
        CONFIG_REPLY.to_string(),
    ]));
    let base = spawn_server(planner(Some(mock.clone()))).await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{}/api/usecase/draft", base))
        .json(&json!({"text": "大雨時の浸水範囲を把握したい"}))
        .send()
        .await
        .unwrap();
    assert!(resp.status().is_success());
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["draft"]["usecase_name"], "洪水 監視");
    assert!(body["markdown"].as_str().unwrap().contains("観測要件"));

    let body: Value = client
        .post(format!("{}/api/usecase/confirm", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["plan"]["proposed_configuration"], json!(["Sentinel-1/C-SAR"]));

    let body: Value = client
        .post(format!("{}/api/configuration/draft", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["stage"], "configuration_draft");

    client
        .post(format!("{}/api/configuration/confirm", base))
        .send()
        .await
        .unwrap();
    let body: Value = client
        .get(format!("{}/api/configuration", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["stage"], "configuration_confirmed");
    assert_eq!(
        body["configuration"]["stack"]["satellite_candidates"][0]["name"],
        "Sentinel-1"
    );

    let resp = client
        .get(format!("{}/api/download/plan", base))
        .send()
        .await
        .unwrap();
    let disposition = resp.headers()[CONTENT_DISPOSITION].to_str().unwrap().to_string();
    assert!(disposition.contains("_final_plan.json"));
    let text = resp.text().await.unwrap();
    assert!(text.contains("\n  \"usecase_name\": \"洪水 監視\""));

    let resp = client
        .delete(format!("{}/api/configuration", base))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 204);
    let resp = client
        .get(format!("{}/api/configuration", base))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 404);
    let resp = client.get(format!("{}/api/plan", base)).send().await.unwrap();
    assert!(resp.status().is_success());
    assert_eq!(mock.call_count(), 2);
}

#[tokio::test]
async fn extraction_failure_returns_raw_and_keeps_previous_draft() {
    let mock = Arc::new(MockLlm::with_replies(vec![
        DRAFT_REPLY.to_string(),
        "申し訳ありませんが、回答できません。".to_string(),
    ]));
    let base = spawn_server(planner(Some(mock))).await;
    let client = reqwest::Client::new();
    let url = format!("{}/api/usecase/draft", base);

    client.post(&url).json(&json!({"text": "a"})).send().await.unwrap();
    let resp = client.post(&url).json(&json!({"text": "b"})).send().await.unwrap();
    assert_eq!(resp.status().as_u16(), 422);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["kind"], "extraction");
    assert_eq!(body["raw"], "申し訳ありませんが、回答できません。");

    let body: Value = client.get(&url).send().await.unwrap().json().await.unwrap();
    assert_eq!(body["draft"]["usecase_name"], "洪水 監視");
}
