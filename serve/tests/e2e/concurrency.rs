//! A second mutating action while a completion call is outstanding.

use std::time::Duration;

use serde_json::{json, Value};

use crate::common::{slow_planner, spawn_server};

const CALL_DELAY: Duration = Duration::from_millis(500);

#[tokio::test]
async fn second_submission_during_a_call_is_busy() {
    let base = spawn_server(slow_planner(CALL_DELAY)).await;
    let client = reqwest::Client::new();

    let first = tokio::spawn({
        let client = client.clone();
        let url = format!("{}/api/usecase/draft", base);
        async move { client.post(url).json(&json!({"text": "洪水"})).send().await }
    });
    tokio::time::sleep(Duration::from_millis(100)).await;

    let resp = client
        .post(format!("{}/api/usecase/draft", base))
        .json(&json!({"text": "もう一度"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 409);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["kind"], "busy");

    let resp = client
        .delete(format!("{}/api/usecase/draft", base))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 409);

    let first = first.await.unwrap().unwrap();
    assert_eq!(first.status().as_u16(), 200);
    let body: Value = first.json().await.unwrap();
    assert_eq!(body["draft"]["usecase_name"], "洪水 監視");
}

#[tokio::test]
async fn status_answers_while_a_call_holds_the_store() {
    let base = spawn_server(slow_planner(CALL_DELAY)).await;
    let client = reqwest::Client::new();

    let first = tokio::spawn({
        let client = client.clone();
        let url = format!("{}/api/usecase/draft", base);
        async move { client.post(url).json(&json!({"text": "洪水"})).send().await }
    });
    tokio::time::sleep(Duration::from_millis(100)).await;

    let resp = tokio::time::timeout(
        Duration::from_millis(250),
        client.get(format!("{}/api/status", base)).send(),
    )
    .await
    .expect("status must not wait for the completion call")
    .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["busy"], true);
    assert!(body["stages"].is_null());
    assert_eq!(body["model"], "slow-mock");

    first.await.unwrap().unwrap();
    let body: Value = client
        .get(format!("{}/api/status", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["busy"], false);
    assert_eq!(body["stages"], json!(["use_case_draft"]));
}
