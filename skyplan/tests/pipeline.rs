//! End-to-end planning over the embedded catalog with a scripted completion service.


use std::sync::Arc;

use skyplan::{
    artifact, render, search_scored, Artifact, ArtifactKind, Catalog, LlmClient, MatchOptions,
    MockLlm, PlanError, PlanStore, Planner, Stage,
};

const DRAFT_REPLY: &str = r#"承知しました。以下が観測設計ドラフトです。
```json
{
  "usecase": "河川氾濫モニタリング",
  "goal": "豪雨時の浸水範囲を早期に把握する",
  "requirements": {
    "bands": "SAR・可視",
    "gsd_m": "10 m",
    "revisit_days": 2,
    "actions": ["浸水域の抽出", "被害道路の特定"]
  }
}
```
ご確認ください。"#;

const CONFIG_REPLY: &str = r#"```json
{
  "stack": {
    "sensors": [
      {"type": "sar", "bands": "C/X", "gsd_target_m": 5, "revisit_target_days": 1, "usage": "夜間・悪天候時の浸水検出"},
      {"type": "optical", "bands": "可視・近赤外", "gsd_target_m": "10", "revisit_target_days": "5", "usage": "晴天時の被害確認"}
    ],
    "satellite_candidates": [{"name": "ICEYE", "why": "高頻度"}],
    "complements": {"cloud_mitigation": "SAR優先", "alternative_layers": "DEM、河川水位", "data_sources": ["国土地理院"]}
  },
  "processing": {"preprocess": ["オルソ補正"], "features": ["後方散乱差分"], "fusion": "決定レベル融合", "qa": "現地写真と照合"},
  "deliverables": ["浸水範囲ポリゴン"],
  "risks": ["都市部の二重反射"],
  "next_actions": ["過去事例で検証"],
  "assumptions": []
}
```"#;

fn planner(mock: Arc<MockLlm>) -> Planner {
    let llm: Arc<dyn LlmClient> = mock;
    Planner::new(
        Some(llm),
        Arc::new(Catalog::embedded().unwrap()),
        skyplan::prompts::default_from_embedded().unwrap(),
    )
}

#[tokio::test]
async fn legacy_draft_flows_through_all_stages() {
    let mock = Arc::new(MockLlm::with_replies(vec![
        DRAFT_REPLY.to_string(),
        CONFIG_REPLY.to_string(),
    ]));
    let planner = planner(mock.clone());
    let mut store = PlanStore::new();

    let draft = planner
        .generate_draft(&mut store, "大雨で川があふれたときの浸水範囲を知りたい")
        .await
        .unwrap();
    assert_eq!(draft.usecase_name, "河川氾濫モニタリング");
    assert_eq!(draft.actions, vec!["浸水域の抽出", "被害道路の特定"]);
    assert_eq!(draft.bands(), ["SAR", "可視"]);
    assert_eq!(draft.resolution_target_m(), Some(10.0));

    let plan = planner.confirm_draft(&mut store).unwrap();
    assert!(plan.recommended_satellites.len() <= 5);
    assert!(plan.proposed_configuration.len() <= 3);
    for s in &plan.recommended_satellites {
        let band = s.spectral_band.to_lowercase();
        assert!(band.contains("sar") && band.contains("可視"));
    }

    let configuration = planner.generate_configuration(&mut store).await.unwrap();
    assert_eq!(configuration.stack.sensors.len(), 2);
    assert_eq!(configuration.stack.sensors[1].gsd_target_m, Some(10.0));
    assert_eq!(
        configuration.stack.complements.alternative_layers,
        vec!["DEM", "河川水位"]
    );
    planner.confirm_configuration(&mut store).unwrap();

    let (stage, shown) = store.configuration().unwrap();
    assert_eq!(stage, Stage::ConfigurationConfirmed);
    let md = render::configuration_markdown(shown);
    assert!(md.contains("**[1] sar**"));
    assert!(md.contains("- 雲対策: SAR優先"));

    let prompt = &mock.received()[1][1];
    assert!(prompt.content().contains("河川氾濫モニタリング"));
    assert!(prompt.content().contains("浸水域の抽出"));
}

#[tokio::test]
async fn unparseable_reply_exposes_raw_text_and_keeps_state() {
    let planner = planner(Arc::new(MockLlm::new("```json\n{\"usecase_name\": \"x\",}\n```")));
    let mut store = PlanStore::new();
    let err = planner.generate_draft(&mut store, "x").await.unwrap_err();
    match &err {
        PlanError::Extraction { raw, .. } => assert!(raw.contains("\"usecase_name\": \"x\",")),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(err.kind(), "extraction");
    assert!(store.get(Stage::UseCaseDraft).is_none());
}

#[test]
fn sar_search_on_embedded_catalog_is_sorted_and_filtered() {
    let catalog = Catalog::embedded().unwrap();
    let results = search_scored(&["SAR"], 10.0, 5.0, catalog.records(), &MatchOptions::default());
    assert!(!results.is_empty());
    assert!(results.len() <= 5);
    for r in &results {
        assert!(r.record.spectral_band.to_lowercase().contains("sar"));
    }
    for pair in results.windows(2) {
        assert!(pair[0].distance <= pair[1].distance);
    }
}

#[tokio::test]
async fn artifacts_are_named_after_the_use_case() {
    let planner = planner(Arc::new(MockLlm::new(DRAFT_REPLY)));
    let mut store = PlanStore::new();
    planner.generate_draft(&mut store, "flood").await.unwrap();
    let plan = planner.confirm_draft(&mut store).unwrap();

    let a = Artifact::new(ArtifactKind::Plan, &plan.usecase_name, &plan).unwrap();
    assert_eq!(a.filename, "河川氾濫モニタリング_final_plan.json");
    let back: serde_json::Value = serde_json::from_str(&a.body).unwrap();
    assert_eq!(back["usecase_name"], "河川氾濫モニタリング");
    assert_eq!(
        artifact::filename(ArtifactKind::Draft, &plan.usecase_name),
        "河川氾濫モニタリング_draft.json"
    );
}
