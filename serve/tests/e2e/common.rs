//! Shared helpers: spawn the server on a random port with a scripted completion service.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use skyplan::{
    Catalog, GenerationParams, LlmClient, LlmResponse, Message, MockLlm, PlanError, Planner,
    SatelliteRecord,
};
use tokio::net::TcpListener;

pub const DRAFT_REPLY: &str = r#"```json
{"usecase_name":"洪水 監視","objective":"浸水域の把握","actions":["浸水域抽出"],
 "requirements":{"bands":["SAR"],"spatial_resolution_m_target":10,"revisit_days_target":5}}
```"#;

pub const CONFIG_REPLY: &str = r#"{"stack":{"sensors":[{"type":"sar","bands":"C","gsd_target_m":10,"revisit_target_days":6,"usage":"浸水域"}],
"satellite_candidates":[{"name":"Sentinel-1","why":"全天候"}]},"deliverables":["浸水マップ"]}"#;

pub fn catalog() -> Catalog {
    Catalog::new(vec![
        SatelliteRecord {
            mission_name: "Sentinel-1".into(),
            instrument_name: "C-SAR".into(),
            spectral_band: "SAR (C-band)".into(),
            spatial_resolution_m: "5–20".into(),
            revisit: "6 日".into(),
            ..Default::default()
        },
        SatelliteRecord {
            mission_name: "Sentinel-2".into(),
            instrument_name: "MSI".into(),
            spectral_band: "可視・近赤外".into(),
            spatial_resolution_m: "10/20/60".into(),
            revisit: "5 日".into(),
            ..Default::default()
        },
    ])
}

pub fn planner(llm: Option<Arc<MockLlm>>) -> Planner {
    let llm = llm.map(|m| m as Arc<dyn LlmClient>);
    Planner::new(
        llm,
        Arc::new(catalog()),
        skyplan::prompts::default_from_embedded().unwrap(),
    )
}

/// Scripted replies that arrive only after `delay`, to hold the store during a call.
pub struct SlowLlm {
    inner: MockLlm,
    delay: Duration,
}

impl SlowLlm {
    pub fn new(reply: &str, delay: Duration) -> Self {
        Self {
            inner: MockLlm::new(reply),
            delay,
        }
    }
}

#[async_trait]
impl LlmClient for SlowLlm {
    fn model(&self) -> &str {
        "slow-mock"
    }

    async fn invoke(
        &self,
        messages: &[Message],
        params: &GenerationParams,
    ) -> Result<LlmResponse, PlanError> {
        tokio::time::sleep(self.delay).await;
        self.inner.invoke(messages, params).await
    }
}

pub fn slow_planner(delay: Duration) -> Planner {
    let llm: Arc<dyn LlmClient> = Arc::new(SlowLlm::new(DRAFT_REPLY, delay));
    Planner::new(
        Some(llm),
        Arc::new(catalog()),
        skyplan::prompts::default_from_embedded().unwrap(),
    )
}

/// Binds `127.0.0.1:0`, spawns the server, returns its base URL.
pub async fn spawn_server(planner: Planner) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(serve::run_serve_on_listener(listener, planner));
    format!("http://{}", addr)
}
