//! Markdown views of each stage, with the field labels users see.
//!
//! Rendering never fails; empty fields show a placeholder.

use std::fmt::Write;

use crate::plan::{ConfigurationPlan, FinalPlan, UseCaseDraft};

const UNSPECIFIED: &str = "（未指定）";
const NOT_GIVEN: &str = "（未提示）";

fn or(s: &str, fallback: &'static str) -> String {
    if s.trim().is_empty() {
        fallback.to_string()
    } else {
        s.to_string()
    }
}

fn number(v: Option<f64>) -> String {
    v.map(|n| n.to_string()).unwrap_or_else(|| UNSPECIFIED.to_string())
}

fn bullets(out: &mut String, items: &[String]) {
    if items.is_empty() {
        let _ = writeln!(out, "- {}", NOT_GIVEN);
    }
    for item in items {
        let _ = writeln!(out, "- {}", item);
    }
}

/// Stage 1 view.
pub fn draft_markdown(draft: &UseCaseDraft) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "## 観測設計ドラフト（LLM案）\n");
    let _ = writeln!(out, "**ユースケース名：** {}\n", or(&draft.usecase_name, UNSPECIFIED));
    let _ = writeln!(out, "**観測目的：** {}\n", or(&draft.objective, UNSPECIFIED));
    if !draft.actions.is_empty() {
        let _ = writeln!(out, "観測で実施すること");
        bullets(&mut out, &draft.actions);
        out.push('\n');
    }
    let _ = writeln!(out, "### 観測要件\n");
    let bands = if draft.bands().is_empty() {
        UNSPECIFIED.to_string()
    } else {
        draft.bands().join("・")
    };
    let _ = writeln!(out, "**使う波長帯（観測バンド）**：{}\n", bands);
    let _ = writeln!(
        out,
        "**目標の解像度（地上分解能） [m]**：{}\n",
        number(draft.resolution_target_m())
    );
    let _ = writeln!(
        out,
        "**目標の更新間隔（観測頻度） [日]**：{}",
        number(draft.revisit_target_days())
    );
    out
}

/// Stage 2 view, including the recommendation table.
pub fn final_plan_markdown(plan: &FinalPlan) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "## 最終観測計画\n");
    let _ = writeln!(out, "**ユースケース名：** {}\n", or(&plan.usecase_name, UNSPECIFIED));
    let _ = writeln!(out, "**観測目的：** {}\n", or(&plan.observation_objective, UNSPECIFIED));
    let bands = if plan.observation_bands.is_empty() {
        UNSPECIFIED.to_string()
    } else {
        plan.observation_bands.join("・")
    };
    let _ = writeln!(out, "**観測バンド：** {}\n", bands);
    let _ = writeln!(out, "**目標解像度 [m]：** {}\n", plan.spatial_resolution_target_m);
    let _ = writeln!(out, "**目標更新間隔 [日]：** {}\n", plan.revisit_target_days);

    let _ = writeln!(out, "### 推奨衛星\n");
    if plan.recommended_satellites.is_empty() {
        let _ = writeln!(out, "- （候補なし）\n");
    } else {
        let _ = writeln!(out, "| ミッション | センサ | バンド | 解像度 [m] | 観測頻度 |");
        let _ = writeln!(out, "|---|---|---|---|---|");
        for s in &plan.recommended_satellites {
            let _ = writeln!(
                out,
                "| {} | {} | {} | {} | {} |",
                s.mission_name, s.instrument_name, s.spectral_band, s.spatial_resolution_m, s.revisit
            );
        }
        out.push('\n');
    }

    let _ = writeln!(out, "### 提案構成\n");
    bullets(&mut out, &plan.proposed_configuration);
    if !plan.supplemental_note.is_empty() {
        let _ = writeln!(out, "\n> {}", plan.supplemental_note);
    }
    out
}

/// Stage 3 view.
pub fn configuration_markdown(configuration: &ConfigurationPlan) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "## 構成方針（LLM案）\n");

    let _ = writeln!(out, "### センサ構成（Stack）\n");
    if configuration.stack.sensors.is_empty() {
        let _ = writeln!(out, "- （センサ構成が未提示です）");
    }
    for (i, s) in configuration.stack.sensors.iter().enumerate() {
        let _ = writeln!(
            out,
            "- **[{}] {}**｜バンド: {}｜GSD目標[m]: {}｜更新間隔目標[日]: {}  \n  用途: {}",
            i + 1,
            or(&s.sensor_type, "(type)"),
            or(&s.bands, "-"),
            s.gsd_target_m.map(|v| v.to_string()).unwrap_or_else(|| "-".into()),
            s.revisit_target_days
                .map(|v| v.to_string())
                .unwrap_or_else(|| "-".into()),
            or(&s.usage, "-"),
        );
    }

    let _ = writeln!(out, "\n#### 衛星候補\n");
    if configuration.stack.satellite_candidates.is_empty() {
        let _ = writeln!(out, "- （候補なし）");
    }
    for c in &configuration.stack.satellite_candidates {
        let _ = writeln!(out, "- **{}**：{}", or(&c.name, "(名称不明)"), c.why);
    }

    let complements = &configuration.stack.complements;
    let _ = writeln!(out, "\n#### 補完・取得戦略\n");
    let _ = writeln!(out, "- 雲対策: {}", or(&complements.cloud_mitigation, "（未記載）"));
    if !complements.alternative_layers.is_empty() {
        let _ = writeln!(out, "- 代替/補完レイヤー: {}", complements.alternative_layers.join(", "));
    }
    if !complements.data_sources.is_empty() {
        let _ = writeln!(out, "- データソース: {}", complements.data_sources.join(", "));
    }

    let processing = &configuration.processing;
    let _ = writeln!(out, "\n### データ処理・融合・QA\n");
    if !processing.preprocess.is_empty() {
        let _ = writeln!(out, "- 前処理: {}", processing.preprocess.join(" / "));
    }
    if !processing.features.is_empty() {
        let _ = writeln!(out, "- 特徴量: {}", processing.features.join(" / "));
    }
    if !processing.fusion.is_empty() {
        let _ = writeln!(out, "- 融合: {}", processing.fusion);
    }
    if !processing.qa.is_empty() {
        let _ = writeln!(out, "- QA: {}", processing.qa);
    }

    let _ = writeln!(out, "\n### 出力物（Deliverables）\n");
    bullets(&mut out, &configuration.deliverables);
    let _ = writeln!(out, "\n### リスク＆留意点\n");
    bullets(&mut out, &configuration.risks);
    let _ = writeln!(out, "\n### 次アクション\n");
    bullets(&mut out, &configuration.next_actions);
    if !configuration.assumptions.is_empty() {
        let _ = writeln!(out, "\n### 前提条件\n");
        bullets(&mut out, &configuration.assumptions);
    }
    out
}
