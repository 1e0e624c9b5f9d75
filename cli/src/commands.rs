//! One-shot subcommands. Each prints markdown, or JSON with `--json`.

use std::path::Path;

use serde_json::{json, Value};
use skyplan::{
    render, search_scored, Artifact, ArtifactKind, Catalog, PlanError, PlanStore, Planner,
    MISSING_CREDENTIAL_WARNING,
};

type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Prints `value` as one pretty JSON document.
fn print_json(value: &Value) -> CmdResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Reports a planning failure on stderr, with the raw model output when there is one.
pub fn report_plan_error(err: &PlanError) {
    eprintln!("skyplan: {}", err);
    if let PlanError::MissingCredential = err {
        eprintln!("{}", MISSING_CREDENTIAL_WARNING);
    }
    if let Some(raw) = err.raw_output() {
        eprintln!("--- raw model output (debug) ---");
        eprintln!("{}", raw);
        eprintln!("--- end ---");
    }
}

fn write_artifact(dir: &Path, artifact: &Artifact) -> Result<std::path::PathBuf, std::io::Error> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(&artifact.filename);
    std::fs::write(&path, format!("{}\n", artifact.body))?;
    Ok(path)
}

pub async fn draft(planner: &Planner, text: &str, out: Option<&Path>, as_json: bool) -> CmdResult {
    let mut store = PlanStore::new();
    let draft = planner.generate_draft(&mut store, text).await?;
    if let Some(dir) = out {
        let artifact = Artifact::new(ArtifactKind::Draft, &draft.usecase_name, &draft)?;
        let path = write_artifact(dir, &artifact)?;
        eprintln!("wrote {}", path.display());
    }
    if as_json {
        print_json(&json!({ "draft": draft }))
    } else {
        println!("{}", render::draft_markdown(&draft));
        Ok(())
    }
}

pub fn match_catalog(
    planner: &Planner,
    bands: &[String],
    resolution: f64,
    revisit: f64,
    as_json: bool,
) -> CmdResult {
    let results = search_scored(
        bands,
        resolution,
        revisit,
        planner.catalog().records(),
        planner.match_options(),
    );
    if as_json {
        return print_json(&json!({ "results": results }));
    }
    if results.is_empty() {
        println!("条件に合致する衛星はありません。");
        return Ok(());
    }
    for (i, c) in results.iter().enumerate() {
        println!(
            "{}. {}  band={}  res={} m  revisit={} 日  (distance {:.2})",
            i + 1,
            c.record.label(),
            c.record.spectral_band,
            c.resolution_m,
            c.revisit_days,
            c.distance
        );
    }
    Ok(())
}

/// Runs every stage in order and writes the three artifacts to `out_dir`.
pub async fn plan(planner: &Planner, text: &str, out_dir: &Path, as_json: bool) -> CmdResult {
    let mut store = PlanStore::new();
    let draft = planner.generate_draft(&mut store, text).await?;
    let plan = planner.confirm_draft(&mut store)?;
    planner.generate_configuration(&mut store).await?;
    let configuration = planner.confirm_configuration(&mut store)?;

    let name = plan.usecase_name.as_str();
    let artifacts = [
        Artifact::new(ArtifactKind::Draft, name, &draft)?,
        Artifact::new(ArtifactKind::Plan, name, &plan)?,
        Artifact::new(ArtifactKind::Configuration, name, &configuration)?,
    ];
    let mut written = Vec::new();
    for artifact in &artifacts {
        written.push(write_artifact(out_dir, artifact)?.display().to_string());
    }

    if as_json {
        print_json(&json!({
            "draft": draft,
            "plan": plan,
            "configuration": configuration,
            "files": written,
        }))
    } else {
        println!("{}", render::draft_markdown(&draft));
        println!("{}", render::final_plan_markdown(&plan));
        println!("{}", render::configuration_markdown(&configuration));
        for path in written {
            eprintln!("wrote {}", path);
        }
        Ok(())
    }
}

pub fn list_catalog(catalog: &Catalog, as_json: bool) -> CmdResult {
    if as_json {
        return print_json(&json!(catalog.records()));
    }
    for r in catalog.records() {
        println!(
            "{:<28} {:<24} res={:<14} revisit={}",
            r.label(),
            r.spectral_band,
            r.spatial_resolution_m,
            r.revisit
        );
    }
    Ok(())
}
