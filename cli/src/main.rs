//! SkyPlan command line.
//!
//! Subcommands: `serve` (HTTP API), `draft` (stage 1 only), `match` (catalog search
//! without the completion service), `plan` (all stages, writes artifacts), `catalog`.

mod commands;
mod log_format;
mod logging;
mod setup;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use skyplan::PlanError;

use setup::Overrides;

#[derive(Parser, Debug)]
#[command(name = "skyplan")]
#[command(about = "SkyPlan: from a use case to an observation plan and satellite configuration")]
struct Args {
    #[command(subcommand)]
    cmd: Command,

    /// Completion model (overrides GROQ_MODEL)
    #[arg(long, global = true, value_name = "MODEL")]
    model: Option<String>,

    /// Satellite catalog file, .json or .yaml (overrides SKYPLAN_CATALOG)
    #[arg(long, global = true, value_name = "PATH")]
    catalog: Option<PathBuf>,

    /// Print JSON instead of markdown
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
    /// Run the HTTP API (default 127.0.0.1:8080 or SKYPLAN_ADDR)
    Serve {
        #[arg(long, value_name = "ADDR")]
        addr: Option<String>,
    },
    /// Draft observation requirements from a use-case description
    Draft {
        #[arg(required = true, trailing_var_arg = true)]
        text: Vec<String>,
        /// Also write `<name>_draft.json` into this directory
        #[arg(long, value_name = "DIR")]
        out: Option<PathBuf>,
    },
    /// Rank catalog satellites against targets
    Match {
        /// Required bands, comma separated (e.g. SAR or 可視,近赤外)
        #[arg(long, value_delimiter = ',', value_name = "BANDS")]
        bands: Vec<String>,
        /// Target resolution in metres
        #[arg(long, default_value_t = skyplan::plan::DEFAULT_RESOLUTION_M)]
        resolution: f64,
        /// Target revisit in days
        #[arg(long, default_value_t = skyplan::plan::DEFAULT_REVISIT_DAYS)]
        revisit: f64,
    },
    /// Run draft, confirmation and configuration in one go and write all artifacts
    Plan {
        #[arg(required = true, trailing_var_arg = true)]
        text: Vec<String>,
        #[arg(long, value_name = "DIR", default_value = ".")]
        out_dir: PathBuf,
    },
    /// List the loaded satellite catalog
    Catalog,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    config::load_and_apply("skyplan", None).ok();
    let args = Args::parse();

    let fallback = match args.cmd {
        Command::Serve { .. } => logging::Fallback::Stderr,
        _ => logging::Fallback::Drop,
    };
    logging::init(fallback)?;

    let overrides = Overrides {
        model: args.model.clone(),
        catalog: args.catalog.clone(),
    };
    let settings = setup::apply(config::Settings::from_env(), &overrides);
    let planner = setup::build_planner(&settings)?;

    let result = match args.cmd {
        Command::Serve { addr } => {
            let addr = addr.unwrap_or_else(|| settings.addr.clone());
            if let Err(e) = serve::run_serve(Some(addr.as_str()), planner).await {
                eprintln!("serve error: {}", e);
                std::process::exit(1);
            }
            Ok(())
        }
        Command::Draft { text, out } => {
            commands::draft(&planner, &text.join(" "), out.as_deref(), args.json).await
        }
        Command::Match {
            bands,
            resolution,
            revisit,
        } => commands::match_catalog(&planner, &bands, resolution, revisit, args.json),
        Command::Plan { text, out_dir } => {
            commands::plan(&planner, &text.join(" "), &out_dir, args.json).await
        }
        Command::Catalog => commands::list_catalog(planner.catalog(), args.json),
    };

    if let Err(e) = result {
        match e.downcast_ref::<PlanError>() {
            Some(plan_err) => commands::report_plan_error(plan_err),
            None => eprintln!("skyplan: {}", e),
        }
        std::process::exit(1);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn match_parses_comma_separated_bands() {
        let args = Args::try_parse_from([
            "skyplan", "match", "--bands", "SAR,可視", "--resolution", "10", "--revisit", "5",
        ])
        .unwrap();
        match args.cmd {
            Command::Match {
                bands,
                resolution,
                revisit,
            } => {
                assert_eq!(bands, vec!["SAR", "可視"]);
                assert_eq!(resolution, 10.0);
                assert_eq!(revisit, 5.0);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let args = Args::try_parse_from([
            "skyplan", "draft", "--json", "--model", "m1", "洪水の", "範囲",
        ])
        .unwrap();
        assert!(args.json);
        assert_eq!(args.model.as_deref(), Some("m1"));
        match args.cmd {
            Command::Draft { text, out } => {
                assert_eq!(text.join(" "), "洪水の 範囲");
                assert!(out.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn draft_requires_text() {
        assert!(Args::try_parse_from(["skyplan", "draft"]).is_err());
    }

    #[test]
    fn plan_defaults_out_dir_to_current() {
        let args = Args::try_parse_from(["skyplan", "plan", "x"]).unwrap();
        match args.cmd {
            Command::Plan { out_dir, .. } => assert_eq!(out_dir, PathBuf::from(".")),
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
