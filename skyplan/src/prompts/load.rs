//! Load prompt templates from a directory of YAML files and apply env overrides.
//!
//! **Canonical source**: default prompt text lives in `skyplan/prompts/*.yaml`; it is
//! embedded at compile time and used for any file missing from `PROMPTS_DIR`.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::{PromptSet, PromptTemplate};

macro_rules! embed_prompt_yaml {
    ($name:literal) => {
        include_str!(concat!("../../prompts/", $name))
    };
}
const EMBED_USECASE: &str = embed_prompt_yaml!("usecase.yaml");
const EMBED_CONFIGURATION: &str = embed_prompt_yaml!("configuration.yaml");

const USECASE_FILE: &str = "usecase.yaml";
const CONFIGURATION_FILE: &str = "configuration.yaml";

/// Default directory name when `PROMPTS_DIR` is not set.
const DEFAULT_PROMPTS_DIR: &str = "prompts";

/// Env overrides for the system prompts.
pub const USECASE_SYSTEM_PROMPT_ENV: &str = "SKYPLAN_USECASE_SYSTEM_PROMPT";
pub const CONFIGURATION_SYSTEM_PROMPT_ENV: &str = "SKYPLAN_CONFIGURATION_SYSTEM_PROMPT";

/// Error when loading prompts (missing dir, unreadable file, invalid YAML).
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("prompts directory not found or not readable: {0}")]
    DirNotFound(String),
    #[error("failed to read prompts file {path}: {message}")]
    ReadFile { path: String, message: String },
    #[error("failed to parse YAML in {path}: {message}")]
    ParseYaml { path: String, message: String },
}

/// One prompt file; absent keys keep the embedded text.
#[derive(Debug, Default, Deserialize)]
struct PromptFile {
    #[serde(default)]
    system_prompt: Option<String>,
    #[serde(default)]
    user_template: Option<String>,
}

fn prompts_dir(dir: Option<&Path>) -> PathBuf {
    dir.map(PathBuf::from).unwrap_or_else(|| {
        std::env::var("PROMPTS_DIR")
            .ok()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PROMPTS_DIR))
    })
}

fn parse_file(content: &str, path: &str) -> Result<PromptFile, LoadError> {
    serde_yaml::from_str(content).map_err(|e| LoadError::ParseYaml {
        path: path.to_string(),
        message: e.to_string(),
    })
}

fn read_yaml_file(dir: &Path, name: &str) -> Result<Option<PromptFile>, LoadError> {
    let path = dir.join(name);
    let content = match std::fs::read_to_string(&path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(LoadError::ReadFile {
                path: path.display().to_string(),
                message: e.to_string(),
            })
        }
    };
    parse_file(&content, &path.display().to_string()).map(Some)
}

fn merge(base: PromptFile, over: Option<PromptFile>) -> PromptTemplate {
    let over = over.unwrap_or_default();
    PromptTemplate {
        system: over.system_prompt.or(base.system_prompt).unwrap_or_default(),
        user: over.user_template.or(base.user_template).unwrap_or_default(),
    }
}

fn apply_env(mut set: PromptSet) -> PromptSet {
    if let Ok(s) = std::env::var(USECASE_SYSTEM_PROMPT_ENV) {
        set.usecase.system = s;
    }
    if let Ok(s) = std::env::var(CONFIGURATION_SYSTEM_PROMPT_ENV) {
        set.configuration.system = s;
    }
    set
}

fn embedded_files() -> Result<(PromptFile, PromptFile), LoadError> {
    Ok((
        parse_file(EMBED_USECASE, "<embedded>/usecase.yaml")?,
        parse_file(EMBED_CONFIGURATION, "<embedded>/configuration.yaml")?,
    ))
}

/// Embedded templates only (no directory, no env overrides).
pub fn default_from_embedded() -> Result<PromptSet, LoadError> {
    let (usecase, configuration) = embedded_files()?;
    Ok(PromptSet {
        usecase: merge(usecase, None),
        configuration: merge(configuration, None),
    })
}

/// Loads prompts from `dir` (or `PROMPTS_DIR`, or `./prompts`), falling back to the
/// embedded text for missing files or keys, then applies env overrides.
///
/// Errors when the directory does not exist or a present file fails to parse.
pub fn load(dir: Option<&Path>) -> Result<PromptSet, LoadError> {
    let base = prompts_dir(dir);
    if !base.is_dir() {
        return Err(LoadError::DirNotFound(base.display().to_string()));
    }
    let (usecase, configuration) = embedded_files()?;
    let set = PromptSet {
        usecase: merge(usecase, read_yaml_file(&base, USECASE_FILE)?),
        configuration: merge(configuration, read_yaml_file(&base, CONFIGURATION_FILE)?),
    };
    tracing::debug!(dir = %base.display(), "prompts loaded");
    Ok(apply_env(set))
}

/// Like [`load`], but a missing directory means "embedded defaults" instead of an error.
pub fn load_or_default(dir: Option<&Path>) -> Result<PromptSet, LoadError> {
    match load(dir) {
        Err(LoadError::DirNotFound(_)) => default_from_embedded().map(apply_env),
        other => other,
    }
}
