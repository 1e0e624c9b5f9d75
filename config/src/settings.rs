//! Typed settings read from the environment after [`crate::load_and_apply`].

use std::path::PathBuf;

pub const ENV_API_KEY: &str = "GROQ_API_KEY";
pub const ENV_MODEL: &str = "GROQ_MODEL";
pub const ENV_BASE_URL: &str = "GROQ_BASE_URL";
pub const ENV_CATALOG: &str = "SKYPLAN_CATALOG";
pub const ENV_ADDR: &str = "SKYPLAN_ADDR";
pub const ENV_PROMPTS_DIR: &str = "PROMPTS_DIR";

pub const DEFAULT_MODEL: &str = "llama-3.1-8b-instant";
pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_ADDR: &str = "127.0.0.1:8080";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    /// `None` disables generation.
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    /// Catalog file; `None` uses the embedded sample.
    pub catalog_path: Option<PathBuf>,
    pub addr: String,
    pub prompts_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            catalog_path: None,
            addr: DEFAULT_ADDR.to_string(),
            prompts_dir: None,
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from any key lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();
        Self {
            api_key: get(ENV_API_KEY),
            model: get(ENV_MODEL).unwrap_or(defaults.model),
            base_url: get(ENV_BASE_URL).unwrap_or(defaults.base_url),
            catalog_path: get(ENV_CATALOG).map(PathBuf::from),
            addr: get(ENV_ADDR).unwrap_or(defaults.addr),
            prompts_dir: get(ENV_PROMPTS_DIR).map(PathBuf::from),
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}
