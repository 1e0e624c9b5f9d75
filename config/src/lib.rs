//! Configuration for SkyPlan.
//!
//! [`load_and_apply`] merges XDG `config.toml` and a project `.env` into the process
//! environment with priority **existing env > .env > XDG**; [`Settings::from_env`]
//! then reads the typed settings every binary needs.

mod env_file;
mod settings;
mod xdg;

use std::collections::HashSet;
use std::path::Path;

use thiserror::Error;

pub use settings::{
    Settings, DEFAULT_ADDR, DEFAULT_BASE_URL, DEFAULT_MODEL, ENV_ADDR, ENV_API_KEY,
    ENV_BASE_URL, ENV_CATALOG, ENV_MODEL, ENV_PROMPTS_DIR,
};
pub use xdg::config_path;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("xdg config path: {0}")]
    XdgPath(String),
    #[error("read xdg config: {0}")]
    XdgRead(std::io::Error),
    #[error("parse xdg toml: {0}")]
    XdgParse(#[from] toml::de::Error),
    #[error("read .env {path}: {message}")]
    Dotenv { path: String, message: String },
}

/// Sets every key found in `.env` or `$XDG_CONFIG_HOME/<app_name>/config.toml` `[env]`
/// that is not already in the environment.
///
/// * `app_name`: `"skyplan"` for `~/.config/skyplan/config.toml`.
/// * `dotenv_dir`: directory holding `.env`; `None` means the current directory.
pub fn load_and_apply(app_name: &str, dotenv_dir: Option<&Path>) -> Result<(), LoadError> {
    let from_xdg = xdg::load_env_map(app_name)?;
    let from_dotenv = env_file::load_env_map(dotenv_dir)?;

    let keys: HashSet<&String> = from_xdg.keys().chain(from_dotenv.keys()).collect();
    for key in keys {
        if std::env::var_os(key).is_some() {
            continue;
        }
        if let Some(v) = from_dotenv.get(key).or_else(|| from_xdg.get(key)) {
            std::env::set_var(key, v);
        }
    }
    Ok(())
}
