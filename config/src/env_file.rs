//! Read a project `.env` into a map without touching the process environment.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::LoadError;

fn env_file_path(dir: Option<&Path>) -> Option<PathBuf> {
    let dir = dir
        .map(Path::to_path_buf)
        .or_else(|| std::env::current_dir().ok())?;
    let path = dir.join(".env");
    path.is_file().then_some(path)
}

/// Pairs from `<dir>/.env` (or `./.env`). A missing file is an empty map.
pub fn load_env_map(dir: Option<&Path>) -> Result<HashMap<String, String>, LoadError> {
    let Some(path) = env_file_path(dir) else {
        return Ok(HashMap::new());
    };
    let iter = dotenv::from_path_iter(&path).map_err(|e| LoadError::Dotenv {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    iter.map(|item| {
        item.map_err(|e| LoadError::Dotenv {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_env_map(Some(dir.path())).unwrap().is_empty());
    }

    #[test]
    fn reads_pairs_comments_and_quotes() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(".env"),
            "# groq\nGROQ_API_KEY=gsk_test\nGROQ_MODEL=\"llama-3.1-8b-instant\"\n\n",
        )
        .unwrap();
        let m = load_env_map(Some(dir.path())).unwrap();
        assert_eq!(m.get("GROQ_API_KEY").map(String::as_str), Some("gsk_test"));
        assert_eq!(m.get("GROQ_MODEL").map(String::as_str), Some("llama-3.1-8b-instant"));
        assert_eq!(m.len(), 2);
    }
}
