//! Static satellite catalog: read-only reference records loaded once at startup.
//!
//! A sample catalog is embedded at compile time (`skyplan/data/satellites.yaml`);
//! deployments point `SKYPLAN_CATALOG` at their own `.json` or `.yaml` file.

use std::path::Path;

use serde::{Deserialize, Serialize};

const EMBEDDED_CATALOG: &str = include_str!("../data/satellites.yaml");

/// Error when loading a catalog file.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {message}")]
    Read { path: String, message: String },
    #[error("failed to parse catalog {path}: {message}")]
    Parse { path: String, message: String },
}

/// One sensor on one mission. Numeric fields are free text as published.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SatelliteRecord {
    pub mission_name: String,
    pub constellation: String,
    pub instrument_name: String,
    pub operator: String,
    pub sensor_type: String,
    pub spectral_band: String,
    /// e.g. `"0.31/1.24/3.7"`, `"5–40"`, `"約 3"`.
    pub spatial_resolution_m: String,
    /// e.g. `"6–12 日"`, `"< 1 日"`.
    pub revisit: String,
    pub coverage: String,
    pub data_access: String,
    pub official_url: String,
    pub notes: String,
}

impl SatelliteRecord {
    /// `"mission/instrument"`, or just the mission when no instrument is listed.
    pub fn label(&self) -> String {
        if self.instrument_name.is_empty() {
            self.mission_name.clone()
        } else {
            format!("{}/{}", self.mission_name, self.instrument_name)
        }
    }
}

/// Immutable list of catalog records.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    records: Vec<SatelliteRecord>,
}

impl Catalog {
    pub fn new(records: Vec<SatelliteRecord>) -> Self {
        Self { records }
    }

    /// The sample catalog bundled with the crate.
    pub fn embedded() -> Result<Self, CatalogError> {
        let records: Vec<SatelliteRecord> =
            serde_yaml::from_str(EMBEDDED_CATALOG).map_err(|e| CatalogError::Parse {
                path: "<embedded>".to_string(),
                message: e.to_string(),
            })?;
        Ok(Self::new(records))
    }

    /// Reads a catalog file: `.json` as a JSON array, anything else as YAML.
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let shown = path.display().to_string();
        let content = std::fs::read_to_string(path).map_err(|e| CatalogError::Read {
            path: shown.clone(),
            message: e.to_string(),
        })?;
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));
        let records: Vec<SatelliteRecord> = if is_json {
            serde_json::from_str(&content).map_err(|e| CatalogError::Parse {
                path: shown.clone(),
                message: e.to_string(),
            })?
        } else {
            serde_yaml::from_str(&content).map_err(|e| CatalogError::Parse {
                path: shown.clone(),
                message: e.to_string(),
            })?
        };
        tracing::info!(path = %shown, records = records.len(), "catalog loaded");
        Ok(Self::new(records))
    }

    /// Loads `path` when given, else the embedded sample.
    pub fn load(path: Option<&Path>) -> Result<Self, CatalogError> {
        match path {
            Some(p) => Self::from_path(p),
            None => Self::embedded(),
        }
    }

    pub fn records(&self) -> &[SatelliteRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
