use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::checksum::DEFAULT_CHUNK_SIZE;
use crate::validate::Schema;

/// Column lists override (optional `[schema]` section in config.toml).
/// Any list left out keeps the built-in football schema.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemaConfig {
    #[serde(default)]
    pub expected_columns: Option<Vec<String>>,
    #[serde(default)]
    pub integer_columns: Option<Vec<String>>,
    #[serde(default)]
    pub score_columns: Option<Vec<String>>,
}

/// Global configuration loaded from `~/.config/matchcheck/config.toml`.
///
/// Paths are relative to the project root passed on the command line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchcheckConfig {
    /// Directory whose files are covered by the checksum ledger.
    pub data_dir: PathBuf,
    /// Ledger file written by `checksums` and read by `checksums --check`.
    pub ledger_file: PathBuf,
    /// CSV dataset checked by `validate`.
    pub dataset_file: PathBuf,
    /// Read buffer size in bytes used while hashing.
    pub chunk_size: usize,
    /// How many mismatched paths to show when verification fails.
    pub mismatch_sample: usize,
    /// Optional column list overrides; if missing, the football schema is used.
    #[serde(default)]
    pub schema: Option<SchemaConfig>,
}

impl Default for MatchcheckConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            ledger_file: PathBuf::from("checksums.sha256"),
            dataset_file: PathBuf::from("data/football_matches_2024_2025.csv"),
            chunk_size: DEFAULT_CHUNK_SIZE,
            mismatch_sample: 5,
            schema: None,
        }
    }
}

impl MatchcheckConfig {
    /// Build the validator schema, applying any overrides on top of the default.
    pub fn schema(&self) -> Schema {
        let mut schema = Schema::default();
        if let Some(over) = &self.schema {
            if let Some(cols) = &over.expected_columns {
                schema.expected_columns = cols.clone();
            }
            if let Some(cols) = &over.integer_columns {
                schema.integer_columns = cols.clone();
            }
            if let Some(cols) = &over.score_columns {
                schema.score_columns = cols.clone();
            }
        }
        schema
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("matchcheck")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<MatchcheckConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = MatchcheckConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from_path(&path)
}

/// Load configuration from an explicit file. Missing file is an error.
pub fn load_from_path(path: &Path) -> Result<MatchcheckConfig> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read config: {}", path.display()))?;
    let cfg: MatchcheckConfig =
        toml::from_str(&data).with_context(|| format!("parse config: {}", path.display()))?;
    Ok(cfg)
}
