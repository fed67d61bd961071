//! surveytab configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::describe::{DescribeOptions, DEFAULT_UNRANKED_RANK};
use crate::model::LIST_DELIMITER;

/// Top-level surveytab configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveytabConfig {
    /// Data dictionary CSV.
    #[serde(default)]
    pub dictionary: Option<PathBuf>,
    /// Response dataset CSV.
    #[serde(default)]
    pub dataset: Option<PathBuf>,
    /// Delimiter inside `options` and `notes` cells.
    #[serde(default = "default_list_delimiter")]
    pub list_delimiter: String,
    #[serde(default = "default_true")]
    pub show_notes: bool,
    #[serde(default = "default_true")]
    pub show_table: bool,
    #[serde(default = "default_true")]
    pub rename_values: bool,
    /// Rank value meaning "not ranked".
    #[serde(default = "default_unranked_rank")]
    pub unranked_rank: f64,
    /// Output directory for codebook reports.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_list_delimiter() -> String {
    LIST_DELIMITER.to_string()
}
fn default_true() -> bool {
    true
}
fn default_unranked_rank() -> f64 {
    DEFAULT_UNRANKED_RANK
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("./surveytab-output")
}

impl Default for SurveytabConfig {
    fn default() -> Self {
        Self {
            dictionary: None,
            dataset: None,
            list_delimiter: default_list_delimiter(),
            show_notes: true,
            show_table: true,
            rename_values: true,
            unranked_rank: default_unranked_rank(),
            output_dir: default_output_dir(),
        }
    }
}

impl SurveytabConfig {
    /// Summary options derived from this configuration.
    pub fn describe_options(&self) -> DescribeOptions {
        DescribeOptions {
            show_notes: self.show_notes,
            show_table: self.show_table,
            rename_values: self.rename_values,
            unranked_rank: self.unranked_rank,
        }
    }

    /// The dictionary path, or an error naming how to provide one.
    pub fn dictionary_path(&self) -> Result<&Path> {
        self.dictionary.as_deref().context(
            "no data dictionary configured; pass --dictionary or set it in surveytab.toml",
        )
    }

    /// The dataset path, or an error naming how to provide one.
    pub fn dataset_path(&self) -> Result<&Path> {
        self.dataset
            .as_deref()
            .context("no dataset configured; pass --dataset or set it in surveytab.toml")
    }
}

/// Load config from an explicit path, or search the well-known paths.
///
/// Search order without a path:
/// 1. `surveytab.toml` in the current directory
/// 2. `~/.config/surveytab/config.toml`
///
/// Environment variable overrides: `SURVEYTAB_DICTIONARY`, `SURVEYTAB_DATASET`.
pub fn load_config_from(path: Option<&Path>) -> Result<SurveytabConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("surveytab.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = parse_config(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!("loaded config from {}", path.display());
            config
        }
        None => SurveytabConfig::default(),
    };

    if let Ok(dictionary) = std::env::var("SURVEYTAB_DICTIONARY") {
        config.dictionary = Some(PathBuf::from(dictionary));
    }
    if let Ok(dataset) = std::env::var("SURVEYTAB_DATASET") {
        config.dataset = Some(PathBuf::from(dataset));
    }

    Ok(config)
}

/// Parse configuration from TOML content.
pub fn parse_config(content: &str) -> Result<SurveytabConfig> {
    let config: SurveytabConfig = toml::from_str(content)?;
    anyhow::ensure!(
        !config.list_delimiter.is_empty(),
        "list_delimiter must not be empty"
    );
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("surveytab"))
}
