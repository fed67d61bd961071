//! Codebook types with JSON persistence.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use surveytab_core::summarize::Aggregate;
use surveytab_core::{describe_item, DataDictionary, DescribeOptions, QuestionType, ResponseDataset};

/// Summaries of every item in a survey.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Codebook {
    /// When the codebook was generated.
    pub created_at: DateTime<Utc>,
    /// Number of respondents in the dataset.
    pub dataset_rows: usize,
    /// One entry per described item, in dictionary order.
    pub entries: Vec<CodebookEntry>,
    /// Items that could not be described.
    #[serde(default)]
    pub failures: Vec<ItemFailure>,
}

/// A described item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodebookEntry {
    pub prefix: String,
    pub item: String,
    pub question_type: QuestionType,
    /// Printable summary text.
    pub summary: String,
    /// Aggregated responses, when a table was built.
    #[serde(default)]
    pub aggregate: Option<Aggregate>,
}

/// An item that failed to summarize.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemFailure {
    pub prefix: String,
    pub error: String,
}

/// Describe every item of the dictionary.
///
/// A failing item is recorded in [`Codebook::failures`] and the remaining
/// items are still described.
pub fn build_codebook(
    dictionary: &DataDictionary,
    dataset: &ResponseDataset,
    options: &DescribeOptions,
) -> Codebook {
    let mut entries = Vec::new();
    let mut failures = Vec::new();

    for item in dictionary.index().items() {
        match describe_item(&item.prefix, dictionary, dataset, options) {
            Ok(description) => entries.push(CodebookEntry {
                prefix: description.prefix,
                item: description.item,
                question_type: description.question_type,
                summary: description.text,
                aggregate: description.summary.map(|s| s.aggregate),
            }),
            Err(e) => {
                tracing::warn!("skipping item {}: {}", item.prefix, e);
                failures.push(ItemFailure {
                    prefix: item.prefix.clone(),
                    error: e.to_string(),
                });
            }
        }
    }

    Codebook {
        created_at: Utc::now(),
        dataset_rows: dataset.row_count(),
        entries,
        failures,
    }
}

impl Codebook {
    /// Save the codebook as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize codebook")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write codebook to {}", path.display()))?;
        Ok(())
    }

    /// Load a codebook from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read codebook from {}", path.display()))?;
        let codebook: Codebook =
            serde_json::from_str(&content).context("failed to parse codebook JSON")?;
        Ok(codebook)
    }

    /// Look up an entry by prefix.
    pub fn entry(&self, prefix: &str) -> Option<&CodebookEntry> {
        self.entries.iter().find(|e| e.prefix == prefix)
    }

    /// Returns true if any item failed.
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}
