//! CSV loaders for the data dictionary and the response dataset.
//!
//! Also validates that the two tables describe each other.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::index::prefix_of;
use crate::model::{DataDictionary, DictionaryEntry, QuestionType, Response, ResponseDataset};

/// Intermediate CSV row for data dictionary files.
#[derive(Debug, Deserialize)]
struct CsvDictionaryRow {
    column: String,
    #[serde(default)]
    original: String,
    #[serde(default)]
    original_answer: Option<String>,
    question_type: String,
    #[serde(default)]
    options: Option<String>,
    #[serde(default)]
    notes: Option<String>,
    #[serde(default)]
    item: String,
    #[serde(default)]
    any_free_text: Option<String>,
}

/// Both input tables of a survey.
#[derive(Debug, Clone)]
pub struct Survey {
    pub dictionary: DataDictionary,
    pub dataset: ResponseDataset,
}

fn split_list(raw: Option<String>, delimiter: &str) -> Vec<String> {
    raw.map(|s| {
        s.split(delimiter)
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

fn parse_flag(raw: Option<&str>) -> bool {
    matches!(
        raw.map(|s| s.trim().to_lowercase()).as_deref(),
        Some("true" | "yes" | "y" | "1" | "1.0")
    )
}

fn non_blank(raw: Option<String>) -> Option<String> {
    raw.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

/// Parse a data dictionary CSV file.
pub fn parse_dictionary(path: &Path, delimiter: &str) -> Result<DataDictionary> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read data dictionary: {}", path.display()))?;

    parse_dictionary_str(&content, path, delimiter)
}

/// Parse data dictionary CSV content (useful for testing).
///
/// The first column holds the column identifier; its header may be
/// `column` or empty, as written by a dataframe index.
pub fn parse_dictionary_str(
    content: &str,
    source_path: &Path,
    delimiter: &str,
) -> Result<DataDictionary> {
    let mut reader = csv::Reader::from_reader(content.as_bytes());
    let mut headers = reader
        .headers()
        .with_context(|| format!("failed to read CSV header: {}", source_path.display()))?
        .clone();
    if headers.get(0).is_some_and(|h| h.trim().is_empty()) {
        headers = std::iter::once("column")
            .chain(headers.iter().skip(1))
            .collect();
        reader.set_headers(headers);
    }

    let mut entries = Vec::new();
    for (line, row) in reader.deserialize::<CsvDictionaryRow>().enumerate() {
        let row = row.with_context(|| {
            format!(
                "failed to parse dictionary row {} in {}",
                line + 1,
                source_path.display()
            )
        })?;
        let question_type: QuestionType = row
            .question_type
            .parse()
            .unwrap_or_else(|never| match never {});
        let options = split_list(row.options, delimiter);
        entries.push(DictionaryEntry {
            column: row.column.trim().to_string(),
            original: row.original,
            original_answer: non_blank(row.original_answer),
            question_type,
            question_label: row.question_type.trim().to_string(),
            options: (!options.is_empty()).then_some(options),
            notes: split_list(row.notes, delimiter),
            item: row.item.trim().to_string(),
            any_free_text: parse_flag(row.any_free_text.as_deref()),
        });
    }

    tracing::debug!(
        entries = entries.len(),
        "loaded data dictionary from {}",
        source_path.display()
    );
    Ok(DataDictionary::new(entries))
}

/// Parse a response dataset CSV file.
pub fn parse_dataset(path: &Path) -> Result<ResponseDataset> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read dataset: {}", path.display()))?;

    parse_dataset_str(&content, path)
}

/// Parse response dataset CSV content. Columns with an empty header are
/// row indexes and are skipped.
pub fn parse_dataset_str(content: &str, source_path: &Path) -> Result<ResponseDataset> {
    let mut reader = csv::Reader::from_reader(content.as_bytes());
    let headers = reader
        .headers()
        .with_context(|| format!("failed to read CSV header: {}", source_path.display()))?
        .clone();
    let kept: Vec<usize> = headers
        .iter()
        .enumerate()
        .filter(|(_, h)| !h.trim().is_empty())
        .map(|(i, _)| i)
        .collect();

    let mut columns: Vec<Vec<Response>> = vec![Vec::new(); kept.len()];
    for record in reader.records() {
        let record = record
            .with_context(|| format!("failed to parse dataset row in {}", source_path.display()))?;
        for (slot, &i) in kept.iter().enumerate() {
            columns[slot].push(Response::parse(record.get(i).unwrap_or_default()));
        }
    }

    let named = kept
        .iter()
        .map(|&i| headers[i].trim().to_string())
        .zip(columns);
    let dataset = ResponseDataset::from_columns(named)
        .with_context(|| format!("inconsistent columns in {}", source_path.display()))?;
    tracing::debug!(
        rows = dataset.row_count(),
        columns = kept.len(),
        "loaded dataset from {}",
        source_path.display()
    );
    Ok(dataset)
}

/// Load both tables of a survey.
pub fn load_survey(dictionary: &Path, dataset: &Path, delimiter: &str) -> Result<Survey> {
    Ok(Survey {
        dictionary: parse_dictionary(dictionary, delimiter)?,
        dataset: parse_dataset(dataset)?,
    })
}

/// A warning from survey validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The column concerned (if applicable).
    pub column: Option<String>,
    /// Warning message.
    pub message: String,
}

impl ValidationWarning {
    fn column(column: &str, message: impl Into<String>) -> Self {
        Self {
            column: Some(column.to_string()),
            message: message.into(),
        }
    }
}

/// Check that the dictionary and dataset describe each other.
pub fn validate_survey(
    dictionary: &DataDictionary,
    dataset: &ResponseDataset,
) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    for column in dataset.column_names() {
        if !dictionary.contains(column) {
            warnings.push(ValidationWarning::column(
                column,
                "column has no data dictionary entry",
            ));
        }
    }

    for column in dictionary.duplicate_columns() {
        warnings.push(ValidationWarning::column(
            column,
            "column has more than one data dictionary entry",
        ));
    }

    for entry in dictionary.entries() {
        let values = dataset.column(&entry.column);
        // Parent rows of checklist items carry only the question text.
        let is_parent = values.is_none()
            && dictionary
                .index()
                .resolve(&entry.column)
                .is_some_and(|item| item.columns.len() > 1 && prefix_of(&entry.column) == entry.column);
        if values.is_none() && !is_parent {
            warnings.push(ValidationWarning::column(
                &entry.column,
                "column is missing from the dataset",
            ));
        }

        match &entry.question_type {
            QuestionType::MultipleChoice if entry.options.is_none() => {
                warnings.push(ValidationWarning::column(
                    &entry.column,
                    "multiple choice item has no options list; answers will be sorted",
                ));
            }
            QuestionType::Checklist => {
                let bad = values
                    .unwrap_or_default()
                    .iter()
                    .filter(|v| v.value().is_some() && v.as_flag().is_none())
                    .count();
                if bad > 0 {
                    warnings.push(ValidationWarning::column(
                        &entry.column,
                        format!("{bad} checklist value(s) are not 0/1 flags"),
                    ));
                }
            }
            QuestionType::Other(label) => {
                warnings.push(ValidationWarning::column(
                    &entry.column,
                    format!("unrecognized question type '{label}'; no table will be built"),
                ));
            }
            _ => {}
        }
    }

    warnings
}
