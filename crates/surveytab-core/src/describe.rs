//! Item summaries: resolve a prefix, pick the summarizer for its question
//! type, and assemble the printable text.

use tracing::debug;

use crate::error::{Result, SummaryError};
use crate::index::prefix_of;
use crate::model::{DataDictionary, DictionaryEntry, QuestionType, ResponseDataset, LIST_DELIMITER};
use crate::summarize::{
    summarize_checks, summarize_free_text, summarize_multiple_choice, summarize_ranks, Summary,
};
use crate::wrap::{fill, wrap, WrapConfig};

/// Rank value meaning "not ranked"; excluded from rank statistics.
pub const DEFAULT_UNRANKED_RANK: f64 = 7.0;

/// Options controlling what an item summary contains.
#[derive(Debug, Clone, PartialEq)]
pub struct DescribeOptions {
    /// Append data cleaning notes when the item has any.
    pub show_notes: bool,
    /// Build the count table for recognized question types.
    pub show_table: bool,
    /// Label rows with the original answer text instead of column ids.
    pub rename_values: bool,
    pub unranked_rank: f64,
}

impl Default for DescribeOptions {
    fn default() -> Self {
        Self {
            show_notes: true,
            show_table: true,
            rename_values: true,
            unranked_rank: DEFAULT_UNRANKED_RANK,
        }
    }
}

/// Signature shared by all summarizers.
pub type Summarizer =
    fn(&str, &DataDictionary, &ResponseDataset, &DescribeOptions) -> Result<Summary>;

/// The summarizer for a question type, if it has one.
pub fn summarizer_for(question_type: &QuestionType) -> Option<Summarizer> {
    match question_type {
        QuestionType::MultipleChoice => Some(summarize_multiple_choice),
        QuestionType::Checklist => Some(summarize_checks),
        QuestionType::FreeText => Some(summarize_free_text),
        QuestionType::Ranked => Some(summarize_ranks),
        QuestionType::Other(_) => None,
    }
}

/// A fully described item.
#[derive(Debug, Clone, PartialEq)]
pub struct Description {
    pub prefix: String,
    /// Item number shown in the header.
    pub item: String,
    pub question_type: QuestionType,
    /// Present when a table was built.
    pub summary: Option<Summary>,
    /// The assembled printable text.
    pub text: String,
}

const SPACER_WIDTH: usize = 80;

/// Describe one item and return the printable summary.
///
/// `prefix` may also be a full column id such as `likes_[cats]`.
pub fn describe_column(
    prefix: &str,
    dictionary: &DataDictionary,
    dataset: &ResponseDataset,
    options: &DescribeOptions,
) -> Result<String> {
    describe_item(prefix, dictionary, dataset, options).map(|d| d.text)
}

/// Describe one item, keeping the aggregate alongside the text.
pub fn describe_item(
    prefix: &str,
    dictionary: &DataDictionary,
    dataset: &ResponseDataset,
    options: &DescribeOptions,
) -> Result<Description> {
    let not_found = || SummaryError::ItemNotFound(prefix.to_string());
    let item = dictionary.index().resolve(prefix).ok_or_else(not_found)?;

    let is_checklist = item
        .columns
        .iter()
        .filter_map(|c| dictionary.get(c))
        .any(|e| e.question_type == QuestionType::Checklist);
    let header_column = if is_checklist {
        item.option_columns().first().map(|c| c.to_string())
    } else {
        item.columns.first().cloned()
    }
    .ok_or_else(not_found)?;
    let entry = dictionary.get(&header_column).ok_or_else(not_found)?;
    let question_type = entry.question_type.clone();
    debug!(prefix = %item.prefix, header = %header_column, %question_type, "resolved item");

    let summary = match summarizer_for(&question_type) {
        Some(summarize) if options.show_table => {
            Some(summarize(&item.prefix, dictionary, dataset, options)?)
        }
        _ => None,
    };

    let notes: Vec<&str> = item
        .columns
        .iter()
        .filter_map(|c| dictionary.get(c))
        .flat_map(|e| e.notes.iter().map(String::as_str))
        .collect();
    let text = assemble(
        entry,
        summary.as_ref().map(|s| s.table.as_str()),
        (options.show_notes && !notes.is_empty()).then_some(notes.as_slice()),
    );

    Ok(Description {
        prefix: item.prefix.clone(),
        item: entry.item_number().to_string(),
        question_type,
        summary,
        text,
    })
}

fn assemble(entry: &DictionaryEntry, table: Option<&str>, notes: Option<&[&str]>) -> String {
    let spacer = "=".repeat(SPACER_WIDTH);
    let question = fill(&entry.original, &WrapConfig::QUESTION);

    let mut parts = vec![
        format!(
            "Item {}: {} ({})",
            entry.item_number(),
            prefix_of(&entry.column),
            entry.question_label
        ),
        spacer.clone(),
        format!("\n{question}\n"),
        spacer.clone(),
    ];
    if let Some(table) = table {
        parts.push(format!("\n{table}\n\n{spacer}"));
    }
    if let Some(notes) = notes {
        parts.push("Data cleaning notes\n-------------------".to_string());
        parts.push(format_notes(notes));
    }
    parts.join("\n")
}

/// One wrapped bullet per note; cells holding several notes are split first.
pub fn format_notes(notes: &[&str]) -> String {
    notes
        .iter()
        .flat_map(|note| note.split(LIST_DELIMITER))
        .flat_map(|note| wrap(note, &WrapConfig::NOTES))
        .collect::<Vec<_>>()
        .join("\n")
}
