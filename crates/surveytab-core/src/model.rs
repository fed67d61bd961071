//! Core data model types for surveytab.
//!
//! These are the two input tables every summary works from: the data
//! dictionary describing each survey column, and the response dataset
//! holding one normalized cell per respondent and column.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::index::ItemIndex;

/// Marker value meaning the respondent declined to answer.
pub const DECLINED: &str = "chose not to respond";

/// Delimiter used inside `options` and `notes` dictionary cells.
pub const LIST_DELIMITER: &str = " @ ";

/// A single cell of the response dataset.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Response {
    /// No answer was recorded.
    Missing,
    /// The respondent chose not to respond.
    Declined,
    /// Any other recorded answer, kept as text.
    Value(String),
}

impl Response {
    /// Normalize a raw cell into a response.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed {
            "" | "nan" | "NaN" | "NA" | "None" => Response::Missing,
            DECLINED => Response::Declined,
            other => Response::Value(other.to_string()),
        }
    }

    /// The recorded answer, if there is one.
    pub fn value(&self) -> Option<&str> {
        match self {
            Response::Value(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_declined(&self) -> bool {
        matches!(self, Response::Declined)
    }

    /// Numeric reading of the answer, if it parses as one.
    pub fn as_number(&self) -> Option<f64> {
        self.value()?.parse::<f64>().ok().filter(|n| n.is_finite())
    }

    /// Canonical boolean reading of a checklist cell.
    ///
    /// Accepts the numeric and string encodings produced by spreadsheet
    /// exports: `0`/`1`, `0.0`/`1.0`, and `true`/`false` in any case.
    pub fn as_flag(&self) -> Option<bool> {
        let value = self.value()?;
        if value.eq_ignore_ascii_case("true") {
            return Some(true);
        }
        if value.eq_ignore_ascii_case("false") {
            return Some(false);
        }
        match value.parse::<f64>() {
            Ok(n) if n == 1.0 => Some(true),
            Ok(n) if n == 0.0 => Some(false),
            _ => None,
        }
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Response::Missing => Ok(()),
            Response::Declined => f.write_str(DECLINED),
            Response::Value(v) => f.write_str(v),
        }
    }
}

impl From<&str> for Response {
    fn from(raw: &str) -> Self {
        Response::parse(raw)
    }
}

impl From<i64> for Response {
    fn from(n: i64) -> Self {
        Response::Value(n.to_string())
    }
}

impl From<f64> for Response {
    fn from(n: f64) -> Self {
        if n.is_nan() {
            Response::Missing
        } else {
            Response::Value(n.to_string())
        }
    }
}

impl<T: Into<Response>> From<Option<T>> for Response {
    fn from(value: Option<T>) -> Self {
        value.map_or(Response::Missing, Into::into)
    }
}

/// Supported survey question types.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    MultipleChoice,
    /// Several yes/no sub-columns sharing a prefix. Also read from "checkbox".
    Checklist,
    FreeText,
    Ranked,
    /// A type with no summary table; the raw label is kept for display.
    Other(String),
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionType::MultipleChoice => write!(f, "multiple choice"),
            QuestionType::Checklist => write!(f, "checklist"),
            QuestionType::FreeText => write!(f, "free text"),
            QuestionType::Ranked => write!(f, "ranked"),
            QuestionType::Other(label) => write!(f, "{label}"),
        }
    }
}

impl FromStr for QuestionType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "multiple choice" => QuestionType::MultipleChoice,
            "checklist" | "checkbox" => QuestionType::Checklist,
            "free text" => QuestionType::FreeText,
            "ranked" => QuestionType::Ranked,
            _ => QuestionType::Other(s.trim().to_string()),
        })
    }
}

/// One row of the data dictionary.
#[derive(Debug, Clone, PartialEq)]
pub struct DictionaryEntry {
    /// Column identifier in the response dataset (e.g. `likes_[cats]`).
    pub column: String,
    /// Original question wording.
    pub original: String,
    /// Original wording of this column's answer option.
    pub original_answer: Option<String>,
    pub question_type: QuestionType,
    /// Question type as written in the dictionary, shown in the header.
    pub question_label: String,
    /// Ordered answer options for multiple choice questions.
    pub options: Option<Vec<String>>,
    /// Data cleaning notes.
    pub notes: Vec<String>,
    /// Item number as written in the survey instrument (e.g. `12.0`).
    pub item: String,
    /// Whether the question offered a free text "other" field.
    pub any_free_text: bool,
}

impl DictionaryEntry {
    /// Start an entry with the required fields; the rest default to empty.
    pub fn new(
        column: impl Into<String>,
        item: impl Into<String>,
        question_type: QuestionType,
        original: impl Into<String>,
    ) -> Self {
        Self {
            column: column.into(),
            original: original.into(),
            original_answer: None,
            question_label: question_type.to_string(),
            question_type,
            options: None,
            notes: Vec::new(),
            item: item.into(),
            any_free_text: false,
        }
    }

    pub fn with_answer(mut self, answer: impl Into<String>) -> Self {
        self.original_answer = Some(answer.into());
        self
    }

    /// Keep the dictionary's own spelling of the question type.
    pub fn with_question_label(mut self, label: impl Into<String>) -> Self {
        self.question_label = label.into();
        self
    }

    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = Some(options.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Item number without any decimal part (`12.0` → `12`).
    pub fn item_number(&self) -> &str {
        self.item.split('.').next().unwrap_or(&self.item)
    }

    /// Label used for this column's table row.
    ///
    /// Falls back to the column identifier when renaming is off or the
    /// dictionary carries no answer text.
    pub fn answer_label(&self, rename: bool) -> &str {
        match (&self.original_answer, rename) {
            (Some(answer), true) => answer,
            _ => &self.column,
        }
    }
}

/// The data dictionary: metadata for every survey column, plus the
/// prefix index built from it.
#[derive(Debug, Clone)]
pub struct DataDictionary {
    entries: Vec<DictionaryEntry>,
    by_column: HashMap<String, usize>,
    index: ItemIndex,
}

impl DataDictionary {
    /// Build a dictionary and its item index.
    ///
    /// When a column is listed more than once the first row wins; see
    /// [`DataDictionary::duplicate_columns`].
    pub fn new(entries: Vec<DictionaryEntry>) -> Self {
        let mut by_column = HashMap::new();
        for (i, entry) in entries.iter().enumerate() {
            by_column.entry(entry.column.clone()).or_insert(i);
        }
        let index = ItemIndex::build(entries.iter().map(|e| e.column.as_str()));
        Self {
            entries,
            by_column,
            index,
        }
    }

    pub fn entries(&self) -> &[DictionaryEntry] {
        &self.entries
    }

    pub fn get(&self, column: &str) -> Option<&DictionaryEntry> {
        self.by_column.get(column).map(|&i| &self.entries[i])
    }

    pub fn contains(&self, column: &str) -> bool {
        self.by_column.contains_key(column)
    }

    pub fn index(&self) -> &ItemIndex {
        &self.index
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Columns described by more than one dictionary row.
    pub fn duplicate_columns(&self) -> Vec<&str> {
        let mut seen = std::collections::HashSet::new();
        let mut dupes = Vec::new();
        for entry in &self.entries {
            if !seen.insert(entry.column.as_str()) && !dupes.contains(&entry.column.as_str()) {
                dupes.push(entry.column.as_str());
            }
        }
        dupes
    }
}

/// A single named column of responses.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: Vec<Response>,
}

/// The response dataset, stored column by column.
#[derive(Debug, Clone, Default)]
pub struct ResponseDataset {
    columns: Vec<Column>,
    by_name: HashMap<String, usize>,
    rows: usize,
}

/// Error building a dataset from columns of different lengths.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("column '{column}' has {found} rows, expected {expected}")]
pub struct RaggedColumn {
    pub column: String,
    pub expected: usize,
    pub found: usize,
}

impl ResponseDataset {
    /// Build a dataset from named columns; all columns must be the same length.
    pub fn from_columns<I, S, V>(columns: I) -> Result<Self, RaggedColumn>
    where
        I: IntoIterator<Item = (S, Vec<V>)>,
        S: Into<String>,
        V: Into<Response>,
    {
        let mut dataset = ResponseDataset::default();
        for (i, (name, values)) in columns.into_iter().enumerate() {
            let name = name.into();
            let values: Vec<Response> = values.into_iter().map(Into::into).collect();
            if i == 0 {
                dataset.rows = values.len();
            } else if values.len() != dataset.rows {
                return Err(RaggedColumn {
                    column: name,
                    expected: dataset.rows,
                    found: values.len(),
                });
            }
            dataset
                .by_name
                .entry(name.clone())
                .or_insert(dataset.columns.len());
            dataset.columns.push(Column { name, values });
        }
        Ok(dataset)
    }

    pub fn column(&self, name: &str) -> Option<&[Response]> {
        self.by_name
            .get(name)
            .map(|&i| self.columns[i].values.as_slice())
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Number of respondents.
    pub fn row_count(&self) -> usize {
        self.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_parse_normalizes_markers() {
        assert_eq!(Response::parse(""), Response::Missing);
        assert_eq!(Response::parse(" nan "), Response::Missing);
        assert_eq!(Response::parse("chose not to respond"), Response::Declined);
        assert_eq!(Response::parse(" Agree "), Response::Value("Agree".into()));
    }

    #[test]
    fn flag_accepts_numeric_and_string_codes() {
        for yes in ["1", "1.0", "True", "true"] {
            assert_eq!(Response::parse(yes).as_flag(), Some(true), "{yes}");
        }
        for no in ["0", "0.0", "False"] {
            assert_eq!(Response::parse(no).as_flag(), Some(false), "{no}");
        }
        assert_eq!(Response::from(1).as_flag(), Some(true));
        assert_eq!(Response::from(0.0).as_flag(), Some(false));
        assert_eq!(Response::parse("maybe").as_flag(), None);
        assert_eq!(Response::Declined.as_flag(), None);
    }

    #[test]
    fn question_type_display_and_parse() {
        assert_eq!(
            "multiple choice".parse::<QuestionType>().unwrap(),
            QuestionType::MultipleChoice
        );
        assert_eq!(
            "checkbox".parse::<QuestionType>().unwrap(),
            QuestionType::Checklist
        );
        assert_eq!(
            "Free Text".parse::<QuestionType>().unwrap(),
            QuestionType::FreeText
        );
        let other = "matrix".parse::<QuestionType>().unwrap();
        assert_eq!(other, QuestionType::Other("matrix".into()));
        assert_eq!(other.to_string(), "matrix");
        assert_eq!(QuestionType::Ranked.to_string(), "ranked");
    }

    #[test]
    fn item_number_drops_decimal() {
        let entry = DictionaryEntry::new("q1", "12.0", QuestionType::FreeText, "Why?");
        assert_eq!(entry.item_number(), "12");
        let entry = DictionaryEntry::new("q1", "7b", QuestionType::FreeText, "Why?");
        assert_eq!(entry.item_number(), "7b");
    }

    #[test]
    fn answer_label_falls_back_to_column() {
        let entry = DictionaryEntry::new("likes_[cats]", "1", QuestionType::Checklist, "Pets?")
            .with_answer("Cats");
        assert_eq!(entry.answer_label(true), "Cats");
        assert_eq!(entry.answer_label(false), "likes_[cats]");
        let bare = DictionaryEntry::new("likes_[dogs]", "1", QuestionType::Checklist, "Pets?");
        assert_eq!(bare.answer_label(true), "likes_[dogs]");
    }

    #[test]
    fn dictionary_reports_duplicates() {
        let dict = DataDictionary::new(vec![
            DictionaryEntry::new("q1", "1", QuestionType::FreeText, "First"),
            DictionaryEntry::new("q1", "1", QuestionType::FreeText, "Second"),
        ]);
        assert_eq!(dict.duplicate_columns(), vec!["q1"]);
        assert_eq!(dict.get("q1").unwrap().original, "First");
    }

    #[test]
    fn dataset_rejects_ragged_columns() {
        let err = ResponseDataset::from_columns(vec![
            ("a", vec![Response::from(1), Response::from(0)]),
            ("b", vec![Response::from(1)]),
        ])
        .unwrap_err();
        assert_eq!(err.column, "b");
        assert_eq!(err.expected, 2);
        assert_eq!(err.found, 1);
    }
}
