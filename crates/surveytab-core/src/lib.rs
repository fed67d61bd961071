//! surveytab-core: survey item summaries.
//!
//! This crate defines the data dictionary and response dataset model, the
//! fixed-width table builders, and the per-question-type summarizers that
//! turn one survey item into a printable text summary.

pub mod config;
pub mod describe;
pub mod error;
pub mod index;
pub mod model;
pub mod parser;
pub mod statistics;
pub mod summarize;
pub mod tables;
pub mod wrap;

pub use describe::{describe_column, describe_item, DescribeOptions, Description};
pub use error::SummaryError;
pub use model::{DataDictionary, DictionaryEntry, QuestionType, Response, ResponseDataset};
