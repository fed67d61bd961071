//! surveytab-report: codebook generation.
//!
//! Describes every item of a survey and writes the result as plain text,
//! markdown, or JSON.

pub mod codebook;
pub mod text;

pub use codebook::{build_codebook, Codebook, CodebookEntry, ItemFailure};
