//! Fixed-width text tables for item summaries.
//!
//! Every table has the same shape: a rule, a header row, a rule, one block
//! per answer (label wrapped, numbers on the first line only), a closing
//! rule, and an optional footer counting declined responses. Lines after
//! the first are indented by [`TABLE_INDENT`].

use serde::{Deserialize, Serialize};

use crate::error::{Result, SummaryError};
use crate::model::DECLINED;
use crate::wrap::{wrap, WrapConfig};

/// Indent placed in front of every table line.
pub const TABLE_INDENT: &str = "     ";

/// Label column width for checklist and multiple choice tables.
pub const CHECK_SPACER: usize = 55;

/// Label column width for ranked tables.
pub const RANK_SPACER: usize = 45;

/// Rule width for ranked tables.
const RANK_RULE: usize = 75;

/// Yes/No tally for one checklist option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoolRow {
    pub label: String,
    pub yes: usize,
    pub no: usize,
}

/// Count for one multiple choice answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountRow {
    pub label: String,
    pub count: usize,
}

/// Rank statistics for one ranked option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankRow {
    pub label: String,
    /// Respondents who placed the option in their ranking.
    pub count: usize,
    pub median: Option<f64>,
}

fn rule(width: usize) -> String {
    "-".repeat(width)
}

/// Wrapped label lines; an empty label still yields one line for its numbers.
fn label_lines(label: &str, config: &WrapConfig) -> Vec<String> {
    let lines = wrap(label, config);
    if lines.is_empty() {
        vec![String::new()]
    } else {
        lines
    }
}

/// Render one answer block: numbers on the first wrapped line only.
fn row_block(
    label: &str,
    config: &WrapConfig,
    spacer: usize,
    separator: &str,
    numbers: &str,
) -> String {
    label_lines(label, config)
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let field = if i == 0 { numbers } else { "" };
            format!("{line:<spacer$}{separator}{field}")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// The footer line for `n` declined responses, or `None` when there are none.
pub fn footer_line(n: usize) -> Option<String> {
    if n == 0 {
        return None;
    }
    let participants = if n == 1 { "participant" } else { "participants" };
    Some(format!("{n:>3} {participants} chose not to respond"))
}

/// Footer from an explicit count, or from a counts table that may hold a
/// row for the declined marker.
pub fn declined_footer(table: Option<&[CountRow]>, count: Option<usize>) -> Result<Option<String>> {
    let n = match (count, table) {
        (Some(n), _) => n,
        (None, Some(rows)) => rows
            .iter()
            .find(|r| r.label == DECLINED)
            .map_or(0, |r| r.count),
        (None, None) => return Err(SummaryError::MissingTableOrCount),
    };
    Ok(footer_line(n))
}

/// Yes/No table for checklist items.
pub fn build_bool_table(rows: &[BoolRow], declined: usize) -> Result<String> {
    let footer = declined_footer(None, Some(declined))?;
    let width = CHECK_SPACER + 15;
    let mut table = vec![
        format!("{TABLE_INDENT}{}", rule(width)),
        format!("{:<CHECK_SPACER$}{}{}", "  Answer", "  Yes", "    No"),
        rule(width),
    ];
    for row in rows {
        let numbers = format!("  {:>3}   {:>3}   ", row.yes, row.no);
        table.push(row_block(
            &row.label,
            &WrapConfig::CHECKLIST_LABEL,
            CHECK_SPACER,
            "",
            &numbers,
        ));
    }
    table.push(rule(width));
    table.extend(footer);
    Ok(table.join(&format!("\n{TABLE_INDENT}")))
}

/// Count table for multiple choice items.
///
/// A row labelled with the declined marker is moved into the footer.
pub fn build_radio_table(counts: &[CountRow]) -> Result<String> {
    let footer = declined_footer(Some(counts), None)?;
    let width = CHECK_SPACER + 15;
    let mut table = vec![
        format!("{TABLE_INDENT}{}", rule(width)),
        format!("{:<CHECK_SPACER$}{}{}", "  Response", "    ", "Count"),
        rule(width),
    ];
    for row in counts.iter().filter(|r| r.label != DECLINED) {
        let numbers = format!(" {:>3} ", row.count);
        table.push(row_block(
            &row.label,
            &WrapConfig::CHECKLIST_LABEL,
            CHECK_SPACER,
            "    ",
            &numbers,
        ));
    }
    table.push(rule(width));
    table.extend(footer);
    Ok(table.join(&format!("\n{TABLE_INDENT}")))
}

fn format_median(median: Option<f64>) -> String {
    match median {
        Some(m) => format!("{m:>3.0}"),
        None => format!("{:>3}", "-"),
    }
}

/// Count and median rank table for ranked items.
pub fn build_rank_table(rows: &[RankRow], declined: usize) -> Result<String> {
    let footer = declined_footer(None, Some(declined))?;
    let mut table = vec![
        format!("{TABLE_INDENT}{}", rule(RANK_RULE)),
        format!("{:<RANK_SPACER$}   In top 5   Median Rank", "   Answer"),
        rule(RANK_RULE),
    ];
    for row in rows {
        let numbers = format!(
            "     {:>3}          {}    ",
            row.count,
            format_median(row.median)
        );
        table.push(row_block(
            &row.label,
            &WrapConfig::RANK_LABEL,
            RANK_SPACER,
            "",
            &numbers,
        ));
    }
    table.push(rule(RANK_RULE));
    table.extend(footer);
    Ok(table.join(&format!("\n{TABLE_INDENT}")))
}

/// Privacy notice for free text items: only the number of respondents.
pub fn build_free_text_block(responded: usize) -> String {
    [
        format!(
            "{TABLE_INDENT}This is a free response question. Answers are not made public to protect"
        ),
        format!("{TABLE_INDENT}participant privacy."),
        format!("{TABLE_INDENT}{TABLE_INDENT}{}      ", rule(59)),
        format!("{TABLE_INDENT}{responded:>3} participants chose to respond to this question"),
    ]
    .join("\n")
}
