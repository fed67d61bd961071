//! Per-question-type summarizers.
//!
//! Each summarizer resolves the columns of one item, aggregates their
//! responses, and renders the matching table.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::describe::DescribeOptions;
use crate::error::{Result, SummaryError};
use crate::index::Item;
use crate::model::{DataDictionary, Response, ResponseDataset, DECLINED};
use crate::statistics::{count_answered, count_declined, median, sorted_unique, value_counts};
use crate::tables::{
    build_bool_table, build_free_text_block, build_radio_table, build_rank_table, BoolRow,
    CountRow, RankRow,
};

/// Aggregated responses for one item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Aggregate {
    Checklist { rows: Vec<BoolRow>, declined: usize },
    MultipleChoice { rows: Vec<CountRow>, declined: usize },
    FreeText { responded: usize },
    Ranked { rows: Vec<RankRow>, declined: usize },
}

/// Result of summarizing one item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Dataset columns the summary was computed from.
    pub columns: Vec<String>,
    pub aggregate: Aggregate,
    /// Rendered table (or privacy notice for free text).
    pub table: String,
}

fn resolve<'a>(prefix: &str, dictionary: &'a DataDictionary) -> Result<&'a Item> {
    dictionary
        .index()
        .resolve(prefix)
        .ok_or_else(|| SummaryError::ItemNotFound(prefix.to_string()))
}

fn column_values<'a>(dataset: &'a ResponseDataset, column: &str) -> Result<&'a [Response]> {
    dataset
        .column(column)
        .ok_or_else(|| SummaryError::MissingColumn(column.to_string()))
}

fn row_label(dictionary: &DataDictionary, column: &str, rename: bool) -> String {
    dictionary
        .get(column)
        .map_or(column, |entry| entry.answer_label(rename))
        .to_string()
}

/// Yes/No counts for every option of a checklist item.
pub fn summarize_checks(
    prefix: &str,
    dictionary: &DataDictionary,
    dataset: &ResponseDataset,
    options: &DescribeOptions,
) -> Result<Summary> {
    let item = resolve(prefix, dictionary)?;
    let columns = item.option_columns();
    if columns.is_empty() {
        return Err(SummaryError::ItemNotFound(prefix.to_string()));
    }

    let mut rows = Vec::with_capacity(columns.len());
    let mut declined = None;
    for column in &columns {
        let values = column_values(dataset, column)?;
        let (mut yes, mut no) = (0, 0);
        for value in values {
            match value.as_flag() {
                Some(true) => yes += 1,
                Some(false) => no += 1,
                None => {
                    if let Some(raw) = value.value() {
                        warn!(column = %column, value = %raw, "skipping non-flag checklist value");
                    }
                }
            }
        }
        declined.get_or_insert_with(|| count_declined(values));
        rows.push(BoolRow {
            label: row_label(dictionary, column, options.rename_values),
            yes,
            no,
        });
    }
    let declined = declined.unwrap_or(0);
    debug!(prefix = %item.prefix, options = rows.len(), declined, "summarized checklist");

    let table = build_bool_table(&rows, declined)?;
    Ok(Summary {
        columns: columns.iter().map(|c| c.to_string()).collect(),
        aggregate: Aggregate::Checklist { rows, declined },
        table,
    })
}

/// Answer counts for a multiple choice item, in option order.
pub fn summarize_multiple_choice(
    prefix: &str,
    dictionary: &DataDictionary,
    dataset: &ResponseDataset,
    _options: &DescribeOptions,
) -> Result<Summary> {
    let item = resolve(prefix, dictionary)?;
    let column = item
        .columns
        .first()
        .ok_or_else(|| SummaryError::ItemNotFound(prefix.to_string()))?;
    let values = column_values(dataset, column)?;

    let order = dictionary
        .get(column)
        .and_then(|entry| entry.options.clone())
        .unwrap_or_else(|| sorted_unique(values));
    let counts = value_counts(values);

    for (answer, count) in &counts {
        if !order.iter().any(|o| o == answer) {
            warn!(column = %column, answer = %answer, count, "answer not in options list");
        }
    }

    let rows: Vec<CountRow> = order
        .iter()
        .filter(|label| label.as_str() != DECLINED)
        .map(|label| CountRow {
            label: label.clone(),
            count: counts.get(label.as_str()).copied().unwrap_or(0),
        })
        .collect();
    let declined = count_declined(values);
    debug!(prefix = %item.prefix, answers = rows.len(), declined, "summarized multiple choice");

    let mut table_rows = rows.clone();
    if declined > 0 {
        table_rows.push(CountRow {
            label: DECLINED.to_string(),
            count: declined,
        });
    }
    let table = build_radio_table(&table_rows)?;

    Ok(Summary {
        columns: vec![column.clone()],
        aggregate: Aggregate::MultipleChoice { rows, declined },
        table,
    })
}

/// Number of respondents who answered a free text item; answers stay private.
pub fn summarize_free_text(
    prefix: &str,
    dictionary: &DataDictionary,
    dataset: &ResponseDataset,
    _options: &DescribeOptions,
) -> Result<Summary> {
    let item = resolve(prefix, dictionary)?;
    let column = item
        .columns
        .first()
        .ok_or_else(|| SummaryError::ItemNotFound(prefix.to_string()))?;
    let values = column_values(dataset, column)?;
    let responded = count_answered(values);
    debug!(prefix = %item.prefix, responded, "summarized free text");

    Ok(Summary {
        columns: vec![column.clone()],
        aggregate: Aggregate::FreeText { responded },
        table: build_free_text_block(responded),
    })
}

/// Count and median rank for every option of a ranked item.
pub fn summarize_ranks(
    prefix: &str,
    dictionary: &DataDictionary,
    dataset: &ResponseDataset,
    options: &DescribeOptions,
) -> Result<Summary> {
    let item = resolve(prefix, dictionary)?;
    let bracketed = item.option_columns();
    let columns: Vec<&str> = if bracketed.is_empty() {
        item.columns.iter().map(String::as_str).collect()
    } else {
        bracketed
    };
    let values = columns
        .iter()
        .map(|c| column_values(dataset, c))
        .collect::<Result<Vec<_>>>()?;

    // Respondents with no rank at all are dropped before computing statistics.
    let mut kept = Vec::new();
    let mut declined = 0;
    for row in 0..dataset.row_count() {
        let cells = values.iter().map(|column| &column[row]);
        if cells.clone().any(|cell| cell.value().is_some()) {
            kept.push(row);
        } else if cells.clone().any(Response::is_declined) {
            declined += 1;
        }
    }

    let mut rows = Vec::with_capacity(columns.len());
    for (column, cells) in columns.iter().zip(&values) {
        let mut ranks = Vec::new();
        for &row in &kept {
            let Some(raw) = cells[row].value() else {
                continue;
            };
            let rank = cells[row]
                .as_number()
                .ok_or_else(|| SummaryError::InvalidRank {
                    column: column.to_string(),
                    value: raw.to_string(),
                })?;
            if rank != options.unranked_rank {
                ranks.push(rank);
            }
        }
        rows.push(RankRow {
            label: row_label(dictionary, column, options.rename_values),
            count: ranks.len(),
            median: median(&ranks),
        });
    }
    debug!(prefix = %item.prefix, respondents = kept.len(), declined, "summarized ranks");

    let table = build_rank_table(&rows, declined)?;
    Ok(Summary {
        columns: columns.iter().map(|c| c.to_string()).collect(),
        aggregate: Aggregate::Ranked { rows, declined },
        table,
    })
}
