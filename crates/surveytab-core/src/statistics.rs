//! Counting and rank statistics over response columns.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::model::Response;

/// Median of a set of values, averaging the middle pair for even counts.
///
/// Returns `None` for an empty set.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Number of cells holding the declined marker.
pub fn count_declined(values: &[Response]) -> usize {
    values.iter().filter(|v| v.is_declined()).count()
}

/// Number of cells holding a real answer.
pub fn count_answered(values: &[Response]) -> usize {
    values.iter().filter(|v| v.value().is_some()).count()
}

/// Occurrences of each recorded answer. Missing and declined cells are skipped.
pub fn value_counts(values: &[Response]) -> HashMap<&str, usize> {
    let mut counts = HashMap::new();
    for value in values.iter().filter_map(Response::value) {
        *counts.entry(value).or_insert(0) += 1;
    }
    counts
}

/// Order answers for display: numbers ascending first, then text ascending.
pub fn compare_answers(a: &str, b: &str) -> Ordering {
    match (a.parse::<f64>(), b.parse::<f64>()) {
        (Ok(x), Ok(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

/// Sorted unique answers present in a column.
pub fn sorted_unique(values: &[Response]) -> Vec<String> {
    let mut unique: Vec<&str> = value_counts(values).into_keys().collect();
    unique.sort_by(|a, b| compare_answers(a, b));
    unique.into_iter().map(str::to_string).collect()
}
