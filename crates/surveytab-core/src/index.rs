//! Prefix index over data dictionary columns.
//!
//! Checklist and ranked questions are stored as several columns named
//! `prefix_[option]`. The index groups them once, in dictionary order, so
//! lookups never scan or partially match column names.

use std::collections::HashMap;

/// Marker separating a prefix from its bracketed option suffix.
const OPTION_MARKER: &str = "_[";

/// The prefix of a column identifier (`likes_[cats]` → `likes`).
pub fn prefix_of(column: &str) -> &str {
    match column.find(OPTION_MARKER) {
        Some(pos) => &column[..pos],
        None => column,
    }
}

/// Whether the column carries a bracketed option suffix.
pub fn is_option_column(column: &str) -> bool {
    column.contains(OPTION_MARKER)
}

/// A logical survey item: a prefix and the columns sharing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub prefix: String,
    pub columns: Vec<String>,
}

impl Item {
    /// Only the bracketed sub-columns, in dictionary order.
    pub fn option_columns(&self) -> Vec<&str> {
        self.columns
            .iter()
            .map(String::as_str)
            .filter(|c| is_option_column(c))
            .collect()
    }
}

/// Map from prefix to the ordered columns of that item.
#[derive(Debug, Clone, Default)]
pub struct ItemIndex {
    items: Vec<Item>,
    by_prefix: HashMap<String, usize>,
}

impl ItemIndex {
    /// Build the index from column identifiers in dictionary order.
    pub fn build<'a>(columns: impl IntoIterator<Item = &'a str>) -> Self {
        let mut index = ItemIndex::default();
        for column in columns {
            let prefix = prefix_of(column);
            let slot = match index.by_prefix.get(prefix) {
                Some(&slot) => slot,
                None => {
                    index.items.push(Item {
                        prefix: prefix.to_string(),
                        columns: Vec::new(),
                    });
                    index
                        .by_prefix
                        .insert(prefix.to_string(), index.items.len() - 1);
                    index.items.len() - 1
                }
            };
            let item = &mut index.items[slot];
            if !item.columns.iter().any(|c| c == column) {
                item.columns.push(column.to_string());
            }
        }
        index
    }

    /// Resolve a prefix, or a full column identifier, to its item.
    pub fn resolve(&self, key: &str) -> Option<&Item> {
        let key = key.trim();
        self.by_prefix
            .get(key)
            .or_else(|| self.by_prefix.get(prefix_of(key)))
            .map(|&i| &self.items[i])
    }

    /// All items in dictionary order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ItemIndex {
        ItemIndex::build([
            "age",
            "likes",
            "likes_[cats]",
            "likes_[dogs]",
            "likes_more",
            "rank_[tea]",
            "rank_[coffee]",
        ])
    }

    #[test]
    fn prefix_strips_option_suffix() {
        assert_eq!(prefix_of("likes_[cats]"), "likes");
        assert_eq!(prefix_of("age"), "age");
        assert!(is_option_column("rank_[tea]"));
        assert!(!is_option_column("likes_more"));
    }

    #[test]
    fn groups_columns_in_dictionary_order() {
        let index = sample();
        let prefixes: Vec<_> = index.items().iter().map(|i| i.prefix.as_str()).collect();
        assert_eq!(prefixes, vec!["age", "likes", "likes_more", "rank"]);
        let likes = index.resolve("likes").unwrap();
        assert_eq!(likes.columns, vec!["likes", "likes_[cats]", "likes_[dogs]"]);
        assert_eq!(likes.option_columns(), vec!["likes_[cats]", "likes_[dogs]"]);
    }

    #[test]
    fn resolve_is_exact_not_substring() {
        let index = sample();
        assert!(index.resolve("lik").is_none());
        assert_eq!(index.resolve("likes_more").unwrap().columns, vec!["likes_more"]);
    }

    #[test]
    fn resolve_accepts_full_column_id() {
        let index = sample();
        assert_eq!(index.resolve("rank_[coffee]").unwrap().prefix, "rank");
        assert!(index.resolve("missing_[x]").is_none());
    }
}
