//! Fixed-width text wrapping for summaries.
//!
//! Each use site has its own [`WrapConfig`]; the configuration is passed
//! explicitly to [`wrap`].

use textwrap::{Options, WordSeparator, WordSplitter, WrapAlgorithm};

/// Width and indentation for one kind of wrapped text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WrapConfig {
    /// Total line width, indent included.
    pub width: usize,
    pub initial_indent: &'static str,
    pub subsequent_indent: &'static str,
    /// Split words longer than the line; when off they overflow instead.
    pub break_long_words: bool,
}

impl WrapConfig {
    /// Data cleaning notes, one bullet per note.
    pub const NOTES: WrapConfig = WrapConfig {
        width: 80,
        initial_indent: "   * ",
        subsequent_indent: "     ",
        break_long_words: false,
    };

    /// Row labels of checklist and multiple choice tables.
    pub const CHECKLIST_LABEL: WrapConfig = WrapConfig {
        width: 55,
        initial_indent: "  ",
        subsequent_indent: "           ",
        break_long_words: false,
    };

    /// Question wording under the summary header.
    pub const QUESTION: WrapConfig = WrapConfig {
        width: 78,
        initial_indent: "",
        subsequent_indent: "",
        break_long_words: false,
    };

    /// Row labels of ranked tables.
    pub const RANK_LABEL: WrapConfig = WrapConfig {
        width: 45,
        initial_indent: "  ",
        subsequent_indent: "           ",
        break_long_words: false,
    };

    fn options(&self) -> Options<'static> {
        Options::new(self.width)
            .initial_indent(self.initial_indent)
            .subsequent_indent(self.subsequent_indent)
            .break_words(self.break_long_words)
            .word_separator(WordSeparator::AsciiSpace)
            .word_splitter(WordSplitter::NoHyphenation)
            .wrap_algorithm(WrapAlgorithm::FirstFit)
    }
}

/// Wrap `text` into indented lines no wider than `config.width`.
///
/// Whitespace runs collapse to single spaces. Blank text produces no lines.
pub fn wrap(text: &str, config: &WrapConfig) -> Vec<String> {
    let normalized = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if normalized.is_empty() {
        return Vec::new();
    }
    textwrap::wrap(&normalized, config.options())
        .into_iter()
        .map(|line| line.into_owned())
        .collect()
}

/// Wrap `text` and join the lines with newlines.
pub fn fill(text: &str, config: &WrapConfig) -> String {
    wrap(text, config).join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEXT: &str = "How often do you use public transport to   get to work,\n \
        including buses, trams, light rail and commuter trains, during a typical week?";

    const ALL: [WrapConfig; 4] = [
        WrapConfig::NOTES,
        WrapConfig::CHECKLIST_LABEL,
        WrapConfig::QUESTION,
        WrapConfig::RANK_LABEL,
    ];

    fn strip_indents(lines: &[String], config: &WrapConfig) -> String {
        lines
            .iter()
            .enumerate()
            .map(|(i, line)| {
                let indent = if i == 0 {
                    config.initial_indent
                } else {
                    config.subsequent_indent
                };
                line.strip_prefix(indent).unwrap_or(line).to_string()
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn lines_fit_width() {
        for config in ALL {
            for line in wrap(TEXT, &config) {
                assert!(
                    line.chars().count() <= config.width,
                    "{line:?} wider than {}",
                    config.width
                );
            }
        }
    }

    #[test]
    fn lines_reconstruct_normalized_text() {
        let normalized = TEXT.split_whitespace().collect::<Vec<_>>().join(" ");
        for config in ALL {
            let lines = wrap(TEXT, &config);
            assert_eq!(strip_indents(&lines, &config), normalized);
        }
    }

    #[test]
    fn indents_applied() {
        let lines = wrap(TEXT, &WrapConfig::RANK_LABEL);
        assert!(lines.len() > 1);
        assert!(lines[0].starts_with("  ") && !lines[0].starts_with("   "));
        assert!(lines[1].starts_with("           "));

        let notes = wrap("Recoded two answers.", &WrapConfig::NOTES);
        assert_eq!(notes, vec!["   * Recoded two answers."]);
    }

    #[test]
    fn hyphenated_words_stay_whole() {
        let label = "Prefer a well-known long-established cross-platform solution overall";
        for config in ALL {
            let lines = wrap(label, &config);
            assert_eq!(strip_indents(&lines, &config), label);
        }
        let lines = wrap(label, &WrapConfig::RANK_LABEL);
        assert!(lines.len() > 1);
        assert!(lines.iter().all(|l| !l.ends_with('-')));
    }

    #[test]
    fn long_words_are_not_broken() {
        let word = "x".repeat(70);
        let lines = wrap(&word, &WrapConfig::RANK_LABEL);
        assert_eq!(lines, vec![format!("  {word}")]);
    }

    #[test]
    fn blank_text_has_no_lines() {
        assert!(wrap("", &WrapConfig::QUESTION).is_empty());
        assert!(wrap("   \n ", &WrapConfig::NOTES).is_empty());
    }

    #[test]
    fn fill_joins_lines() {
        let filled = fill(TEXT, &WrapConfig::QUESTION);
        assert_eq!(filled.lines().count(), wrap(TEXT, &WrapConfig::QUESTION).len());
    }
}
