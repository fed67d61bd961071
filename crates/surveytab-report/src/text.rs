//! Plain text and markdown codebook writers.

use std::path::Path;

use anyhow::{Context, Result};

use crate::codebook::Codebook;

/// Every item summary, separated by a blank line.
pub fn render_text(codebook: &Codebook) -> String {
    let mut text = codebook
        .entries
        .iter()
        .map(|e| e.summary.as_str())
        .collect::<Vec<_>>()
        .join("\n\n");
    text.push('\n');

    if codebook.has_failures() {
        text.push_str("\nItems not described\n-------------------\n");
        for failure in &codebook.failures {
            text.push_str(&format!("   * {}: {}\n", failure.prefix, failure.error));
        }
    }
    text
}

/// Markdown codebook: one section per item with the summary preformatted.
pub fn render_markdown(codebook: &Codebook) -> String {
    let mut md = String::new();

    md.push_str("# Codebook\n\n");
    md.push_str(&format!(
        "**Generated:** {} | {} items | {} respondents\n\n",
        codebook.created_at.format("%Y-%m-%d %H:%M:%S UTC"),
        codebook.entries.len(),
        codebook.dataset_rows
    ));

    for entry in &codebook.entries {
        md.push_str(&format!(
            "## Item {}: {} ({})\n\n",
            entry.item, entry.prefix, entry.question_type
        ));
        md.push_str("```text\n");
        md.push_str(&entry.summary);
        md.push_str("\n```\n\n");
    }

    if codebook.has_failures() {
        md.push_str("## Items not described\n\n");
        md.push_str("| Item | Error |\n");
        md.push_str("|------|-------|\n");
        for failure in &codebook.failures {
            md.push_str(&format!("| {} | {} |\n", failure.prefix, failure.error));
        }
    }

    md
}

fn write_file(path: &Path, content: String) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)
        .with_context(|| format!("failed to write codebook to {}", path.display()))
}

/// Write the plain text codebook to a file.
pub fn write_text_report(codebook: &Codebook, path: &Path) -> Result<()> {
    write_file(path, render_text(codebook))
}

/// Write the markdown codebook to a file.
pub fn write_markdown_report(codebook: &Codebook, path: &Path) -> Result<()> {
    write_file(path, render_markdown(codebook))
}
