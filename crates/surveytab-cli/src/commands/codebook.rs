//! The `surveytab codebook` command.

use std::path::PathBuf;

use anyhow::Result;
use surveytab_report::build_codebook;
use surveytab_report::text::{write_markdown_report, write_text_report};

use crate::SurveyArgs;

pub fn execute(survey_args: SurveyArgs, output: Option<PathBuf>, format: String) -> Result<()> {
    let (text, markdown, json) = match format.as_str() {
        "text" => (true, false, false),
        "markdown" | "md" => (false, true, false),
        "json" => (false, false, true),
        "all" => (true, true, true),
        other => anyhow::bail!("unknown format '{other}'; expected text, markdown, json, or all"),
    };

    let config = survey_args.config()?;
    let survey = super::load(&config)?;
    let output_dir = output.unwrap_or_else(|| config.output_dir.clone());

    let codebook = build_codebook(
        &survey.dictionary,
        &survey.dataset,
        &config.describe_options(),
    );
    tracing::info!(
        "described {} items ({} failed)",
        codebook.entries.len(),
        codebook.failures.len()
    );

    if text {
        let path = output_dir.join("codebook.txt");
        write_text_report(&codebook, &path)?;
        println!("Text codebook: {}", path.display());
    }
    if markdown {
        let path = output_dir.join("codebook.md");
        write_markdown_report(&codebook, &path)?;
        println!("Markdown codebook: {}", path.display());
    }
    if json {
        let path = output_dir.join("codebook.json");
        codebook.save_json(&path)?;
        println!("JSON codebook: {}", path.display());
    }

    if codebook.has_failures() {
        println!("{} item(s) could not be described.", codebook.failures.len());
    }

    Ok(())
}
