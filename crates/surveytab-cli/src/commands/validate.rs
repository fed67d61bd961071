//! The `surveytab validate` command.

use anyhow::Result;
use surveytab_core::parser::validate_survey;

use crate::SurveyArgs;

pub fn execute(survey_args: SurveyArgs) -> Result<()> {
    let config = survey_args.config()?;
    let survey = super::load(&config)?;

    println!(
        "Survey: {} dictionary entries, {} items, {} respondents",
        survey.dictionary.len(),
        survey.dictionary.index().len(),
        survey.dataset.row_count()
    );

    let warnings = validate_survey(&survey.dictionary, &survey.dataset);
    for w in &warnings {
        let prefix = w
            .column
            .as_ref()
            .map(|c| format!("  [{c}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("Survey valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
