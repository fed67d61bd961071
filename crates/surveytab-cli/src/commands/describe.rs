//! The `surveytab describe` command.

use anyhow::Result;
use surveytab_core::describe_column;

use crate::SurveyArgs;

pub fn execute(
    item: String,
    survey_args: SurveyArgs,
    no_notes: bool,
    no_table: bool,
    raw_labels: bool,
) -> Result<()> {
    let config = survey_args.config()?;
    let survey = super::load(&config)?;

    let mut options = config.describe_options();
    options.show_notes &= !no_notes;
    options.show_table &= !no_table;
    options.rename_values &= !raw_labels;

    match describe_column(&item, &survey.dictionary, &survey.dataset, &options) {
        Ok(text) => {
            println!("{text}");
            Ok(())
        }
        Err(e) if e.is_lookup() => {
            eprintln!("Hint: run `surveytab items` to list the known items.");
            Err(e.into())
        }
        Err(e) => Err(e.into()),
    }
}
