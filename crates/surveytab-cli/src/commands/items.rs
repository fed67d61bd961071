//! The `surveytab items` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use crate::SurveyArgs;

pub fn execute(survey_args: SurveyArgs) -> Result<()> {
    let config = survey_args.config()?;
    let survey = super::load(&config)?;
    let dictionary = &survey.dictionary;

    let mut table = Table::new();
    table.set_header(vec!["Item", "Prefix", "Type", "Columns"]);

    for item in dictionary.index().items() {
        let entry = item
            .option_columns()
            .first()
            .copied()
            .or_else(|| item.columns.first().map(String::as_str))
            .and_then(|c| dictionary.get(c));
        let (number, question_type) = entry
            .map(|e| (e.item_number().to_string(), e.question_type.to_string()))
            .unwrap_or_default();
        table.add_row(vec![
            Cell::new(number),
            Cell::new(&item.prefix),
            Cell::new(question_type),
            Cell::new(item.columns.len()),
        ]);
    }

    println!("{table}");
    println!(
        "{} items, {} respondents",
        dictionary.index().len(),
        survey.dataset.row_count()
    );
    Ok(())
}
