//! The `surveytab init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("surveytab.toml").exists() {
        println!("surveytab.toml already exists, skipping.");
    } else {
        std::fs::write("surveytab.toml", SAMPLE_CONFIG)?;
        println!("Created surveytab.toml");
    }

    println!("\nNext steps:");
    println!("  1. Point `dictionary` and `dataset` in surveytab.toml at your CSV files");
    println!("  2. Run: surveytab validate");
    println!("  3. Run: surveytab codebook --format all");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# surveytab configuration

dictionary = "data/dictionary.csv"
dataset = "data/responses.csv"

# Separator inside the `options` and `notes` cells of the dictionary
list_delimiter = " @ "

show_notes = true
show_table = true
rename_values = true

# Rank value meaning "not ranked"
unranked_rank = 7.0

output_dir = "./surveytab-output"
"#;
