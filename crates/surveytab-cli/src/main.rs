//! surveytab CLI: the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "surveytab",
    version,
    about = "Text summaries of survey responses from a data dictionary"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Input files shared by every command that reads a survey.
#[derive(Args, Debug, Clone)]
pub struct SurveyArgs {
    /// Data dictionary CSV
    #[arg(long)]
    dictionary: Option<PathBuf>,

    /// Response dataset CSV
    #[arg(long)]
    dataset: Option<PathBuf>,

    /// Config file path
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the summary of one survey item
    Describe {
        /// Item prefix (e.g. "likes") or full column id (e.g. "likes_[cats]")
        #[arg(long)]
        item: String,

        #[command(flatten)]
        survey: SurveyArgs,

        /// Leave out data cleaning notes
        #[arg(long)]
        no_notes: bool,

        /// Leave out the count table
        #[arg(long)]
        no_table: bool,

        /// Label rows with column ids instead of original answer text
        #[arg(long)]
        raw_labels: bool,
    },

    /// Write summaries of every item
    Codebook {
        #[command(flatten)]
        survey: SurveyArgs,

        /// Output directory
        #[arg(long)]
        output: Option<PathBuf>,

        /// Output format: text, markdown, json, all
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// List the items of the data dictionary
    Items {
        #[command(flatten)]
        survey: SurveyArgs,
    },

    /// Check that the data dictionary and dataset match
    Validate {
        #[command(flatten)]
        survey: SurveyArgs,
    },

    /// Create a starter config
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("surveytab=info")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Describe {
            item,
            survey,
            no_notes,
            no_table,
            raw_labels,
        } => commands::describe::execute(item, survey, no_notes, no_table, raw_labels),
        Commands::Codebook {
            survey,
            output,
            format,
        } => commands::codebook::execute(survey, output, format),
        Commands::Items { survey } => commands::items::execute(survey),
        Commands::Validate { survey } => commands::validate::execute(survey),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
