//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};

use crate::cli::commands::{
    completions::CompletionsArgs, interactive::InteractiveArgs, run::RunArgs,
};
use crate::core::config::{Config, Settings};

#[derive(Parser)]
#[command(name = "cqk")]
#[command(author, version, about = "Compliance Query Kit")]
#[command(long_about = "Samples flagged application records from a CSV export and generates MongoDB verification queries for the issues listed in a compliance report.")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Print debug traces (parsed input, skipped lines, missing accounts) to stderr
    #[arg(long, short = 'd', visible_alias = "verbose", short_alias = 'v', global = true)]
    pub debug: bool,

    /// Minimum issue percentage to sample (default: 10)
    #[arg(long, global = true, value_name = "PCT")]
    pub min_percentage: Option<f64>,

    /// Maximum identifiers sampled per issue (default: 5)
    #[arg(long, global = true, value_name = "N")]
    pub sample_size: Option<usize>,
}

impl GlobalOpts {
    /// Resolve settings: config file, then environment, then these flags
    pub fn settings(&self) -> Settings {
        let mut config = Config::load();
        config.merge(self.overrides());
        config.settings()
    }

    fn overrides(&self) -> Config {
        Config {
            debug: self.debug.then_some(true),
            min_percentage: self.min_percentage,
            sample_size: self.sample_size,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate queries from a CSV file and report text given as flags
    Run(RunArgs),

    /// Prompt for the CSV file, then read report text from stdin
    Interactive(InteractiveArgs),

    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable report
    #[default]
    Text,
    /// JSON document (for programming)
    Json,
}
