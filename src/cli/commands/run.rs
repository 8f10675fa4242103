//! `cqk run` command - generate queries from flag-supplied inputs

use miette::Result;
use std::path::PathBuf;

use crate::cli::commands::utils::{execute, read_stdin};
use crate::cli::GlobalOpts;

#[derive(clap::Args, Debug)]
pub struct RunArgs {
    /// Path to the flagged-applications CSV file
    #[arg(long = "file-path", visible_alias = "file_path", value_name = "CSV")]
    pub file_path: PathBuf,

    /// Compliance report text (reads stdin when omitted or "-")
    #[arg(long)]
    pub text: Option<String>,
}

pub fn run(args: RunArgs, global: &GlobalOpts) -> Result<()> {
    let text = match args.text {
        Some(text) if text != "-" => text,
        _ => read_stdin()?,
    };
    execute(&args.file_path, &text, global)
}
