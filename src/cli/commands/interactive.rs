//! `cqk interactive` command - prompt for the CSV path, read the report from stdin

use console::style;
use dialoguer::{theme::ColorfulTheme, Input};
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::path::{Path, PathBuf};

use crate::cli::commands::utils::{execute, read_stdin};
use crate::cli::GlobalOpts;

#[derive(clap::Args, Debug)]
pub struct InteractiveArgs {
    /// CSV file to use instead of prompting for one
    #[arg(long = "file-path", visible_alias = "file_path", value_name = "CSV")]
    pub file_path: Option<PathBuf>,
}

pub fn run(args: InteractiveArgs, global: &GlobalOpts) -> Result<()> {
    let file_path = match args.file_path {
        Some(path) => {
            validate_csv_path(&path).map_err(|e| miette::miette!("{}", e))?;
            path
        }
        None => prompt_csv_path()?,
    };

    eprintln!(
        "{} Paste the compliance report, then press {} to finish:",
        style("→").blue(),
        style(if cfg!(windows) { "Ctrl-Z Enter" } else { "Ctrl-D" }).cyan()
    );
    let text = read_stdin()?;

    execute(&file_path, &text, global)
}

/// Ask until the user names a readable `.csv` file
fn prompt_csv_path() -> Result<PathBuf> {
    let theme = ColorfulTheme::default();
    let input: String = Input::with_theme(&theme)
        .with_prompt("Path to the CSV file")
        .validate_with(|input: &String| validate_csv_path(Path::new(input.trim())))
        .interact_text()
        .into_diagnostic()?;
    Ok(PathBuf::from(input.trim()))
}

/// A path is acceptable when it has a `.csv` extension and can be opened
pub fn validate_csv_path(path: &Path) -> std::result::Result<(), String> {
    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    if !is_csv {
        return Err(format!("{} is not a .csv file", path.display()));
    }
    if !path.is_file() {
        return Err(format!("File not found: {}", path.display()));
    }
    File::open(path)
        .map(|_| ())
        .map_err(|e| format!("Cannot read {}: {}", path.display(), e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_validate_csv_path() {
        let tmp = TempDir::new().unwrap();
        let csv = tmp.path().join("data.csv");
        let txt = tmp.path().join("data.txt");
        fs::write(&csv, "_id,account_id,req\n").unwrap();
        fs::write(&txt, "hello").unwrap();

        assert!(validate_csv_path(&csv).is_ok());
        assert!(validate_csv_path(&txt).unwrap_err().contains("not a .csv"));
        assert!(validate_csv_path(&tmp.path().join("missing.csv"))
            .unwrap_err()
            .contains("File not found"));
        assert!(validate_csv_path(tmp.path()).is_err());
    }
}
