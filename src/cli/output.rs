//! Report rendering for stdout

use console::style;
use miette::{IntoDiagnostic, Result};
use std::io::{self, Write};

use crate::cli::helpers::{format_id_list, section_title};
use crate::cli::OutputFormat;
use crate::core::pipeline::Report;

/// Print a report to stdout in the requested format
pub fn print_report(report: &Report, format: OutputFormat) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Text => write_text(&mut out, report).into_diagnostic(),
        OutputFormat::Json => write_json(&mut out, report),
    }
}

/// Human-readable report: ids followed by the query for each issue
pub fn write_text(out: &mut impl Write, report: &Report) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", style("Results").bold())?;
    writeln!(out, " {}", style("-".repeat(22)).dim())?;
    writeln!(out)?;

    for (account, section) in report.sections() {
        writeln!(
            out,
            "{}",
            style(section_title(account, section.issue.as_str())).cyan()
        )?;
        writeln!(out, "{}", format_id_list(section.entry.identifiers()))?;
        writeln!(out)?;
        writeln!(out, "{}", style("Corresponding Query:").bold())?;
        writeln!(out, "{}", section.query)?;
        writeln!(out)?;
    }
    Ok(())
}

fn write_json(out: &mut impl Write, report: &Report) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, report).into_diagnostic()?;
    writeln!(out).into_diagnostic()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::issue::IssueKind;
    use crate::core::pipeline::IssueSection;
    use crate::core::result::ResultEntry;

    fn sample_report() -> Report {
        let mut report = Report::default();
        report.upsert(
            "City",
            IssueSection {
                issue: IssueKind::InvalidResume,
                entry: ResultEntry::Ids(vec!["A1".to_string(), "A2".to_string()]),
                query: "db.application.find({})".to_string(),
            },
        );
        report
    }

    #[test]
    fn test_text_layout() {
        let mut buf = Vec::new();
        write_text(&mut buf, &sample_report()).unwrap();
        let text = console::strip_ansi_codes(&String::from_utf8(buf).unwrap()).to_string();

        assert!(text.contains("Results"));
        assert!(text.contains("City - invalid_resume:\n'A1' , 'A2'\n"));
        assert!(text.contains("Corresponding Query:\ndb.application.find({})\n"));
    }

    #[test]
    fn test_json_layout() {
        let mut buf = Vec::new();
        write_json(&mut buf, &sample_report()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["accounts"][0]["account"], "City");
        assert_eq!(value["accounts"][0]["issues"][0]["ids"][1], "A2");
    }
}
