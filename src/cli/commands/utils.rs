//! Shared utilities for CLI commands

use console::style;
use miette::{IntoDiagnostic, Result};
use std::io::Read;
use std::path::Path;

use crate::cli::output::print_report;
use crate::cli::GlobalOpts;
use crate::core::pipeline::Pipeline;
use crate::core::trace::Tracer;

/// Read all of standard input
pub fn read_stdin() -> Result<String> {
    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .into_diagnostic()?;
    Ok(text)
}

/// Run the shared pipeline and print its report
pub fn execute(file_path: &Path, text: &str, global: &GlobalOpts) -> Result<()> {
    let settings = global.settings();
    let tracer = Tracer::new(settings.debug);
    tracer.dump("Settings:", &settings);

    let mut pipeline = Pipeline::new(settings).map_err(|e| report_error(&tracer, e))?;
    let report = pipeline
        .run(file_path, text)
        .map_err(|e| report_error(&tracer, e))?;

    if report.is_empty() {
        println!(
            "{}",
            style("No valid input data was processed. Please check your input format.").yellow()
        );
        return Ok(());
    }

    print_report(&report, global.format)
}

/// Convert a pipeline error into a diagnostic, tracing its cause chain first
fn report_error(tracer: &Tracer, err: impl std::error::Error + Send + Sync + 'static) -> miette::Report {
    if tracer.is_verbose() {
        let mut source = err.source();
        while let Some(cause) = source {
            tracer.trace(format_args!("caused by: {}", cause));
            source = cause.source();
        }
        tracer.dump("Error detail:", &err);
    }
    miette::miette!("An error occurred: {}", err)
}
