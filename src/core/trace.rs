//! Debug tracing to stderr
//!
//! Trace output is gated by an explicit verbosity flag handed in at
//! construction, so library code never consults global state.

use console::style;
use std::fmt::Display;

/// Writes debug lines to stderr when verbose mode is on
#[derive(Debug, Clone, Copy, Default)]
pub struct Tracer {
    verbose: bool,
}

impl Tracer {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// A tracer that never prints
    pub fn silent() -> Self {
        Self::default()
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Print a single debug line
    pub fn trace(&self, message: impl Display) {
        if self.verbose {
            eprintln!("{} {}", style("[debug]").dim(), message);
        }
    }

    /// Print a labelled, pretty-printed value
    pub fn dump(&self, label: &str, value: &impl std::fmt::Debug) {
        if self.verbose {
            eprintln!("{} {}", style("[debug]").dim(), style(label).bold());
            eprintln!("{:#?}", value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silent_tracer_is_not_verbose() {
        assert!(!Tracer::silent().is_verbose());
        assert!(Tracer::silent().with_verbose(true).is_verbose());
        assert!(Tracer::new(true).is_verbose());
    }
}
