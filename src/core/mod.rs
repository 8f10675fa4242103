//! Core module - parsing, sampling and query generation

pub mod config;
pub mod index;
pub mod issue;
pub mod parser;
pub mod pipeline;
pub mod query;
pub mod result;
pub mod sampler;
pub mod trace;

pub use config::{Config, Settings};
pub use index::{AccountIssueIndex, IndexError, IssueRecord};
pub use issue::IssueKind;
pub use parser::{parse_report, ParsedItem, ReportParser};
pub use pipeline::{AccountSection, IssueSection, Pipeline, PipelineError, Report};
pub use query::{QueryError, QueryGenerator};
pub use result::ResultEntry;
pub use sampler::Sampler;
pub use trace::Tracer;
