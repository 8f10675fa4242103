//! Load, parse, sample and template in one pass
//!
//! Every entry point funnels a (CSV path, report text) pair through
//! [`Pipeline::run`], whatever way it collected them.

use rand::Rng;
use serde::Serialize;
use std::path::Path;
use thiserror::Error;

use crate::core::config::Settings;
use crate::core::index::{AccountIssueIndex, IndexError};
use crate::core::issue::IssueKind;
use crate::core::parser::{ParsedItem, ReportParser};
use crate::core::query::{QueryError, QueryGenerator};
use crate::core::result::ResultEntry;
use crate::core::sampler::Sampler;
use crate::core::trace::Tracer;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Index(#[from] IndexError),

    #[error(transparent)]
    Query(#[from] QueryError),
}

/// Sampled identifiers and query for one issue
#[derive(Debug, Clone, Serialize)]
pub struct IssueSection {
    pub issue: IssueKind,
    #[serde(flatten)]
    pub entry: ResultEntry,
    pub query: String,
}

/// All issue sections for one account
#[derive(Debug, Clone, Serialize)]
pub struct AccountSection {
    pub account: String,
    pub issues: Vec<IssueSection>,
}

/// Accounts in the order they first appear in the report text
#[derive(Debug, Clone, Default, Serialize)]
pub struct Report {
    pub accounts: Vec<AccountSection>,
}

impl Report {
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Add a section, replacing an earlier one for the same account/issue
    pub fn upsert(&mut self, account: &str, section: IssueSection) {
        let position = self.accounts.iter().position(|a| a.account == account);
        let account_section = match position {
            Some(i) => &mut self.accounts[i],
            None => {
                self.accounts.push(AccountSection {
                    account: account.to_string(),
                    issues: Vec::new(),
                });
                let last = self.accounts.len() - 1;
                &mut self.accounts[last]
            }
        };

        match account_section
            .issues
            .iter_mut()
            .find(|s| s.issue == section.issue)
        {
            Some(existing) => *existing = section,
            None => account_section.issues.push(section),
        }
    }

    /// Iterate (account, section) pairs in report order
    pub fn sections(&self) -> impl Iterator<Item = (&str, &IssueSection)> {
        self.accounts
            .iter()
            .flat_map(|a| a.issues.iter().map(move |s| (a.account.as_str(), s)))
    }
}

/// Shared report-to-query flow
pub struct Pipeline<R: Rng = rand::rngs::ThreadRng> {
    settings: Settings,
    tracer: Tracer,
    sampler: Sampler<R>,
    generator: QueryGenerator,
}

impl Pipeline {
    /// Pipeline with an unseeded sampler
    pub fn new(settings: Settings) -> Result<Self, PipelineError> {
        Self::with_sampler(settings, Sampler::new())
    }
}

impl<R: Rng> Pipeline<R> {
    pub fn with_sampler(settings: Settings, sampler: Sampler<R>) -> Result<Self, PipelineError> {
        let tracer = Tracer::new(settings.debug);
        Ok(Self {
            settings,
            tracer,
            sampler: sampler.with_tracer(tracer),
            generator: QueryGenerator::new()?,
        })
    }

    /// Load the CSV at `file_path` and build a report for `text`
    pub fn run(&mut self, file_path: &Path, text: &str) -> Result<Report, PipelineError> {
        let index = AccountIssueIndex::load(file_path)?;
        self.tracer.trace(format_args!(
            "Loaded {} rows from {} ({} accounts, {} flagged entries)",
            index.rows_read(),
            file_path.display(),
            index.account_count(),
            index.len()
        ));
        self.run_with_index(&index, text)
    }

    /// Build a report for `text` against an already-loaded index
    pub fn run_with_index(
        &mut self,
        index: &AccountIssueIndex,
        text: &str,
    ) -> Result<Report, PipelineError> {
        let items = ReportParser::new(self.settings.min_percentage)
            .with_tracer(self.tracer)
            .parse(text);
        self.tracer.dump("Processed input:", &items);
        self.build(index, &items)
    }

    /// Sample and template every parsed item
    pub fn build(
        &mut self,
        index: &AccountIssueIndex,
        items: &[ParsedItem],
    ) -> Result<Report, PipelineError> {
        let mut report = Report::default();
        for item in items {
            let kind = IssueKind::from_name(&item.issue);
            let requested = self.settings.sample_cap.min(item.count);
            let records = self
                .sampler
                .sample(index, &item.account, &item.issue, requested);
            let entry = ResultEntry::from_records(&kind, &records);
            let query = self.generator.generate(&kind, &entry)?;

            report.upsert(
                &item.account,
                IssueSection {
                    issue: kind,
                    entry,
                    query,
                },
            );
        }
        Ok(report)
    }
}
