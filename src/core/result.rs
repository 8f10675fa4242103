//! Sampled identifiers for one account/issue

use serde::Serialize;

use crate::core::index::IssueRecord;
use crate::core::issue::IssueKind;

/// Identifiers selected for verification
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultEntry {
    /// Unique request ids, in first-seen order
    Reqs(Vec<String>),
    /// Record ids
    Ids(Vec<String>),
}

impl ResultEntry {
    /// Build the entry for `kind` from sampled records
    pub fn from_records(kind: &IssueKind, records: &[IssueRecord]) -> Self {
        if kind.samples_requests() {
            let mut reqs: Vec<String> = Vec::with_capacity(records.len());
            for record in records {
                if !reqs.contains(&record.request_id) {
                    reqs.push(record.request_id.clone());
                }
            }
            ResultEntry::Reqs(reqs)
        } else {
            ResultEntry::Ids(records.iter().map(|r| r.record_id.clone()).collect())
        }
    }

    pub fn identifiers(&self) -> &[String] {
        match self {
            ResultEntry::Reqs(values) | ResultEntry::Ids(values) => values,
        }
    }

    pub fn len(&self) -> usize {
        self.identifiers().len()
    }

    pub fn is_empty(&self) -> bool {
        self.identifiers().is_empty()
    }
}
