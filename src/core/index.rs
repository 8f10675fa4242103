//! Account/issue index built from the flagged-applications CSV export

use csv::{ReaderBuilder, StringRecord};
use serde::Serialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::issue::normalize_column;

/// Column holding the application record id
pub const RECORD_ID_COLUMN: &str = "_id";
/// Column holding the account (city) name
pub const ACCOUNT_COLUMN: &str = "account_id";
/// Column holding the requisition id
pub const REQUEST_ID_COLUMN: &str = "req";

const RESERVED_COLUMNS: [&str; 3] = [RECORD_ID_COLUMN, ACCOUNT_COLUMN, REQUEST_ID_COLUMN];

/// Value marking an issue column as set
const FLAG_SET: &str = "1";

/// One flagged application
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct IssueRecord {
    pub record_id: String,
    pub request_id: String,
}

impl IssueRecord {
    pub fn new(record_id: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self {
            record_id: record_id.into(),
            request_id: request_id.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum IndexError {
    #[error("Failed to open {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV is missing required column '{0}'")]
    MissingColumn(&'static str),
}

/// account -> issue -> flagged records, in file order
#[derive(Debug, Default)]
pub struct AccountIssueIndex {
    accounts: HashMap<String, HashMap<String, Vec<IssueRecord>>>,
    rows: usize,
}

impl AccountIssueIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load an index from a CSV file on disk
    pub fn load(path: &Path) -> Result<Self, IndexError> {
        let file = File::open(path).map_err(|source| IndexError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(BufReader::new(file))
    }

    /// Build an index from any CSV source with a header row
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, IndexError> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        let columns = Columns::resolve(&headers)?;

        let mut index = Self::new();
        for result in rdr.records() {
            let record = result?;
            index.rows += 1;

            let cell = |idx: usize| record.get(idx).unwrap_or_default();
            let record_id = cell(columns.record_id);
            let account = cell(columns.account);
            let request_id = cell(columns.request_id);

            for (idx, issue) in &columns.issues {
                if cell(*idx) == FLAG_SET {
                    index.insert(account, issue, IssueRecord::new(record_id, request_id));
                }
            }
        }

        Ok(index)
    }

    /// Append a record under an account and issue
    pub fn insert(&mut self, account: &str, issue: &str, record: IssueRecord) {
        self.accounts
            .entry(account.to_string())
            .or_default()
            .entry(issue.to_string())
            .or_default()
            .push(record);
    }

    pub fn has_account(&self, account: &str) -> bool {
        self.accounts.contains_key(account)
    }

    /// Records flagged for an account/issue, or None when either is unknown
    pub fn records(&self, account: &str, issue: &str) -> Option<&[IssueRecord]> {
        self.accounts
            .get(account)
            .and_then(|issues| issues.get(issue))
            .map(Vec::as_slice)
    }

    /// Number of data rows read from the source
    pub fn rows_read(&self) -> usize {
        self.rows
    }

    pub fn account_count(&self) -> usize {
        self.accounts.len()
    }

    /// Total number of (account, issue, record) entries
    pub fn len(&self) -> usize {
        self.accounts
            .values()
            .flat_map(|issues| issues.values())
            .map(Vec::len)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Column positions resolved from the header row
struct Columns {
    record_id: usize,
    account: usize,
    request_id: usize,
    issues: Vec<(usize, String)>,
}

impl Columns {
    fn resolve(headers: &StringRecord) -> Result<Self, IndexError> {
        let position = |name: &'static str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or(IndexError::MissingColumn(name))
        };

        let issues = headers
            .iter()
            .enumerate()
            .filter(|(_, h)| !RESERVED_COLUMNS.contains(h))
            .map(|(i, h)| (i, normalize_column(h)))
            .collect();

        Ok(Self {
            record_id: position(RECORD_ID_COLUMN)?,
            account: position(ACCOUNT_COLUMN)?,
            request_id: position(REQUEST_ID_COLUMN)?,
            issues,
        })
    }
}
