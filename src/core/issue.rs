//! Issue categories and name normalization

use serde::Serialize;
use std::fmt;

/// Known compliance issue categories, plus a catch-all for anything else
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IssueKind {
    /// Application has no usable attachments
    ZeroAttachments,
    /// Application points at a bad requisition
    InvalidReq,
    /// Resume could not be parsed
    InvalidResume,
    /// Unclassified processing error
    UnknownError,
    /// Any other issue column
    Other(String),
}

impl IssueKind {
    pub fn from_name(name: &str) -> Self {
        match name {
            "0_attachments_on_application" => IssueKind::ZeroAttachments,
            "invalid_req" => IssueKind::InvalidReq,
            "invalid_resume" => IssueKind::InvalidResume,
            "unknown_error" => IssueKind::UnknownError,
            other => IssueKind::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            IssueKind::ZeroAttachments => "0_attachments_on_application",
            IssueKind::InvalidReq => "invalid_req",
            IssueKind::InvalidResume => "invalid_resume",
            IssueKind::UnknownError => "unknown_error",
            IssueKind::Other(name) => name,
        }
    }

    /// Whether sampled results report request ids instead of record ids
    pub fn samples_requests(&self) -> bool {
        matches!(self, IssueKind::InvalidReq)
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for IssueKind {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Normalize a CSV column header into an issue name
pub fn normalize_column(header: &str) -> String {
    header.trim().replace(' ', "_")
}

/// Normalize an issue label from report text ("Invalid Req" -> "invalid_req")
pub fn normalize_label(label: &str) -> String {
    label.trim().to_lowercase().replace(' ', "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_names_round_trip() {
        for name in [
            "0_attachments_on_application",
            "invalid_req",
            "invalid_resume",
            "unknown_error",
        ] {
            let kind = IssueKind::from_name(name);
            assert!(!matches!(kind, IssueKind::Other(_)), "{name} should be known");
            assert_eq!(kind.as_str(), name);
        }
    }

    #[test]
    fn test_unknown_name_is_other() {
        let kind = IssueKind::from_name("missing_email");
        assert_eq!(kind, IssueKind::Other("missing_email".to_string()));
        assert_eq!(kind.to_string(), "missing_email");
        assert!(!kind.samples_requests());
        assert!(IssueKind::InvalidReq.samples_requests());
    }

    #[test]
    fn test_normalization() {
        assert_eq!(normalize_column("invalid resume"), "invalid_resume");
        assert_eq!(normalize_column("Invalid Req"), "Invalid_Req");
        assert_eq!(normalize_label(" Invalid Req "), "invalid_req");
        assert_eq!(normalize_label("0 attachments on application"), "0_attachments_on_application");
    }
}
