//! MongoDB shell query generation from embedded Tera templates

use rust_embed::Embed;
use tera::Tera;
use thiserror::Error;

use crate::core::issue::IssueKind;
use crate::core::result::ResultEntry;

#[derive(Embed)]
#[folder = "templates/queries/"]
struct EmbeddedQueries;

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("Template not found: {0}")]
    NotFound(String),

    #[error("Template rendering error: {0}")]
    RenderError(String),
}

/// Renders verification queries for sampled identifiers
pub struct QueryGenerator {
    tera: Tera,
}

impl QueryGenerator {
    /// Create a generator with the embedded query templates
    pub fn new() -> Result<Self, QueryError> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);

        for file in EmbeddedQueries::iter() {
            let filename = file.as_ref();
            if let Some(content) = EmbeddedQueries::get(filename) {
                let template_str = std::str::from_utf8(&content.data)
                    .map_err(|e| QueryError::RenderError(format!("{}: {}", filename, e)))?;
                tera.add_raw_template(filename, template_str)
                    .map_err(|e| QueryError::RenderError(e.to_string()))?;
            }
        }

        Ok(Self { tera })
    }

    /// Template used for an issue kind
    pub fn template_name(kind: &IssueKind) -> &'static str {
        match kind {
            IssueKind::ZeroAttachments => "zero_attachments.js.tera",
            IssueKind::InvalidReq => "invalid_req.js.tera",
            IssueKind::InvalidResume => "invalid_resume.js.tera",
            IssueKind::UnknownError => "unknown_error.js.tera",
            IssueKind::Other(_) => "find_by_id.js.tera",
        }
    }

    /// Render the query for `kind` over the identifiers in `entry`
    pub fn generate(&self, kind: &IssueKind, entry: &ResultEntry) -> Result<String, QueryError> {
        let name = Self::template_name(kind);
        if !self.tera.get_template_names().any(|n| n == name) {
            return Err(QueryError::NotFound(name.to_string()));
        }

        let ids = entry.identifiers();
        let mut context = tera::Context::new();
        context.insert("issue", kind.as_str());
        context.insert("ids", ids);
        context.insert("id_list", &quoted_list(ids, ", "));
        context.insert("count", &ids.len());

        self.tera
            .render(name, &context)
            .map(|query| query.trim_end().to_string())
            .map_err(|e| QueryError::RenderError(e.to_string()))
    }
}

/// Single-quote each identifier verbatim and join with `separator`
pub fn quoted_list(ids: &[String], separator: &str) -> String {
    ids.iter()
        .map(|id| format!("'{}'", id))
        .collect::<Vec<_>>()
        .join(separator)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    fn generate(issue: &str, entry: ResultEntry) -> String {
        QueryGenerator::new()
            .unwrap()
            .generate(&IssueKind::from_name(issue), &entry)
            .unwrap()
    }

    #[test]
    fn test_invalid_req_query() {
        let query = generate("invalid_req", ResultEntry::Reqs(ids(&["R1"])));
        assert!(query.starts_with("db.req.find("));
        assert!(query.contains("external_id: { $in: ['R1'] }"));
        assert!(query.contains("is_intern: 1"));
    }

    #[test]
    fn test_zero_attachments_query() {
        let query = generate(
            "0_attachments_on_application",
            ResultEntry::Ids(ids(&["A1", "A2"])),
        );
        assert!(query.starts_with("db.application.find("));
        assert!(query.contains("_id: { $in: ['A1', 'A2'] }"));
        assert!(query.contains(r#"{ error: "no resume data retrieved" }"#));
        assert!(query.contains("{ attachments: { $size: 0 } }"));
        assert!(query.contains(".forEach("));
    }

    #[test]
    fn test_invalid_resume_query_compares_sample_size() {
        let query = generate("invalid_resume", ResultEntry::Ids(ids(&["A1", "A2", "A3"])));
        assert!(query.contains("countDocuments"));
        assert!(query.contains(r#"error: "invalid resume""#));
        assert!(query.contains("_id: { $in: ['A1', 'A2', 'A3'] }"));
        assert!(query.ends_with("print(matched === 3);"));
    }

    #[test]
    fn test_unknown_error_query() {
        let query = generate("unknown_error", ResultEntry::Ids(ids(&["A9"])));
        assert!(query.contains("{ error: { $exists: true } }"));
        assert!(query.contains(r#"{ error: "no resume is usable" }"#));
        assert!(query.contains(r#"print(doc._id + " - " + doc.error);"#));
    }

    #[test]
    fn test_other_issue_is_plain_find() {
        let query = generate("missing_email", ResultEntry::Ids(ids(&["A1", "B2"])));
        assert_eq!(query, "db.application.find({ _id: { $in: ['A1', 'B2'] } })");
    }

    #[test]
    fn test_identifiers_are_not_escaped() {
        let query = generate("missing_email", ResultEntry::Ids(ids(&["a<b>&c"])));
        assert!(query.contains("'a<b>&c'"));
    }

    #[test]
    fn test_empty_sample_still_renders() {
        let query = generate("missing_email", ResultEntry::Ids(Vec::new()));
        assert_eq!(query, "db.application.find({ _id: { $in: [] } })");
    }

    #[test]
    fn test_quoted_list() {
        assert_eq!(quoted_list(&ids(&["a", "b"]), " , "), "'a' , 'b'");
        assert_eq!(quoted_list(&[], ", "), "");
    }
}
