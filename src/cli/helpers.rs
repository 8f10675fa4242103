//! Shared helper functions for CLI output

use crate::core::query::quoted_list;

/// Separator between identifiers in the printed report
const ID_SEPARATOR: &str = " , ";

/// Format sampled identifiers for display: `'A1' , 'A2'`
pub fn format_id_list(ids: &[String]) -> String {
    quoted_list(ids, ID_SEPARATOR)
}

/// Header line for one account/issue section
pub fn section_title(account: &str, issue: &str) -> String {
    format!("{} - {}:", account, issue)
}
