//! CQK: Compliance Query Kit
//!
//! Cross-references a CSV export of flagged applications with a free-text
//! compliance report, samples matching record identifiers and emits MongoDB
//! shell queries for manual verification.

pub mod cli;
pub mod core;
