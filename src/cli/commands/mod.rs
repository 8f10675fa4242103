//! CLI command implementations

pub mod utils;

pub mod completions;
pub mod interactive;
pub mod run;
