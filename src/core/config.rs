//! Configuration management with layered hierarchy

use serde::Deserialize;
use std::path::PathBuf;

/// Minimum reported percentage for an issue line to be sampled
pub const DEFAULT_MIN_PERCENTAGE: f64 = 10.0;

/// Upper bound on identifiers sampled per account/issue
pub const DEFAULT_SAMPLE_CAP: usize = 5;

/// File-level configuration; every field is optional so layers can overlay
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Print debug traces to stderr
    pub debug: Option<bool>,

    /// Minimum issue percentage kept by the report parser
    pub min_percentage: Option<f64>,

    /// Maximum identifiers sampled per issue
    pub sample_size: Option<usize>,
}

/// Resolved settings for one run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settings {
    pub debug: bool,
    pub min_percentage: f64,
    pub sample_cap: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug: false,
            min_percentage: DEFAULT_MIN_PERCENTAGE,
            sample_cap: DEFAULT_SAMPLE_CAP,
        }
    }
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    pub fn load() -> Self {
        let mut config = Config::default();

        // 1. User config (~/.config/cqk/config.yaml)
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                if let Ok(contents) = std::fs::read_to_string(&global_path) {
                    if let Ok(global) = serde_yml::from_str::<Config>(&contents) {
                        config.merge(global);
                    }
                }
            }
        }

        // 2. Environment variables
        config.merge(Self::from_env(|key| std::env::var(key).ok()));

        config
    }

    /// Read overrides from environment-style lookups; unparsable values are ignored
    pub fn from_env(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Config {
            debug: lookup("CQK_DEBUG").and_then(|v| parse_flag(&v)),
            min_percentage: lookup("CQK_MIN_PERCENTAGE").and_then(|v| v.trim().parse().ok()),
            sample_size: lookup("CQK_SAMPLE_SIZE").and_then(|v| v.trim().parse().ok()),
        }
    }

    /// Get the path to the user config file
    fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "cqk")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Merge another config into this one (other takes precedence)
    pub fn merge(&mut self, other: Config) {
        if other.debug.is_some() {
            self.debug = other.debug;
        }
        if other.min_percentage.is_some() {
            self.min_percentage = other.min_percentage;
        }
        if other.sample_size.is_some() {
            self.sample_size = other.sample_size;
        }
    }

    /// Resolve into concrete settings, filling gaps with defaults
    pub fn settings(&self) -> Settings {
        let defaults = Settings::default();
        Settings {
            debug: self.debug.unwrap_or(defaults.debug),
            min_percentage: self.min_percentage.unwrap_or(defaults.min_percentage),
            sample_cap: self.sample_size.unwrap_or(defaults.sample_cap),
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
