//! FernStyle analyzer module.
//!
//! This module drives a style check over many files:
//! - `types`: Result types (AnalysisResult, AnalysisSummary)
//! - `processing`: File reading, rule evaluation and parallel aggregation
//! - Core `StyleChecker` struct and its builder methods

mod processing;
/// Result types and analysis summaries.
pub mod types;

pub use processing::FileReport;
pub use types::{AnalysisResult, AnalysisSummary};

use crate::constants::DEFAULT_EXTENSION;
use crate::rules::RuleConfig;

/// The main checker struct.
/// Settings shared by every file of a run are stored here.
pub struct StyleChecker {
    /// Rule thresholds, mode and disabled rules.
    pub rule_config: RuleConfig,
    /// Folders to exclude from discovery.
    pub exclude_folders: Vec<String>,
    /// Folders to force-include (overrides default exclusions).
    pub include_folders: Vec<String>,
    /// Source extensions without the dot.
    pub extensions: Vec<String>,
    /// Progress bar advanced once per file (thread-safe).
    pub progress_bar: Option<std::sync::Arc<indicatif::ProgressBar>>,
}

impl Default for StyleChecker {
    fn default() -> Self {
        Self {
            rule_config: RuleConfig::default(),
            exclude_folders: Vec::new(),
            include_folders: Vec::new(),
            extensions: vec![DEFAULT_EXTENSION.to_owned()],
            progress_bar: None,
        }
    }
}

impl StyleChecker {
    /// Creates a checker with the given rule settings.
    #[must_use]
    pub fn new(rule_config: RuleConfig) -> Self {
        Self {
            rule_config,
            ..Self::default()
        }
    }

    /// Builder-style method to set rule settings.
    #[must_use]
    pub fn with_rule_config(mut self, rule_config: RuleConfig) -> Self {
        self.rule_config = rule_config;
        self
    }

    /// Builder-style method to set excluded folders.
    #[must_use]
    pub fn with_excludes(mut self, folders: Vec<String>) -> Self {
        self.exclude_folders = folders;
        self
    }

    /// Builder-style method to set included folders.
    #[must_use]
    pub fn with_includes(mut self, folders: Vec<String>) -> Self {
        self.include_folders = folders;
        self
    }

    /// Builder-style method to set source extensions.
    #[must_use]
    pub fn with_extensions(mut self, extensions: Vec<String>) -> Self {
        self.extensions = extensions;
        self
    }

    /// Builder-style method to attach a progress bar.
    #[must_use]
    pub fn with_progress_bar(mut self, pb: std::sync::Arc<indicatif::ProgressBar>) -> Self {
        self.progress_bar = Some(pb);
        self
    }
}
