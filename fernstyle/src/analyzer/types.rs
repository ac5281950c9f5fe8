//! Type definitions for analysis results.

use crate::rules::{SeverityMode, Violation};
use serde::Serialize;

/// Holds the results of one style check run.
/// This struct is serialized to JSON if requested.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    /// Every violation, sorted by file then line.
    pub violations: Vec<Violation>,
    /// Summary statistics of the run.
    pub summary: AnalysisSummary,
}

/// Summary statistics for the analysis result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisSummary {
    /// Number of source files scanned.
    pub files_checked: usize,
    /// Number of function definitions found.
    pub functions_checked: usize,
    /// Violations with error severity.
    pub errors: usize,
    /// Violations with warning severity.
    pub warnings: usize,
    /// Distinct files with at least one violation.
    pub files_with_violations: usize,
    /// Severity mode the run used.
    pub mode: SeverityMode,
    /// Whether the run passes under `mode`.
    pub passed: bool,
}

impl AnalysisSummary {
    /// Computes the summary for already-sorted violations.
    #[must_use]
    pub fn from_violations(
        violations: &[Violation],
        files_checked: usize,
        functions_checked: usize,
        mode: SeverityMode,
    ) -> Self {
        let errors = violations.iter().filter(|v| v.is_error()).count();
        let warnings = violations.len() - errors;
        let mut files: Vec<&std::path::Path> =
            violations.iter().map(|v| v.file.as_path()).collect();
        files.dedup();
        let passed = match mode {
            SeverityMode::Strict => errors == 0 && warnings == 0,
            SeverityMode::Lenient => errors == 0,
        };
        Self {
            files_checked,
            functions_checked,
            errors,
            warnings,
            files_with_violations: files.len(),
            mode,
            passed,
        }
    }
}

impl AnalysisResult {
    /// Whether the run has no violations at all.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }
}
