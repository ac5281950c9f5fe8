//! Processing methods for the style checker.
//!
//! Contains: `check_source`, `check_file`, `check_files`, `check_paths`

use super::{AnalysisResult, AnalysisSummary, StyleChecker};
use crate::error::FernStyleError;
use crate::rules::{
    check_tagged_unions, evaluate_function, get_function_rules, read_error_violation, Violation,
};
use crate::scanner::extract_functions;
use crate::utils::resolve_inputs;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Violations and function count for one file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileReport {
    /// Violations in evaluation order.
    pub violations: Vec<Violation>,
    /// Number of function definitions found.
    pub functions: usize,
}

impl StyleChecker {
    /// Checks the text of one file.
    ///
    /// `path` is only used to label violations.
    #[must_use]
    pub fn check_source(&self, path: &Path, source: &str) -> FileReport {
        let lines: Vec<&str> = source.lines().collect();
        let functions = extract_functions(&lines);
        let rules = get_function_rules();

        let mut violations: Vec<Violation> = functions
            .iter()
            .flat_map(|func| evaluate_function(path, func, &rules, &self.rule_config))
            .collect();
        violations.extend(check_tagged_unions(path, &lines, &self.rule_config));

        FileReport {
            violations,
            functions: functions.len(),
        }
    }

    /// Reads and checks one file. Unreadable files yield a single `read-error`.
    #[must_use]
    pub fn check_file(&self, path: &Path) -> FileReport {
        let report = match fs::read_to_string(path) {
            Ok(source) => self.check_source(path, &source),
            Err(err) => {
                tracing::warn!(path = %path.display(), "could not read file: {err}");
                FileReport {
                    violations: vec![read_error_violation(path, &err.to_string())],
                    functions: 0,
                }
            }
        };

        tracing::debug!(
            path = %path.display(),
            functions = report.functions,
            violations = report.violations.len(),
            "checked file"
        );
        if let Some(ref pb) = self.progress_bar {
            pb.inc(1);
        }
        report
    }

    /// Checks a list of files in parallel and merges the results.
    #[must_use]
    pub fn check_files(&self, files: &[PathBuf]) -> AnalysisResult {
        let start = Instant::now();

        let reports: Vec<FileReport> = files.par_iter().map(|f| self.check_file(f)).collect();

        let functions_checked = reports.iter().map(|r| r.functions).sum();
        let mut violations: Vec<Violation> =
            reports.into_iter().flat_map(|r| r.violations).collect();
        // Stable: keeps rule order within a line.
        violations.sort_by(|a, b| (&a.file, a.line).cmp(&(&b.file, b.line)));

        let summary = AnalysisSummary::from_violations(
            &violations,
            files.len(),
            functions_checked,
            self.rule_config.mode,
        );
        tracing::info!(
            files = summary.files_checked,
            functions = summary.functions_checked,
            errors = summary.errors,
            warnings = summary.warnings,
            elapsed_ms = start.elapsed().as_millis(),
            "style check finished"
        );

        AnalysisResult {
            violations,
            summary,
        }
    }

    /// Resolves `paths` into files and checks them.
    ///
    /// # Errors
    ///
    /// Returns [`FernStyleError::MissingPath`] when `explicit` is set and a
    /// path does not exist.
    pub fn check_paths(
        &self,
        paths: &[PathBuf],
        explicit: bool,
    ) -> Result<AnalysisResult, FernStyleError> {
        let files = self.resolve_files(paths, explicit)?;
        Ok(self.check_files(&files))
    }

    /// Lists the files a run over `paths` would check.
    ///
    /// # Errors
    ///
    /// See [`StyleChecker::check_paths`].
    pub fn resolve_files(
        &self,
        paths: &[PathBuf],
        explicit: bool,
    ) -> Result<Vec<PathBuf>, FernStyleError> {
        resolve_inputs(
            paths,
            explicit,
            &self.exclude_folders,
            &self.include_folders,
            &self.extensions,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::ids::RuleId;
    use crate::rules::{RuleConfig, SeverityMode};
    use std::fs;
    use tempfile::tempdir;

    const DOCUMENTED: &str = "\
/**
 * Adds two numbers.
 * @param a first
 * @param b second
 * @return the sum
 */
int add(int a, int b) {
    assert(a >= 0);
    assert(b >= 0);
    return a + b;
}
";

    #[test]
    fn test_check_source_clean() {
        let report = StyleChecker::default().check_source(Path::new("add.c"), DOCUMENTED);
        assert_eq!(report.functions, 1);
        assert!(report.violations.is_empty());
    }

    #[test]
    fn test_check_source_includes_file_level_rules() {
        let src = format!("{DOCUMENTED}struct V {{ enum {{ A, B }} tag; }};\n");
        let report = StyleChecker::default().check_source(Path::new("v.c"), &src);
        assert_eq!(report.violations.len(), 1);
        assert_eq!(report.violations[0].rule, RuleId::NoTaggedUnion);
        assert_eq!(report.violations[0].line, 12);
    }

    #[test]
    fn test_check_file_invalid_utf8_is_read_error() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("bad.c");
        fs::write(&path, [0xff, 0xfe, 0x00, 0x7b])?;

        let report = StyleChecker::default().check_file(&path);
        assert_eq!(report.violations.len(), 1);
        let v = &report.violations[0];
        assert_eq!(v.rule, RuleId::ReadError);
        assert_eq!(v.line, 0);
        assert!(v.message.starts_with("Could not read file: "));
        Ok(())
    }

    #[test]
    fn test_check_paths_sorts_by_file_and_line() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let root = dir.path();
        fs::write(root.join("b.c"), "void g(void) {\n}\n")?;
        fs::write(root.join("a.c"), "void f(void) {\n}\n\nvoid h(void) {\n}\n")?;

        let result = StyleChecker::default().check_paths(&[root.to_path_buf()], true)?;
        let keys: Vec<(String, usize)> = result
            .violations
            .iter()
            .map(|v| (v.function.clone(), v.line))
            .collect();
        assert_eq!(
            keys,
            vec![
                ("f".to_owned(), 1),
                ("f".to_owned(), 1),
                ("h".to_owned(), 4),
                ("h".to_owned(), 4),
                ("g".to_owned(), 1),
                ("g".to_owned(), 1),
            ]
        );
        assert_eq!(result.violations[0].rule, RuleId::AssertionDensity);
        assert_eq!(result.violations[1].rule, RuleId::DocComment);
        assert_eq!(result.summary.files_checked, 2);
        assert_eq!(result.summary.functions_checked, 3);
        assert_eq!(result.summary.files_with_violations, 2);
        assert!(!result.summary.passed);
        Ok(())
    }

    #[test]
    fn test_lenient_summary_passes_with_only_warnings() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let src = "void f(void) {\n    assert(1);\n    assert(1);\n}\n";
        fs::write(dir.path().join("w.c"), src)?;

        let checker = StyleChecker::default().with_rule_config(RuleConfig {
            mode: SeverityMode::Lenient,
            ..RuleConfig::default()
        });
        let result = checker.check_paths(&[dir.path().to_path_buf()], true)?;
        assert_eq!(result.summary.errors, 0);
        assert_eq!(result.summary.warnings, 1);
        assert!(result.summary.passed);
        Ok(())
    }

    #[test]
    fn test_repeated_runs_are_identical() -> anyhow::Result<()> {
        let dir = tempdir()?;
        for i in 0..8 {
            fs::write(
                dir.path().join(format!("f{i}.c")),
                "void f(char *s) {\n    while (1) {\n    }\n}\n",
            )?;
        }
        let checker = StyleChecker::default();
        let first = checker.check_paths(&[dir.path().to_path_buf()], true)?;
        let second = checker.check_paths(&[dir.path().to_path_buf()], true)?;
        assert_eq!(first.violations, second.violations);
        assert_eq!(first.summary, second.summary);
        Ok(())
    }
}
