//! FERN_STYLE rules, severities and the per-function rule engine.

use crate::constants::{DEFAULT_MAX_FUNCTION_LINES, DEFAULT_MIN_ASSERTIONS};
use crate::scanner::Function;
use rustc_hash::FxHashSet;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

use ids::RuleId;

/// How serious a violation is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Fails the run in every mode.
    Error,
    /// Fails the run only in strict mode.
    Warning,
}

impl Severity {
    /// Severity of `rule` under `mode`.
    #[must_use]
    pub fn for_rule(rule: RuleId, mode: SeverityMode) -> Self {
        match rule {
            RuleId::NoTaggedUnion => Severity::Warning,
            r if r.is_mode_sensitive() && mode == SeverityMode::Lenient => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// Single-character marker used in reports.
    #[must_use]
    pub const fn indicator(self) -> &'static str {
        match self {
            Severity::Error => "X",
            Severity::Warning => "!",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => f.write_str("error"),
            Severity::Warning => f.write_str("warning"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
/// Strict fails on any violation; lenient downgrades documentation and
/// shape rules to warnings and fails only on errors.
pub enum SeverityMode {
    /// Default mode.
    #[default]
    Strict,
    /// Set by `--lenient` or `lenient = true`.
    Lenient,
}

impl fmt::Display for SeverityMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeverityMode::Strict => f.write_str("strict"),
            SeverityMode::Lenient => f.write_str("lenient"),
        }
    }
}

/// Immutable settings the rule engine evaluates against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleConfig {
    /// Severity mode.
    pub mode: SeverityMode,
    /// Rules that are never evaluated.
    pub disabled: FxHashSet<RuleId>,
    /// Maximum allowed `end_line - start_line`.
    pub max_function_lines: usize,
    /// Minimum number of assertion lines per function.
    pub min_assertions: usize,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            mode: SeverityMode::Strict,
            disabled: FxHashSet::default(),
            max_function_lines: DEFAULT_MAX_FUNCTION_LINES,
            min_assertions: DEFAULT_MIN_ASSERTIONS,
        }
    }
}

impl RuleConfig {
    /// Whether `rule` should be evaluated at all.
    #[must_use]
    pub fn is_enabled(&self, rule: RuleId) -> bool {
        !self.disabled.contains(&rule)
    }
}

/// A single rule violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// File the violation was found in.
    pub file: PathBuf,
    /// 1-based line; 0 for whole-file problems.
    pub line: usize,
    /// Function name, empty for file-level violations.
    pub function: String,
    /// Rule that fired.
    pub rule: RuleId,
    /// Human-readable description.
    pub message: String,
    /// Severity under the active mode.
    pub severity: Severity,
}

impl Violation {
    /// Whether this violation is an error.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Whether this violation belongs to a file rather than a function.
    #[must_use]
    pub fn is_file_level(&self) -> bool {
        self.function.is_empty()
    }
}

/// A rule evaluated against one closed function.
pub trait Rule: Send + Sync {
    /// Identifier of the rule.
    fn id(&self) -> RuleId;
    /// Returns the violation message when `func` breaks the rule.
    fn check(&self, func: &Function, config: &RuleConfig) -> Option<String>;
}

/// Function rules in evaluation order.
#[must_use]
pub fn get_function_rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(structure::AssertionDensityRule),
        Box::new(structure::FunctionLengthRule),
        Box::new(structure::NoMallocRule),
        Box::new(structure::NoFreeRule),
        Box::new(structure::BoundedLoopsRule),
        Box::new(docs::DocCommentRule),
        Box::new(docs::DocParamsRule),
        Box::new(docs::DocReturnRule),
        Box::new(structure::NoRawCharRule),
    ]
}

/// Evaluates every enabled, unsuppressed function rule against `func`.
#[must_use]
pub fn evaluate_function(
    file: &Path,
    func: &Function,
    rules: &[Box<dyn Rule>],
    config: &RuleConfig,
) -> Vec<Violation> {
    rules
        .iter()
        .filter(|rule| config.is_enabled(rule.id()) && !func.allowed_rules.allows(rule.id()))
        .filter_map(|rule| {
            let message = rule.check(func, config)?;
            Some(Violation {
                file: file.to_path_buf(),
                line: func.start_line,
                function: func.name.clone(),
                rule: rule.id(),
                message,
                severity: Severity::for_rule(rule.id(), config.mode),
            })
        })
        .collect()
}

/// Violation reported for a file that could not be read or decoded.
#[must_use]
pub fn read_error_violation(file: &Path, reason: &str) -> Violation {
    Violation {
        file: file.to_path_buf(),
        line: 0,
        function: String::new(),
        rule: RuleId::ReadError,
        message: format!("Could not read file: {reason}"),
        severity: Severity::Error,
    }
}

/// Documentation rules.
pub mod docs;
/// Rule identifiers.
pub mod ids;
/// Structural rules over function bodies and signatures.
pub mod structure;
/// File-scoped tagged-union detection.
pub mod tagged_union;

pub use tagged_union::check_tagged_unions;
