//! Centralized rule identifiers for FernStyle.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Every rule the checker can report.
///
/// The kebab-case name is what users write inside `allow(...)` annotations,
/// in `disable = [...]` config lists, and what appears in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleId {
    /// Function has fewer assertion lines than required.
    AssertionDensity,
    /// Function body is longer than allowed.
    FunctionLength,
    /// Function calls a heap allocator.
    NoMalloc,
    /// Function calls `free()`.
    NoFree,
    /// Function contains a loop without an explicit bound.
    BoundedLoops,
    /// Function has no doc comment.
    DocComment,
    /// Doc comment does not document every parameter.
    DocParams,
    /// Doc comment of a non-void function lacks a return tag.
    DocReturn,
    /// Function takes a mutable `char *` parameter.
    NoRawChar,
    /// File contains a hand-written tagged union.
    NoTaggedUnion,
    /// File could not be read.
    ReadError,
}

/// Umbrella annotation name covering `doc-params` and `doc-return`.
pub const DOC_STYLE_UMBRELLA: &str = "doc-style";

impl RuleId {
    /// All rules, in evaluation and display order.
    pub const ALL: [RuleId; 11] = [
        RuleId::AssertionDensity,
        RuleId::FunctionLength,
        RuleId::NoMalloc,
        RuleId::NoFree,
        RuleId::BoundedLoops,
        RuleId::DocComment,
        RuleId::DocParams,
        RuleId::DocReturn,
        RuleId::NoRawChar,
        RuleId::NoTaggedUnion,
        RuleId::ReadError,
    ];

    /// Returns the kebab-case rule name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            RuleId::AssertionDensity => "assertion-density",
            RuleId::FunctionLength => "function-length",
            RuleId::NoMalloc => "no-malloc",
            RuleId::NoFree => "no-free",
            RuleId::BoundedLoops => "bounded-loops",
            RuleId::DocComment => "doc-comment",
            RuleId::DocParams => "doc-params",
            RuleId::DocReturn => "doc-return",
            RuleId::NoRawChar => "no-raw-char",
            RuleId::NoTaggedUnion => "no-tagged-union",
            RuleId::ReadError => "read-error",
        }
    }

    /// Whether lenient mode downgrades this rule from error to warning.
    #[must_use]
    pub const fn is_mode_sensitive(self) -> bool {
        matches!(
            self,
            RuleId::BoundedLoops
                | RuleId::DocComment
                | RuleId::DocParams
                | RuleId::DocReturn
                | RuleId::NoRawChar
        )
    }

    /// Whether the `doc-style` umbrella annotation suppresses this rule.
    #[must_use]
    pub const fn is_doc_style(self) -> bool {
        matches!(self, RuleId::DocParams | RuleId::DocReturn)
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not a known rule name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown rule '{0}'")]
pub struct UnknownRule(pub String);

impl FromStr for RuleId {
    type Err = UnknownRule;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RuleId::ALL
            .into_iter()
            .find(|rule| rule.as_str() == s)
            .ok_or_else(|| UnknownRule(s.to_owned()))
    }
}
