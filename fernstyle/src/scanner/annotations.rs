//! Inline suppression annotations.
//!
//! A suppression is written inside a line or block comment:
//!
//! ```c
//! void *arena_grow(Arena *a) { // FERN_STYLE: allow(no-malloc, doc-style)
//! ```
//!
//! Annotations on a function's signature line or anywhere in its body apply to
//! the whole function.

use crate::constants::ALLOW_RE;
use crate::rules::ids::{RuleId, DOC_STYLE_UMBRELLA};
use rustc_hash::FxHashSet;

/// Returns the rule names listed in the suppression annotation on `line`.
///
/// Names are trimmed and empty entries are dropped. Lines without an
/// annotation yield an empty list.
#[must_use]
pub fn parse_allow_annotation(line: &str) -> Vec<&str> {
    let Some(caps) = ALLOW_RE().captures(line) else {
        return Vec::new();
    };
    caps.get(1).map_or_else(Vec::new, |list| {
        list.as_str()
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .collect()
    })
}

/// The set of rules suppressed for one function.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuppressionSet {
    rules: FxHashSet<RuleId>,
    doc_style: bool,
}

impl SuppressionSet {
    /// Adds a rule name taken from an annotation.
    ///
    /// Returns `false` if the name is neither a rule id nor the `doc-style` umbrella.
    pub fn insert_name(&mut self, name: &str) -> bool {
        if name == DOC_STYLE_UMBRELLA {
            self.doc_style = true;
            return true;
        }
        match name.parse::<RuleId>() {
            Ok(rule) => {
                self.rules.insert(rule);
                true
            }
            Err(_) => false,
        }
    }

    /// Adds a rule directly.
    pub fn insert(&mut self, rule: RuleId) {
        self.rules.insert(rule);
    }

    /// Whether findings for `rule` are suppressed.
    #[must_use]
    pub fn allows(&self, rule: RuleId) -> bool {
        self.rules.contains(&rule) || (self.doc_style && rule.is_doc_style())
    }

    /// Whether the `doc-style` umbrella was given.
    #[must_use]
    pub fn has_doc_style(&self) -> bool {
        self.doc_style
    }

    /// Whether nothing is suppressed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty() && !self.doc_style
    }
}
