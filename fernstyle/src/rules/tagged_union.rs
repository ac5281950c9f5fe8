use super::ids::RuleId;
use super::{RuleConfig, Severity, Violation};
use crate::constants::TAGGED_UNION_RE;
use crate::scanner::parse_allow_annotation;
use std::path::Path;

/// Reports each line that declares a hand-written tagged union.
///
/// An annotation naming `no-tagged-union` anywhere in the file turns the rule
/// off for the whole file.
#[must_use]
pub fn check_tagged_unions(file: &Path, lines: &[&str], config: &RuleConfig) -> Vec<Violation> {
    if !config.is_enabled(RuleId::NoTaggedUnion) || has_file_marker(lines) {
        return Vec::new();
    }

    lines
        .iter()
        .enumerate()
        .filter(|(_, line)| TAGGED_UNION_RE().is_match(line))
        .map(|(idx, _)| Violation {
            file: file.to_path_buf(),
            line: idx + 1,
            function: String::new(),
            rule: RuleId::NoTaggedUnion,
            message: "Manual tagged union detected - use Datatype99 instead".to_owned(),
            severity: Severity::for_rule(RuleId::NoTaggedUnion, config.mode),
        })
        .collect()
}

fn has_file_marker(lines: &[&str]) -> bool {
    lines.iter().any(|line| {
        parse_allow_annotation(line).contains(&RuleId::NoTaggedUnion.as_str())
    })
}
