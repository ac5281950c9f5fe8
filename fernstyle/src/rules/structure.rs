use super::ids::RuleId;
use super::{Rule, RuleConfig};
use crate::scanner::Function;

pub(super) struct AssertionDensityRule;
impl Rule for AssertionDensityRule {
    fn id(&self) -> RuleId {
        RuleId::AssertionDensity
    }
    fn check(&self, func: &Function, config: &RuleConfig) -> Option<String> {
        (func.assertion_count < config.min_assertions).then(|| {
            format!(
                "{} assertions (need {}+)",
                func.assertion_count, config.min_assertions
            )
        })
    }
}

pub(super) struct FunctionLengthRule;
impl Rule for FunctionLengthRule {
    fn id(&self) -> RuleId {
        RuleId::FunctionLength
    }
    fn check(&self, func: &Function, config: &RuleConfig) -> Option<String> {
        let lines = func.line_count();
        (lines > config.max_function_lines)
            .then(|| format!("{lines} lines (max {})", config.max_function_lines))
    }
}

pub(super) struct NoMallocRule;
impl Rule for NoMallocRule {
    fn id(&self) -> RuleId {
        RuleId::NoMalloc
    }
    fn check(&self, func: &Function, _config: &RuleConfig) -> Option<String> {
        func.has_malloc_call
            .then(|| "Uses malloc() - use arena allocation instead".to_owned())
    }
}

pub(super) struct NoFreeRule;
impl Rule for NoFreeRule {
    fn id(&self) -> RuleId {
        RuleId::NoFree
    }
    fn check(&self, func: &Function, _config: &RuleConfig) -> Option<String> {
        func.has_free_call
            .then(|| "Uses free() - use arena allocation instead".to_owned())
    }
}

pub(super) struct BoundedLoopsRule;
impl Rule for BoundedLoopsRule {
    fn id(&self) -> RuleId {
        RuleId::BoundedLoops
    }
    fn check(&self, func: &Function, _config: &RuleConfig) -> Option<String> {
        func.has_unbounded_loop
            .then(|| "Unbounded loop detected - add explicit limit".to_owned())
    }
}

pub(super) struct NoRawCharRule;
impl Rule for NoRawCharRule {
    fn id(&self) -> RuleId {
        RuleId::NoRawChar
    }
    fn check(&self, func: &Function, _config: &RuleConfig) -> Option<String> {
        func.has_raw_char_param
            .then(|| "Raw char* parameter - use sds or const char* instead".to_owned())
    }
}
