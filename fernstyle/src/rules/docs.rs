use super::ids::RuleId;
use super::{Rule, RuleConfig};
use crate::scanner::Function;
use std::collections::BTreeSet;

pub(super) struct DocCommentRule;
impl Rule for DocCommentRule {
    fn id(&self) -> RuleId {
        RuleId::DocComment
    }
    fn check(&self, func: &Function, _config: &RuleConfig) -> Option<String> {
        (!func.doc.is_present())
            .then(|| "Missing doc comment (add /** ... */ before function)".to_owned())
    }
}

/// Only evaluated when a doc comment is present.
pub(super) struct DocParamsRule;
impl Rule for DocParamsRule {
    fn id(&self) -> RuleId {
        RuleId::DocParams
    }
    fn check(&self, func: &Function, _config: &RuleConfig) -> Option<String> {
        if !func.doc.is_present() {
            return None;
        }
        let missing: BTreeSet<&str> = func
            .param_names
            .iter()
            .filter(|name| !func.doc.documented_params.contains(*name))
            .map(String::as_str)
            .collect();
        if missing.is_empty() {
            return None;
        }
        let list: Vec<&str> = missing.into_iter().collect();
        Some(format!("Missing @param for: {}", list.join(", ")))
    }
}

/// Only evaluated when a doc comment is present.
pub(super) struct DocReturnRule;
impl Rule for DocReturnRule {
    fn id(&self) -> RuleId {
        RuleId::DocReturn
    }
    fn check(&self, func: &Function, _config: &RuleConfig) -> Option<String> {
        let returns_value = !func.return_type.is_empty() && !func.return_type.ends_with("void");
        (func.doc.is_present() && returns_value && !func.doc.has_return_tag)
            .then(|| "Missing @return for non-void function".to_owned())
    }
}
