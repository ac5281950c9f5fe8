//! Lightweight extraction of parameter and return-type facts from a signature line.

use crate::constants::{ARRAY_SUFFIX_RE, CHAR_POINTER_RE};

/// Facts extracted from one function signature line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignatureInfo {
    /// Parameter names in declaration order. A variadic tail is named `...`.
    pub param_names: Vec<String>,
    /// Every token before the function name, joined by single spaces.
    pub return_type: String,
    /// Whether a parameter is a mutable, single-indirection `char *`.
    pub has_raw_char_param: bool,
}

impl SignatureInfo {
    /// Analyzes a signature line such as `static int add(int a, int b) {`.
    #[must_use]
    pub fn from_line(line: &str) -> Self {
        let params = parameter_text(line).unwrap_or_default();
        let param_names = extract_param_names(params);
        let has_raw_char_param = !is_entry_point(&param_names) && has_raw_char(params);
        Self {
            return_type: extract_return_type(line),
            param_names,
            has_raw_char_param,
        }
    }
}

/// Returns the text between the first `(` and its matching `)`.
fn parameter_text(line: &str) -> Option<&str> {
    let open = line.find('(')?;
    let mut depth = 0usize;
    for (offset, c) in line[open..].char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&line[open + 1..open + offset]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Splits a parameter list on commas outside nested parentheses.
fn split_top_level(params: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in params.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(params[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(params[start..].trim());
    parts.retain(|p| !p.is_empty());
    parts
}

/// Extracts parameter names from the text inside a signature's parentheses.
///
/// # Examples
/// ```
/// use fernstyle::scanner::extract_param_names;
///
/// assert_eq!(extract_param_names("int argc, char *argv[]"), vec!["argc", "argv"]);
/// assert!(extract_param_names("void").is_empty());
/// ```
#[must_use]
pub fn extract_param_names(params: &str) -> Vec<String> {
    let params = params.trim();
    if params.is_empty() || params == "void" {
        return Vec::new();
    }

    split_top_level(params)
        .into_iter()
        .filter_map(|param| {
            if param == "..." {
                return Some("...".to_owned());
            }
            let without_arrays = ARRAY_SUFFIX_RE().replace_all(param, "");
            let last = without_arrays.split_whitespace().last()?;
            let name = last.trim_start_matches('*');
            (!name.is_empty() && name != "void").then(|| name.to_owned())
        })
        .collect()
}

/// Extracts the return type: every token before the opening parenthesis except
/// the function name.
#[must_use]
pub fn extract_return_type(line: &str) -> String {
    let head = line.split('(').next().unwrap_or_default();
    let words: Vec<&str> = head.split_whitespace().collect();
    match words.split_last() {
        Some((_, rest)) if !rest.is_empty() => rest.join(" "),
        _ => String::new(),
    }
}

/// Whether the parameters are the conventional `argc`/`argv` pair of an entry point.
fn is_entry_point(param_names: &[String]) -> bool {
    param_names.iter().any(|n| n == "argc") && param_names.iter().any(|n| n == "argv")
}

/// Whether `params` declares a `char *` that is neither `const`-qualified nor a `char **`.
fn has_raw_char(params: &str) -> bool {
    CHAR_POINTER_RE().find_iter(params).any(|m| {
        let double_pointer = params[m.end()..].trim_start().starts_with('*');
        let preceding = params[..m.start()].trim_end();
        let const_qualified = preceding
            .strip_suffix("const")
            .is_some_and(|rest| !rest.chars().last().is_some_and(is_ident_char));
        !double_pointer && !const_qualified
    })
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
