//! Association of documentation comments with function declarations.
//!
//! Two styles are recognized directly above a declaration:
//!
//! ```c
//! /**
//!  * Adds two numbers.
//!  * @param a first operand
//!  * @return the sum
//!  */
//! int add(int a, int b) {
//!
//! /// Adds two numbers.
//! /// @param a first operand
//! int add(int a, int b) {
//! ```
//!
//! Blank lines and ordinary `//` comments between the doc comment and the
//! declaration are tolerated; any code line ends the search.

use crate::constants::{
    DOC_DESCRIPTION_MIN_CHARS, DOC_SEARCH_WINDOW, PARAM_TAG_RE, RETURN_TAG_RE,
};
use std::collections::BTreeSet;

/// A parsed documentation comment.
///
/// When no comment was found, `exists` is `false` and every other field is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocComment {
    /// Whether a doc comment was found above the declaration.
    pub exists: bool,
    /// Whether the comment carries free text besides tags.
    pub has_description: bool,
    /// Parameter names named by `@param` tags.
    pub documented_params: BTreeSet<String>,
    /// Whether an `@return` or `@returns` tag is present.
    pub has_return_tag: bool,
    /// The comment lines as they appear in the source.
    pub raw_text: String,
}

impl DocComment {
    /// Whether the comment counts as documentation for rule purposes.
    ///
    /// A comment without a description (only tags, or empty) does not count.
    #[must_use]
    pub fn is_present(&self) -> bool {
        self.exists && self.has_description
    }

    fn from_text(raw_text: String) -> Self {
        let documented_params = PARAM_TAG_RE()
            .captures_iter(&raw_text)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str().to_owned())
            .collect();
        let has_return_tag = RETURN_TAG_RE().is_match(&raw_text);
        Self {
            exists: true,
            has_description: false,
            documented_params,
            has_return_tag,
            raw_text,
        }
    }
}

/// Finds and parses the doc comment above the declaration at `decl_idx` (0-based).
///
/// At most [`DOC_SEARCH_WINDOW`] lines above the declaration are examined.
#[must_use]
pub fn find_doc_comment(lines: &[&str], decl_idx: usize) -> DocComment {
    let floor = decl_idx.saturating_sub(DOC_SEARCH_WINDOW);

    for i in (floor..decl_idx.min(lines.len())).rev() {
        let line = lines[i].trim();
        if line.is_empty() {
            continue;
        }
        if line.ends_with("*/") {
            return parse_block_comment(lines, floor, i);
        }
        if line.starts_with("///") {
            return parse_line_run(lines, floor, i);
        }
        if !line.starts_with("//") && !line.starts_with('*') {
            break;
        }
    }

    DocComment::default()
}

/// Parses a `/* ... */` comment whose closing marker is on line `close`.
fn parse_block_comment(lines: &[&str], floor: usize, close: usize) -> DocComment {
    let Some(open) = (floor..=close)
        .rev()
        .find(|&j| lines[j].trim().starts_with("/*"))
    else {
        return DocComment::default();
    };

    let span = &lines[open..=close];
    let mut doc = DocComment::from_text(span.join("\n"));
    doc.has_description = span.iter().any(|line| {
        let content = line.replace("/**", "").replace("/*", "").replace("*/", "");
        let content = content.trim().trim_start_matches('*').trim();
        !content.is_empty() && !content.starts_with('@')
    });
    doc
}

/// Parses a run of `///` lines ending at line `last`.
fn parse_line_run(lines: &[&str], floor: usize, last: usize) -> DocComment {
    let mut run = vec![lines[last].trim()];
    for k in (floor..last).rev() {
        let line = lines[k].trim();
        if line.starts_with("///") {
            run.push(line);
        } else if !line.is_empty() {
            break;
        }
    }
    run.reverse();

    let mut doc = DocComment::from_text(run.join("\n"));
    let visible = doc
        .raw_text
        .replace("///", "")
        .chars()
        .filter(|c| !c.is_whitespace())
        .count();
    doc.has_description = visible > DOC_DESCRIPTION_MIN_CHARS;
    doc
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(src: &str) -> Vec<&str> {
        src.lines().collect()
    }

    fn decl_index(lines: &[&str]) -> usize {
        lines.iter().position(|l| l.ends_with('{')).unwrap()
    }

    #[test]
    fn test_block_comment_with_tags() {
        let src = "\
/**
 * Adds two numbers.
 * @param a first
 * @param b second
 * @return sum
 */
int add(int a, int b) {";
        let l = lines(src);
        let doc = find_doc_comment(&l, decl_index(&l));
        assert!(doc.exists);
        assert!(doc.has_description);
        assert!(doc.is_present());
        assert!(doc.has_return_tag);
        assert!(doc.documented_params.contains("a"));
        assert!(doc.documented_params.contains("b"));
        assert_eq!(doc.documented_params.len(), 2);
    }

    #[test]
    fn test_single_line_block_comment() {
        let l = lines("/** Frees nothing. */\nvoid noop(void) {");
        let doc = find_doc_comment(&l, 1);
        assert!(doc.is_present());
        assert!(!doc.has_return_tag);
    }

    #[test]
    fn test_tags_only_block_is_not_a_description() {
        let l = lines("/**\n * @param a x\n * @returns y\n */\nint f(int a) {");
        let doc = find_doc_comment(&l, 4);
        assert!(doc.exists);
        assert!(!doc.has_description);
        assert!(!doc.is_present());
        assert!(doc.has_return_tag);
    }

    #[test]
    fn test_blank_lines_between_doc_and_declaration_are_skipped() {
        let l = lines("/** Does a thing. */\n\n\nint f(void) {");
        assert!(find_doc_comment(&l, 3).is_present());
    }

    #[test]
    fn test_code_between_doc_and_declaration_breaks_association() {
        let l = lines("/** Does a thing. */\nint counter = 0;\nint f(void) {");
        let doc = find_doc_comment(&l, 2);
        assert!(!doc.exists);
    }

    #[test]
    fn test_plain_line_comment_is_passed_over() {
        let l = lines("/** Does a thing. */\n// FERN_STYLE: allow(no-malloc)\nint f(void) {");
        assert!(find_doc_comment(&l, 2).is_present());
    }

    #[test]
    fn test_unterminated_block_in_window_is_absent() {
        let l = lines("x = 1;\n * stray */\nint f(void) {");
        assert!(!find_doc_comment(&l, 2).exists);
    }

    #[test]
    fn test_line_run_style() {
        let src = "\
/// Parses the header.
///
/// @param buf input bytes
/// @return status
int parse(const char *buf) {";
        let l = lines(src);
        let doc = find_doc_comment(&l, 4);
        assert!(doc.is_present());
        assert!(doc.has_return_tag);
        assert!(doc.documented_params.contains("buf"));
        assert_eq!(doc.raw_text.lines().count(), 4);
    }

    #[test]
    fn test_line_run_description_threshold() {
        let short = lines("/// tiny\nvoid f(void) {");
        let doc = find_doc_comment(&short, 1);
        assert!(doc.exists);
        assert!(!doc.has_description);

        let long = lines("/// abc def\nvoid f(void) {");
        assert!(find_doc_comment(&long, 1).has_description);
    }

    #[test]
    fn test_variadic_param_tag() {
        let l = lines("/** Logs.\n * @param fmt f\n * @param ... args\n */\nvoid log_msg(const char *fmt, ...) {");
        let doc = find_doc_comment(&l, 4);
        assert!(doc.documented_params.contains("..."));
        assert!(doc.documented_params.contains("fmt"));
    }

    #[test]
    fn test_search_window_is_bounded() {
        let mut src = String::from("/** Far away doc. */\n");
        for _ in 0..DOC_SEARCH_WINDOW {
            src.push_str("// filler\n");
        }
        src.push_str("int f(void) {");
        let l = lines(&src);
        let idx = l.len() - 1;
        assert!(!find_doc_comment(&l, idx).exists);
    }

    #[test]
    fn test_declaration_on_first_line() {
        let l = lines("int f(void) {");
        assert_eq!(find_doc_comment(&l, 0), DocComment::default());
    }
}
