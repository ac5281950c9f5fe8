//! Function boundary extraction.
//!
//! A line-by-line state machine finds signature lines, then follows brace depth
//! (on literal-masked text) until the body closes. While inside a body it
//! collects the evidence the rule engine needs: assertion lines, unbounded
//! loops, allocator calls and suppression annotations.

use super::annotations::{parse_allow_annotation, SuppressionSet};
use super::doc_comment::{find_doc_comment, DocComment};
use super::literals::mask_literals;
use super::signature::SignatureInfo;
use crate::constants::{
    ALLOC_CALL_RE, ASSERT_RE, FOREVER_LOOP_RE, FREE_CALL_RE, SIGNATURE_RE, WHILE_CONDITION_RE,
};

/// One function definition found in a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Function {
    /// Function name.
    pub name: String,
    /// 1-based line of the signature.
    pub start_line: usize,
    /// 1-based line holding the closing brace.
    pub end_line: usize,
    /// Number of body lines containing an `assert(` call.
    pub assertion_count: usize,
    /// Whether the body contains a loop without an explicit bound.
    pub has_unbounded_loop: bool,
    /// Whether the body calls `malloc`, `calloc` or `realloc`.
    pub has_malloc_call: bool,
    /// Whether the body calls `free`.
    pub has_free_call: bool,
    /// Parameter names in declaration order.
    pub param_names: Vec<String>,
    /// Return type text, empty if it could not be determined.
    pub return_type: String,
    /// Whether a parameter is a mutable `char *`.
    pub has_raw_char_param: bool,
    /// Doc comment found above the signature.
    pub doc: DocComment,
    /// Rules suppressed anywhere on the signature line or in the body.
    pub allowed_rules: SuppressionSet,
}

impl Function {
    /// Length of the function as counted by the `function-length` rule.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.end_line - self.start_line
    }
}

/// A function whose body is still being scanned.
#[derive(Debug)]
struct OpenFunction {
    name: String,
    start_line: usize,
    signature: SignatureInfo,
    doc: DocComment,
    depth: usize,
    assertion_count: usize,
    has_unbounded_loop: bool,
    has_malloc_call: bool,
    has_free_call: bool,
    allowed_rules: SuppressionSet,
}

#[derive(Debug)]
enum State {
    ScanningForSignature,
    InBody(OpenFunction),
}

impl OpenFunction {
    /// Starts a function if the line at `idx` is a signature.
    fn try_open(lines: &[&str], idx: usize) -> Option<Self> {
        let line = lines[idx];
        let trimmed = line.trim_start();
        if trimmed.starts_with('#') || trimmed.starts_with("//") {
            return None;
        }
        let caps = SIGNATURE_RE().captures(line)?;
        let name = caps.get(1)?.as_str().to_owned();

        let mut open = Self {
            name,
            start_line: idx + 1,
            signature: SignatureInfo::from_line(line),
            doc: find_doc_comment(lines, idx),
            depth: 1,
            assertion_count: 0,
            has_unbounded_loop: false,
            has_malloc_call: false,
            has_free_call: false,
            allowed_rules: SuppressionSet::default(),
        };
        // The signature line contributes annotations only; depth starts at 1
        // whatever follows the opening brace.
        open.collect_annotations(line, idx + 1);
        Some(open)
    }

    fn absorb(&mut self, line: &str, line_no: usize) {
        self.collect_annotations(line, line_no);
        self.scan_code(line);
    }

    fn collect_annotations(&mut self, line: &str, line_no: usize) {
        for name in parse_allow_annotation(line) {
            if !self.allowed_rules.insert_name(name) {
                tracing::warn!(
                    line = line_no,
                    function = %self.name,
                    rule = name,
                    "unknown rule in FERN_STYLE annotation"
                );
            }
        }
    }

    fn scan_code(&mut self, text: &str) {
        let masked = mask_literals(text);
        let opens = masked.matches('{').count();
        let closes = masked.matches('}').count();
        self.depth = (self.depth + opens).saturating_sub(closes);

        if ASSERT_RE().is_match(&masked) {
            self.assertion_count += 1;
        }
        if is_unbounded_loop(&masked) {
            self.has_unbounded_loop = true;
        }
        if ALLOC_CALL_RE().is_match(&masked) {
            self.has_malloc_call = true;
        }
        if FREE_CALL_RE().is_match(&masked) {
            self.has_free_call = true;
        }
    }

    fn is_closed(&self) -> bool {
        self.depth == 0
    }

    fn close(self, end_line: usize) -> Function {
        Function {
            name: self.name,
            start_line: self.start_line,
            end_line: end_line.max(self.start_line),
            assertion_count: self.assertion_count,
            has_unbounded_loop: self.has_unbounded_loop,
            has_malloc_call: self.has_malloc_call,
            has_free_call: self.has_free_call,
            param_names: self.signature.param_names,
            return_type: self.signature.return_type,
            has_raw_char_param: self.signature.has_raw_char_param,
            doc: self.doc,
            allowed_rules: self.allowed_rules,
        }
    }
}

/// Whether a masked line contains a loop with no visible bound.
///
/// `while (1)`, `while (true)` and `for (;;)` always qualify. Any other
/// `while` qualifies when its condition has no comparison operator and is not
/// the constant `0` or `false`.
#[must_use]
pub fn is_unbounded_loop(line: &str) -> bool {
    if FOREVER_LOOP_RE().is_match(line) {
        return true;
    }
    WHILE_CONDITION_RE()
        .captures(line)
        .and_then(|caps| caps.get(1))
        .is_some_and(|cond| {
            let cond = cond.as_str();
            !cond.contains(['<', '>', '=', '!']) && !matches!(cond.trim(), "0" | "false")
        })
}

/// Extracts every function definition from the lines of one file.
///
/// Signature lines inside a body are not treated as new functions. A body
/// still open at end of file closes on the last line.
#[must_use]
pub fn extract_functions(lines: &[&str]) -> Vec<Function> {
    let mut functions = Vec::new();
    let mut state = State::ScanningForSignature;

    for (idx, line) in lines.iter().enumerate() {
        let line_no = idx + 1;
        state = match state {
            State::ScanningForSignature => match OpenFunction::try_open(lines, idx) {
                Some(open) => State::InBody(open),
                None => State::ScanningForSignature,
            },
            State::InBody(mut open) => {
                open.absorb(line, line_no);
                if open.is_closed() {
                    functions.push(open.close(line_no));
                    State::ScanningForSignature
                } else {
                    State::InBody(open)
                }
            }
        };
    }

    if let State::InBody(open) = state {
        functions.push(open.close(lines.len()));
    }

    functions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::ids::RuleId;

    fn extract(src: &str) -> Vec<Function> {
        let lines: Vec<&str> = src.lines().collect();
        extract_functions(&lines)
    }

    #[test]
    fn test_single_function_boundaries() {
        let src = "\
#include <assert.h>

int add(int a, int b) {
    assert(a >= 0);
    assert(b >= 0);
    return a + b;
}
";
        let funcs = extract(src);
        assert_eq!(funcs.len(), 1);
        let f = &funcs[0];
        assert_eq!(f.name, "add");
        assert_eq!(f.start_line, 3);
        assert_eq!(f.end_line, 7);
        assert_eq!(f.line_count(), 4);
        assert_eq!(f.assertion_count, 2);
        assert_eq!(f.param_names, vec!["a", "b"]);
        assert_eq!(f.return_type, "int");
    }

    #[test]
    fn test_nested_blocks_and_multiple_functions() {
        let src = "\
void a(void) {
    if (x) {
        y();
    }
}
void b(void) {
}
";
        let funcs = extract(src);
        assert_eq!(funcs.len(), 2);
        assert_eq!((funcs[0].start_line, funcs[0].end_line), (1, 5));
        assert_eq!((funcs[1].start_line, funcs[1].end_line), (6, 7));
    }

    #[test]
    fn test_braces_in_literals_do_not_move_depth() {
        let src = "\
void f(void) {
    const char *s = \"{\";
    char c = '}';
    g(s, c);
}
void h(void) {
}
";
        let funcs = extract(src);
        assert_eq!(funcs.len(), 2);
        assert_eq!(funcs[0].end_line, 5);
        assert_eq!(funcs[1].start_line, 6);
    }

    #[test]
    fn test_preprocessor_and_comment_lines_are_not_signatures() {
        let src = "\
#define WRAP int f(void) {
// int g(void) {
int h(void) {
}
";
        let funcs = extract(src);
        assert_eq!(funcs.len(), 1);
        assert_eq!(funcs[0].name, "h");
    }

    #[test]
    fn test_prototypes_and_multiline_signatures_are_skipped() {
        let src = "\
int proto(int a);
int split(int a,
          int b) {
    return a + b;
}
";
        assert!(extract(src).is_empty());
    }

    #[test]
    fn test_signature_line_tail_is_not_body() {
        // The brace opened after the signature's own brace is not counted, so
        // the first closing brace ends `f`.
        let src = "void f(int x) { if (x) {\n    g();\n}\nvoid h(void) {\n}\n";
        let funcs = extract(src);
        let bounds: Vec<(&str, usize, usize)> = funcs
            .iter()
            .map(|f| (f.name.as_str(), f.start_line, f.end_line))
            .collect();
        assert_eq!(bounds, vec![("f", 1, 3), ("h", 4, 5)]);
    }

    #[test]
    fn test_signature_line_evidence_is_ignored() {
        let src = "void f(void) { assert(a); free(p);\n    assert(b);\n}\n";
        let f = &extract(src)[0];
        assert_eq!(f.assertion_count, 1);
        assert!(!f.has_free_call);
        assert_eq!((f.start_line, f.end_line), (1, 3));
    }

    #[test]
    fn test_one_line_function_runs_to_next_closing_brace() {
        let src = "int zero(void) { return 0; }\nint one(void) {\n    return 1;\n}\n";
        let funcs = extract(src);
        assert_eq!(funcs.len(), 1);
        assert_eq!(funcs[0].name, "zero");
        assert_eq!((funcs[0].start_line, funcs[0].end_line), (1, 4));
    }

    #[test]
    fn test_unterminated_body_closes_at_end_of_file() {
        let src = "void f(void) {\n    x();\n    y();";
        let funcs = extract(src);
        assert_eq!(funcs.len(), 1);
        assert_eq!(funcs[0].end_line, 3);
    }

    #[test]
    fn test_unbounded_loop_shapes() {
        assert!(is_unbounded_loop("while (1) {"));
        assert!(is_unbounded_loop("while(true)"));
        assert!(is_unbounded_loop("for (;;) {"));
        assert!(is_unbounded_loop("while (running) {"));
        assert!(!is_unbounded_loop("while (i < n) {"));
        assert!(!is_unbounded_loop("while (p != NULL) {"));
        assert!(!is_unbounded_loop("} while (0);"));
        assert!(!is_unbounded_loop("} while (false);"));
        assert!(!is_unbounded_loop("for (int i = 0; i < 10; i++) {"));
    }

    #[test]
    fn test_evidence_flags() {
        let src = "\
void f(void) {
    char *p = malloc(10);
    while (1) {
        break;
    }
    free(p);
}
";
        let f = &extract(src)[0];
        assert!(f.has_malloc_call);
        assert!(f.has_free_call);
        assert!(f.has_unbounded_loop);
        assert_eq!(f.assertion_count, 0);
    }

    #[test]
    fn test_calls_inside_strings_are_ignored() {
        let src = "\
void f(void) {
    puts(\"malloc(1) and free(p) and assert(x)\");
}
";
        let f = &extract(src)[0];
        assert!(!f.has_malloc_call);
        assert!(!f.has_free_call);
        assert_eq!(f.assertion_count, 0);
    }

    #[test]
    fn test_annotations_accumulate_from_signature_and_body() {
        let src = "\
void f(void) { // FERN_STYLE: allow(no-malloc)
    x();
    /* FERN_STYLE: allow(no-free, doc-style) */
}
";
        let f = &extract(src)[0];
        assert!(f.allowed_rules.allows(RuleId::NoMalloc));
        assert!(f.allowed_rules.allows(RuleId::NoFree));
        assert!(f.allowed_rules.allows(RuleId::DocParams));
        assert!(!f.allowed_rules.allows(RuleId::AssertionDensity));
    }

    #[test]
    fn test_annotation_outside_body_does_not_apply() {
        let src = "\
// FERN_STYLE: allow(no-malloc)
void f(void) {
    malloc(1);
}
";
        let f = &extract(src)[0];
        assert!(f.allowed_rules.is_empty());
    }

    #[test]
    fn test_doc_comment_is_attached() {
        let src = "\
/** Returns one. @return 1 */
int one(void) {
    return 1;
}
";
        let f = &extract(src)[0];
        assert!(f.doc.is_present());
        assert!(f.doc.has_return_tag);
    }

    #[test]
    fn test_signature_inside_body_is_not_a_new_function() {
        let src = "\
void outer(void) {
int inner(void) {
    }
}
";
        let funcs = extract(src);
        assert_eq!(funcs.len(), 1);
        assert_eq!(funcs[0].end_line, 4);
    }
}
