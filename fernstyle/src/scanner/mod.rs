//! Structural scanner for C source text.
//!
//! This module finds function definitions without parsing the language:
//! - `literals`: blanks string and char literal contents
//! - `annotations`: `FERN_STYLE: allow(...)` suppressions
//! - `doc_comment`: doc comment lookup above a declaration
//! - `signature`: parameter names, return type, `char *` detection
//! - `extractor`: the brace-depth state machine producing [`Function`] records

/// Inline suppression annotations.
pub mod annotations;
/// Doc comment association.
pub mod doc_comment;
/// Function boundary extraction.
pub mod extractor;
/// Literal masking.
pub mod literals;
/// Signature analysis.
pub mod signature;

pub use annotations::{parse_allow_annotation, SuppressionSet};
pub use doc_comment::{find_doc_comment, DocComment};
pub use extractor::{extract_functions, is_unbounded_loop, Function};
pub use literals::mask_literals;
pub use signature::{extract_param_names, extract_return_type, SignatureInfo};

/// Extracts all functions from the full text of a source file.
#[must_use]
pub fn scan_source(source: &str) -> Vec<Function> {
    let lines: Vec<&str> = source.lines().collect();
    extract_functions(&lines)
}
