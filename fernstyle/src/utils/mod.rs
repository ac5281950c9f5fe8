//! Utilities module for FernStyle.

mod paths;

pub use paths::{
    collect_source_files, has_source_extension, is_excluded, normalize_display_path,
    resolve_inputs,
};

/// Returns `word` or its plural form depending on `count`.
///
/// # Examples
/// ```
/// use fernstyle::utils::pluralize;
///
/// assert_eq!(pluralize(1, "error"), "1 error");
/// assert_eq!(pluralize(3, "file"), "3 files");
/// ```
#[must_use]
pub fn pluralize(count: usize, word: &str) -> String {
    if count == 1 {
        format!("{count} {word}")
    } else {
        format!("{count} {word}s")
    }
}
