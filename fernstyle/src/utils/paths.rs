//! Path utilities for FernStyle.
//!
//! This module consolidates all path-related logic for:
//! - Cross-platform path normalization for display
//! - Source file discovery with gitignore support
//! - Resolving the command-line inputs into a sorted file list

use crate::constants::DEFAULT_EXCLUDE_FOLDERS;
use crate::error::FernStyleError;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Normalizes a path for CLI display.
///
/// - Converts backslashes to forward slashes (for cross-platform consistency)
/// - Strips leading "./" or ".\" prefix (for cleaner output)
///
/// # Examples
/// ```
/// use std::path::Path;
/// use fernstyle::utils::normalize_display_path;
///
/// assert_eq!(normalize_display_path(Path::new(".\\src\\arena.c")), "src/arena.c");
/// assert_eq!(normalize_display_path(Path::new("./src/main.c")), "src/main.c");
/// ```
#[must_use]
pub fn normalize_display_path(path: &Path) -> String {
    let s = path.to_string_lossy();
    let clean = s.trim_start_matches(r"\\?\");
    let normalized = clean.replace('\\', "/");
    normalized
        .strip_prefix("./")
        .unwrap_or(&normalized)
        .to_owned()
}

/// Checks if a name matches any exclusion pattern.
/// Supports exact matching and wildcard patterns starting with `*.`.
#[must_use]
pub fn is_excluded(name: &str, excludes: &[String]) -> bool {
    excludes.iter().any(|exclude| match exclude.strip_prefix('*') {
        Some(suffix) if suffix.starts_with('.') => name.ends_with(suffix),
        _ => name == exclude,
    })
}

/// Whether `path` carries one of the source `extensions`.
#[must_use]
pub fn has_source_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|e| e == ext))
}

/// Collects source files under `root` with gitignore support.
///
/// Uses the `ignore` crate to respect .gitignore, .git/info/exclude and the
/// global gitignore, in addition to the default exclusions (`build`,
/// `target`, `vendor`, ...).
///
/// # Arguments
/// * `root` - Root directory to search
/// * `exclude` - Additional user-specified exclusion patterns
/// * `include` - Folders to force-include (overrides excludes)
/// * `extensions` - Source extensions without the dot
#[must_use]
pub fn collect_source_files(
    root: &Path,
    exclude: &[String],
    include: &[String],
    extensions: &[String],
) -> Vec<PathBuf> {
    use ignore::WalkBuilder;

    let default_excludes = DEFAULT_EXCLUDE_FOLDERS().iter().map(|&s| s.to_owned());
    let mut all_excludes: Vec<String> = exclude.iter().cloned().chain(default_excludes).collect();
    all_excludes.retain(|ex| !include.iter().any(|inc| ex == inc));

    let root_for_filter = root.to_path_buf();

    // Excluded directories are pruned at traversal time.
    let walker = WalkBuilder::new(root)
        .hidden(false)
        .git_ignore(true)
        .git_global(true)
        .git_exclude(true)
        .filter_entry(move |entry| {
            if entry.path() == root_for_filter {
                return true;
            }
            if !entry.file_type().is_some_and(|ft| ft.is_dir()) {
                return true;
            }
            !entry
                .file_name()
                .to_str()
                .is_some_and(|name| is_excluded(name, &all_excludes))
        })
        .build();

    let mut files = Vec::new();
    for result in walker {
        match result {
            Ok(entry) => {
                let path = entry.path();
                if entry.file_type().is_some_and(|ft| ft.is_file())
                    && has_source_extension(path, extensions)
                {
                    files.push(path.to_path_buf());
                }
            }
            Err(e) => tracing::debug!("walk error: {e}"),
        }
    }

    files.sort();
    files
}

/// Resolves input paths into the sorted, de-duplicated list of files to scan.
///
/// Directories are walked recursively. A file named directly is kept only if it
/// has a source extension. When `explicit` is false the paths are defaults, and
/// missing ones are skipped instead of reported.
///
/// # Errors
///
/// Returns [`FernStyleError::MissingPath`] for an explicit path that does not exist.
pub fn resolve_inputs(
    paths: &[PathBuf],
    explicit: bool,
    exclude: &[String],
    include: &[String],
    extensions: &[String],
) -> Result<Vec<PathBuf>, FernStyleError> {
    let mut files = BTreeSet::new();

    for path in paths {
        if path.is_dir() {
            files.extend(collect_source_files(path, exclude, include, extensions));
        } else if path.is_file() {
            if has_source_extension(path, extensions) {
                files.insert(path.clone());
            } else {
                tracing::debug!(path = %path.display(), "skipping non-source file");
            }
        } else if explicit {
            return Err(FernStyleError::MissingPath(path.clone()));
        } else {
            tracing::debug!(path = %path.display(), "default path not found, skipping");
        }
    }

    Ok(files.into_iter().collect())
}
