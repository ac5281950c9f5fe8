use regex::Regex;
use rustc_hash::FxHashSet;
use std::sync::OnceLock;

/// Name of the project-level configuration file.
pub const CONFIG_FILENAME: &str = ".fernstyle.toml";

/// Alternative, non-hidden configuration file name.
pub const ALT_CONFIG_FILENAME: &str = "fernstyle.toml";

/// Source roots scanned when neither the command line nor the config names any.
pub const DEFAULT_PATHS: &[&str] = &["src", "lib"];

/// File extension of source files discovered under directory roots.
pub const DEFAULT_EXTENSION: &str = "c";

/// How many lines above a declaration are searched for its doc comment.
pub const DOC_SEARCH_WINDOW: usize = 30;

/// A line-run doc comment needs more than this many non-whitespace characters
/// to count as a description.
pub const DOC_DESCRIPTION_MIN_CHARS: usize = 5;

/// Default maximum function length, measured as `end_line - start_line`.
pub const DEFAULT_MAX_FUNCTION_LINES: usize = 70;

/// Default minimum number of assertion lines per function.
pub const DEFAULT_MIN_ASSERTIONS: usize = 2;

/// Default timeout for external command checks.
pub const DEFAULT_CHECK_TIMEOUT_SECS: u64 = 300;

/// Maximum number of detail lines kept from an external check's output.
pub const MAX_CHECK_DETAILS: usize = 10;

/// Name of the style guide, as used in annotations and report banners.
pub const STYLE_NAME: &str = "FERN_STYLE";

/// Regex for inline suppression annotations: `// FERN_STYLE: allow(rule-a, rule-b)`.
///
/// # Panics
///
/// Panics if the regex pattern is invalid.
pub fn get_allow_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    #[allow(clippy::expect_used)]
    RE.get_or_init(|| {
        Regex::new(r"(?://|/\*)\s*FERN_STYLE:\s*allow\(([^)]+)\)")
            .expect("Invalid allow annotation regex pattern")
    })
}

/// Regex recognizing a function signature line that opens its body.
///
/// # Panics
///
/// Panics if the regex pattern is invalid.
pub fn get_signature_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    #[allow(clippy::expect_used)]
    RE.get_or_init(|| {
        Regex::new(r"^(?:static\s+)?(?:inline\s+)?(?:[\w\*]+\s+)+(\w+)\s*\([^)]*\)\s*\{")
            .expect("Invalid signature regex pattern")
    })
}

/// Regex for an assertion call.
///
/// # Panics
///
/// Panics if the regex pattern is invalid.
pub fn get_assert_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    #[allow(clippy::expect_used)]
    RE.get_or_init(|| Regex::new(r"\bassert\s*\(").expect("Invalid assert regex pattern"))
}

/// Regex for loop shapes that are unbounded regardless of their condition.
///
/// # Panics
///
/// Panics if the regex pattern is invalid.
pub fn get_forever_loop_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    #[allow(clippy::expect_used)]
    RE.get_or_init(|| {
        Regex::new(r"\bwhile\s*\(\s*(?:1|true)\s*\)|\bfor\s*\(\s*;\s*;\s*\)")
            .expect("Invalid forever loop regex pattern")
    })
}

/// Regex capturing the condition of a `while` loop.
///
/// # Panics
///
/// Panics if the regex pattern is invalid.
pub fn get_while_condition_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    #[allow(clippy::expect_used)]
    RE.get_or_init(|| {
        Regex::new(r"\bwhile\s*\(([^)]+)\)").expect("Invalid while condition regex pattern")
    })
}

/// Regex for heap allocation calls.
///
/// # Panics
///
/// Panics if the regex pattern is invalid.
pub fn get_alloc_call_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    #[allow(clippy::expect_used)]
    RE.get_or_init(|| {
        Regex::new(r"\b(?:malloc|calloc|realloc)\s*\(").expect("Invalid allocation regex pattern")
    })
}

/// Regex for heap deallocation calls.
///
/// # Panics
///
/// Panics if the regex pattern is invalid.
pub fn get_free_call_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    #[allow(clippy::expect_used)]
    RE.get_or_init(|| Regex::new(r"\bfree\s*\(").expect("Invalid free regex pattern"))
}

/// Regex for a hand-written tagged union: an inline anonymous enum followed by
/// a discriminant field.
///
/// # Panics
///
/// Panics if the regex pattern is invalid.
pub fn get_tagged_union_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    #[allow(clippy::expect_used)]
    RE.get_or_init(|| {
        Regex::new(r"\benum\s*\{[^}]+\}\s*(?:kind|tag|type)\s*;")
            .expect("Invalid tagged union regex pattern")
    })
}

/// Regex for `@param` tags inside doc comments.
///
/// # Panics
///
/// Panics if the regex pattern is invalid.
pub fn get_param_tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    #[allow(clippy::expect_used)]
    RE.get_or_init(|| {
        Regex::new(r"@param\s+(\w+|\.\.\.)").expect("Invalid param tag regex pattern")
    })
}

/// Regex for `@return` / `@returns` tags inside doc comments.
///
/// # Panics
///
/// Panics if the regex pattern is invalid.
pub fn get_return_tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    #[allow(clippy::expect_used)]
    RE.get_or_init(|| Regex::new(r"@returns?\b").expect("Invalid return tag regex pattern"))
}

/// Regex for a `char` pointer in a parameter list.
///
/// # Panics
///
/// Panics if the regex pattern is invalid.
pub fn get_char_pointer_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    #[allow(clippy::expect_used)]
    RE.get_or_init(|| Regex::new(r"\bchar\s*\*").expect("Invalid char pointer regex pattern"))
}

/// Regex for array suffixes in parameter declarations (`argv[]`, `buf[16]`).
///
/// # Panics
///
/// Panics if the regex pattern is invalid.
pub fn get_array_suffix_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    #[allow(clippy::expect_used)]
    RE.get_or_init(|| Regex::new(r"\[[^\]]*\]").expect("Invalid array suffix regex pattern"))
}

/// Set of folders to exclude by default.
pub fn get_default_exclude_folders() -> &'static FxHashSet<&'static str> {
    static SET: OnceLock<FxHashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| {
        let mut s = FxHashSet::default();
        s.insert(".git");
        s.insert("build");
        s.insert("target");
        s.insert("node_modules");
        s.insert("vendor");
        s
    })
}

pub use get_alloc_call_re as ALLOC_CALL_RE;
pub use get_allow_re as ALLOW_RE;
pub use get_array_suffix_re as ARRAY_SUFFIX_RE;
pub use get_assert_re as ASSERT_RE;
pub use get_char_pointer_re as CHAR_POINTER_RE;
pub use get_default_exclude_folders as DEFAULT_EXCLUDE_FOLDERS;
pub use get_forever_loop_re as FOREVER_LOOP_RE;
pub use get_free_call_re as FREE_CALL_RE;
pub use get_param_tag_re as PARAM_TAG_RE;
pub use get_return_tag_re as RETURN_TAG_RE;
pub use get_signature_re as SIGNATURE_RE;
pub use get_tagged_union_re as TAGGED_UNION_RE;
pub use get_while_condition_re as WHILE_CONDITION_RE;
