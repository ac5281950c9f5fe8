use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{
    ALT_CONFIG_FILENAME, CONFIG_FILENAME, DEFAULT_CHECK_TIMEOUT_SECS, DEFAULT_EXTENSION,
    DEFAULT_MAX_FUNCTION_LINES, DEFAULT_MIN_ASSERTIONS,
};
use crate::error::FernStyleError;
use crate::rules::ids::RuleId;
use crate::rules::{RuleConfig, SeverityMode};

#[derive(Debug, Deserialize, Default, Clone)]
/// Top-level configuration struct.
pub struct Config {
    #[serde(default)]
    /// The `[fernstyle]` table.
    pub fernstyle: FernStyleConfig,
    /// The file this was loaded from, `None` when using defaults.
    #[serde(skip)]
    pub config_file_path: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Default, Clone)]
/// Options of the `[fernstyle]` table.
pub struct FernStyleConfig {
    /// Paths scanned when none are given on the command line.
    pub paths: Option<Vec<String>>,
    /// Source file extensions, without the dot.
    pub extensions: Option<Vec<String>>,
    /// Use lenient severity mode.
    pub lenient: Option<bool>,
    /// Folders to exclude in addition to the defaults.
    pub exclude_folders: Option<Vec<String>>,
    /// Folders to force-include even if excluded.
    pub include_folders: Option<Vec<String>>,
    /// Rule names that are never evaluated.
    pub disable: Option<Vec<String>>,
    /// Maximum allowed function length.
    pub max_function_lines: Option<usize>,
    /// Minimum assertion lines per function.
    pub min_assertions: Option<usize>,
    /// External quality checks run before the style scan.
    #[serde(default)]
    pub checks: Vec<CheckConfig>,
}

/// One `[[fernstyle.checks]]` entry.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct CheckConfig {
    /// Display name, e.g. `Build`.
    pub name: String,
    /// Program followed by its arguments.
    pub command: Vec<String>,
    /// Treat `warning:` lines in the output as a failure.
    #[serde(default)]
    pub fail_on_warnings: bool,
    /// Seconds before the command is killed.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Regex whose first capture is appended to the success message.
    pub summary_pattern: Option<String>,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_CHECK_TIMEOUT_SECS
}

/// Rule settings given on the command line. They take precedence over the file.
#[derive(Debug, Clone, Default)]
pub struct RuleOverrides {
    /// `--lenient`.
    pub lenient: bool,
    /// `--disable` rules.
    pub disable: Vec<RuleId>,
    /// `--max-lines`.
    pub max_function_lines: Option<usize>,
    /// `--min-assertions`.
    pub min_assertions: Option<usize>,
}

impl Config {
    /// Loads configuration from the current directory upwards.
    ///
    /// # Errors
    ///
    /// See [`Config::load_from_path`].
    pub fn load() -> Result<Self, FernStyleError> {
        Self::load_from_path(Path::new("."))
    }

    /// Loads configuration starting from a specific path and traversing up.
    ///
    /// The first directory holding `.fernstyle.toml` or `fernstyle.toml` wins.
    /// No file at all yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file is found but cannot be read or parsed.
    pub fn load_from_path(path: &Path) -> Result<Self, FernStyleError> {
        let mut current = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        if current.is_file() {
            current.pop();
        }

        loop {
            for name in [CONFIG_FILENAME, ALT_CONFIG_FILENAME] {
                let candidate = current.join(name);
                if candidate.is_file() {
                    return Self::load_file(&candidate);
                }
            }
            if !current.pop() {
                break;
            }
        }

        Ok(Config::default())
    }

    fn load_file(path: &Path) -> Result<Self, FernStyleError> {
        let content = fs::read_to_string(path).map_err(|source| FernStyleError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config =
            toml::from_str::<Config>(&content).map_err(|source| FernStyleError::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?;
        tracing::debug!(path = %path.display(), "loaded config");
        config.config_file_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Source extensions to discover, defaulting to `c`.
    #[must_use]
    pub fn extensions(&self) -> Vec<String> {
        match &self.fernstyle.extensions {
            Some(exts) if !exts.is_empty() => exts
                .iter()
                .map(|e| e.trim_start_matches('.').to_owned())
                .collect(),
            _ => vec![DEFAULT_EXTENSION.to_owned()],
        }
    }

    /// Builds the immutable rule settings, applying CLI overrides on top.
    ///
    /// Unknown names in the file's `disable` list are logged and ignored.
    #[must_use]
    pub fn to_rule_config(&self, overrides: &RuleOverrides) -> RuleConfig {
        let cfg = &self.fernstyle;
        let lenient = overrides.lenient || cfg.lenient.unwrap_or(false);

        let mut disabled = rustc_hash::FxHashSet::default();
        for name in cfg.disable.iter().flatten() {
            match name.parse::<RuleId>() {
                Ok(rule) => {
                    disabled.insert(rule);
                }
                Err(err) => tracing::warn!("ignoring config disable entry: {err}"),
            }
        }
        disabled.extend(overrides.disable.iter().copied());

        RuleConfig {
            mode: if lenient {
                SeverityMode::Lenient
            } else {
                SeverityMode::Strict
            },
            disabled,
            max_function_lines: overrides
                .max_function_lines
                .or(cfg.max_function_lines)
                .unwrap_or(DEFAULT_MAX_FUNCTION_LINES),
            min_assertions: overrides
                .min_assertions
                .or(cfg.min_assertions)
                .unwrap_or(DEFAULT_MIN_ASSERTIONS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_load_from_path_no_config() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from_path(dir.path()).unwrap();
        assert!(config.config_file_path.is_none());
        assert!(config.fernstyle.checks.is_empty());
        assert_eq!(config.extensions(), vec!["c"]);
    }

    #[test]
    fn test_load_from_path_fernstyle_toml() {
        let dir = TempDir::new().unwrap();
        let mut file = std::fs::File::create(dir.path().join(".fernstyle.toml")).unwrap();
        writeln!(
            file,
            r#"[fernstyle]
lenient = true
max_function_lines = 40
extensions = ["c", ".h"]
"#
        )
        .unwrap();

        let config = Config::load_from_path(dir.path()).unwrap();
        assert_eq!(config.fernstyle.lenient, Some(true));
        assert_eq!(config.fernstyle.max_function_lines, Some(40));
        assert_eq!(config.extensions(), vec!["c", "h"]);
    }

    #[test]
    fn test_alt_filename_is_found() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("fernstyle.toml"), "[fernstyle]\nmin_assertions = 3\n")
            .unwrap();
        let config = Config::load_from_path(dir.path()).unwrap();
        assert_eq!(config.fernstyle.min_assertions, Some(3));
    }

    #[test]
    fn test_load_from_path_traverses_up() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("src").join("core");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join(".fernstyle.toml"), "[fernstyle]\nlenient = true\n")
            .unwrap();

        let config = Config::load_from_path(&nested).unwrap();
        assert_eq!(config.fernstyle.lenient, Some(true));
        assert_eq!(
            config.config_file_path,
            Some(dir.path().join(".fernstyle.toml"))
        );
    }

    #[test]
    fn test_load_from_file_path() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(".fernstyle.toml"), "[fernstyle]\nmin_assertions = 1\n")
            .unwrap();
        let source = dir.path().join("main.c");
        std::fs::write(&source, "int x;").unwrap();

        let config = Config::load_from_path(&source).unwrap();
        assert_eq!(config.fernstyle.min_assertions, Some(1));
    }

    #[test]
    fn test_parse_error_is_reported() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(".fernstyle.toml"), "[fernstyle\nlenient = ").unwrap();
        let err = Config::load_from_path(dir.path()).unwrap_err();
        assert!(matches!(err, FernStyleError::ConfigParse { .. }));
    }

    #[test]
    fn test_checks_table() {
        let content = r#"
[[fernstyle.checks]]
name = "Build"
command = ["make", "debug"]
fail_on_warnings = true

[[fernstyle.checks]]
name = "Tests"
command = ["make", "test"]
summary_pattern = "Passed: (\\d+)"
timeout_secs = 60
"#;
        let config = toml::from_str::<Config>(content).unwrap();
        let checks = &config.fernstyle.checks;
        assert_eq!(checks.len(), 2);
        assert!(checks[0].fail_on_warnings);
        assert_eq!(checks[0].timeout_secs, DEFAULT_CHECK_TIMEOUT_SECS);
        assert_eq!(checks[1].timeout_secs, 60);
        assert_eq!(checks[1].summary_pattern.as_deref(), Some("Passed: (\\d+)"));
    }

    #[test]
    fn test_rule_config_precedence() {
        let content = r#"
[fernstyle]
max_function_lines = 50
min_assertions = 3
disable = ["no-raw-char", "no-such-rule"]
"#;
        let config = toml::from_str::<Config>(content).unwrap();

        let from_file = config.to_rule_config(&RuleOverrides::default());
        assert_eq!(from_file.mode, SeverityMode::Strict);
        assert_eq!(from_file.max_function_lines, 50);
        assert_eq!(from_file.min_assertions, 3);
        assert_eq!(from_file.disabled.len(), 1);
        assert!(from_file.disabled.contains(&RuleId::NoRawChar));

        let overrides = RuleOverrides {
            lenient: true,
            disable: vec![RuleId::NoFree],
            max_function_lines: Some(90),
            min_assertions: None,
        };
        let merged = config.to_rule_config(&overrides);
        assert_eq!(merged.mode, SeverityMode::Lenient);
        assert_eq!(merged.max_function_lines, 90);
        assert_eq!(merged.min_assertions, 3);
        assert!(merged.disabled.contains(&RuleId::NoFree));
        assert!(merged.disabled.contains(&RuleId::NoRawChar));
    }

    #[test]
    fn test_defaults_without_file() {
        let rule_config = Config::default().to_rule_config(&RuleOverrides::default());
        assert_eq!(rule_config, RuleConfig::default());
    }
}
