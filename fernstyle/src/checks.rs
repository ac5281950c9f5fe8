//! External quality checks run before the style scan.
//!
//! A check is anything that can report pass or fail with a message, such as
//! a build or a test suite. Checks come from `[[fernstyle.checks]]` entries.

use crate::config::CheckConfig;
use crate::constants::MAX_CHECK_DETAILS;
use crate::error::FernStyleError;
use regex::Regex;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

/// Outcome of one quality check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    /// Display name of the check.
    pub name: String,
    /// Whether the check passed.
    pub success: bool,
    /// One-line outcome.
    pub message: String,
    /// Selected output lines explaining a failure.
    pub details: Vec<String>,
}

impl CheckResult {
    fn passed(name: &str, message: String) -> Self {
        Self {
            name: name.to_owned(),
            success: true,
            message,
            details: Vec::new(),
        }
    }

    fn failed(name: &str, message: String, details: Vec<String>) -> Self {
        Self {
            name: name.to_owned(),
            success: false,
            message,
            details,
        }
    }
}

/// A pass/fail check run before the style scan.
pub trait QualityCheck: Send + Sync {
    /// Display name.
    fn name(&self) -> &str;
    /// Runs the check to completion.
    fn run(&self) -> CheckResult;
}

/// A check backed by an external command.
#[derive(Debug, Clone)]
pub struct CommandCheck {
    name: String,
    command: Vec<String>,
    fail_on_warnings: bool,
    timeout: Duration,
    summary_pattern: Option<Regex>,
}

/// Captured result of a finished command.
struct CommandOutput {
    success: bool,
    text: String,
}

impl CommandCheck {
    /// Builds a check from its config entry.
    ///
    /// # Errors
    ///
    /// Returns [`FernStyleError::InvalidPattern`] if `summary_pattern` is not a valid regex.
    pub fn from_config(config: &CheckConfig) -> Result<Self, FernStyleError> {
        let summary_pattern = config
            .summary_pattern
            .as_deref()
            .map(|pattern| {
                Regex::new(pattern).map_err(|source| FernStyleError::InvalidPattern {
                    pattern: pattern.to_owned(),
                    source,
                })
            })
            .transpose()?;

        Ok(Self {
            name: config.name.clone(),
            command: config.command.clone(),
            fail_on_warnings: config.fail_on_warnings,
            timeout: Duration::from_secs(config.timeout_secs),
            summary_pattern,
        })
    }

    /// Overrides the timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn command_line(&self) -> String {
        self.command.join(" ")
    }

    /// Runs the command, returning `Ok(None)` on timeout.
    ///
    /// The timeout covers both process exit and draining its output, so a
    /// background child still holding the pipes cannot stall the run.
    fn execute(&self) -> Result<Option<CommandOutput>, FernStyleError> {
        let spawn_error = |source: std::io::Error| FernStyleError::CommandSpawn {
            command: self.command_line(),
            source,
        };
        let Some((program, args)) = self.command.split_first() else {
            return Err(spawn_error(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "empty command",
            )));
        };

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(spawn_error)?;

        let result = runtime.block_on(async {
            tokio::time::timeout(
                self.timeout,
                Command::new(program)
                    .args(args)
                    .stdin(Stdio::null())
                    .kill_on_drop(true)
                    .output(),
            )
            .await
        });

        match result {
            Ok(Ok(output)) => {
                let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
                text.push_str(&String::from_utf8_lossy(&output.stderr));
                Ok(Some(CommandOutput {
                    success: output.status.success(),
                    text,
                }))
            }
            Ok(Err(source)) => Err(spawn_error(source)),
            Err(_elapsed) => Ok(None),
        }
    }

    fn evaluate(&self, output: &CommandOutput) -> CheckResult {
        if !output.success {
            let details = matching_lines(&output.text, |lower| lower.contains("error"));
            return CheckResult::failed(&self.name, format!("{} failed", self.name), details);
        }

        if self.fail_on_warnings {
            let details = matching_lines(&output.text, |lower| {
                lower.contains("warning:") || lower.contains("error:")
            });
            if !details.is_empty() {
                let message = format!("{} has warnings", self.name);
                return CheckResult::failed(&self.name, message, details);
            }
        }

        let capture = self
            .summary_pattern
            .as_ref()
            .and_then(|re| re.captures(&output.text))
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_owned());
        let message = match capture {
            Some(capture) => format!("{} passed ({capture})", self.name),
            None => format!("{} passed", self.name),
        };
        CheckResult::passed(&self.name, message)
    }
}

impl QualityCheck for CommandCheck {
    fn name(&self) -> &str {
        &self.name
    }

    fn run(&self) -> CheckResult {
        tracing::debug!(check = %self.name, command = %self.command_line(), "running check");
        let result = match self.execute() {
            Ok(Some(output)) => self.evaluate(&output),
            Ok(None) => CheckResult::failed(
                &self.name,
                format!("Command timed out after {}s", self.timeout.as_secs()),
                Vec::new(),
            ),
            Err(err) => CheckResult::failed(&self.name, err.to_string(), Vec::new()),
        };
        tracing::info!(check = %result.name, success = result.success, "{}", result.message);
        result
    }
}

/// Output lines whose lowercased text satisfies `pred`, capped at [`MAX_CHECK_DETAILS`].
fn matching_lines(text: &str, pred: impl Fn(&str) -> bool) -> Vec<String> {
    text.lines()
        .filter(|line| pred(&line.to_lowercase()))
        .take(MAX_CHECK_DETAILS)
        .map(str::to_owned)
        .collect()
}

/// Builds the checks configured in `configs`.
///
/// # Errors
///
/// Returns the first configuration error.
pub fn build_checks(
    configs: &[CheckConfig],
) -> Result<Vec<Box<dyn QualityCheck>>, FernStyleError> {
    configs
        .iter()
        .map(|c| {
            let check = CommandCheck::from_config(c)?;
            Ok(Box::new(check) as Box<dyn QualityCheck>)
        })
        .collect()
}

/// Runs every check in order.
#[must_use]
pub fn run_checks(checks: &[Box<dyn QualityCheck>]) -> Vec<CheckResult> {
    checks.iter().map(|check| check.run()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    fn config(name: &str, command: &[&str]) -> CheckConfig {
        CheckConfig {
            name: name.to_owned(),
            command: command.iter().map(|s| (*s).to_owned()).collect(),
            fail_on_warnings: false,
            timeout_secs: 30,
            summary_pattern: None,
        }
    }

    fn output(success: bool, text: &str) -> CommandOutput {
        CommandOutput {
            success,
            text: text.to_owned(),
        }
    }

    #[test]
    fn test_invalid_summary_pattern() {
        let mut cfg = config("Tests", &["true"]);
        cfg.summary_pattern = Some("Passed: (".to_owned());
        let err = CommandCheck::from_config(&cfg).unwrap_err();
        assert!(matches!(err, FernStyleError::InvalidPattern { .. }));
    }

    #[test]
    fn test_failure_details_are_error_lines() {
        let check = CommandCheck::from_config(&config("Build", &["make"])).unwrap();
        let mut text = String::from("cc -c a.c\n");
        for i in 0..15 {
            text.push_str(&format!("a.c:{i}: error: boom\n"));
        }
        let result = check.evaluate(&output(false, &text));
        assert!(!result.success);
        assert_eq!(result.message, "Build failed");
        assert_eq!(result.details.len(), MAX_CHECK_DETAILS);
        assert!(result.details.iter().all(|d| d.contains("error:")));
    }

    #[test]
    fn test_warnings_fail_only_when_enabled() {
        let text = "a.c:3: warning: unused variable\n";
        let lax = CommandCheck::from_config(&config("Build", &["make"])).unwrap();
        assert!(lax.evaluate(&output(true, text)).success);

        let mut cfg = config("Build", &["make"]);
        cfg.fail_on_warnings = true;
        let strict = CommandCheck::from_config(&cfg).unwrap();
        let result = strict.evaluate(&output(true, text));
        assert!(!result.success);
        assert_eq!(result.message, "Build has warnings");
        assert_eq!(result.details, vec!["a.c:3: warning: unused variable"]);
    }

    #[test]
    fn test_summary_capture() {
        let mut cfg = config("Tests", &["make", "test"]);
        cfg.summary_pattern = Some(r"Passed:\s*(\d+)".to_owned());
        let check = CommandCheck::from_config(&cfg).unwrap();
        let result = check.evaluate(&output(true, "running\nPassed: 42\nFailed: 0\n"));
        assert_eq!(result.message, "Tests passed (42)");

        let plain = check.evaluate(&output(true, "ok\n"));
        assert_eq!(plain.message, "Tests passed");
    }

    #[test]
    fn test_empty_command_fails() {
        let check = CommandCheck::from_config(&config("Nothing", &[])).unwrap();
        let result = check.run();
        assert!(!result.success);
        assert!(result.message.contains("empty command"));
    }

    #[test]
    fn test_missing_program_fails() {
        let check =
            CommandCheck::from_config(&config("Ghost", &["fernstyle-no-such-program-xyz"])).unwrap();
        let result = check.run();
        assert!(!result.success);
        assert!(result.message.starts_with("failed to run 'fernstyle-no-such-program-xyz'"));
    }

    #[cfg(unix)]
    #[test]
    fn test_command_success_and_failure() {
        let ok = CommandCheck::from_config(&config("Echo", &["sh", "-c", "echo hi"])).unwrap();
        assert_eq!(ok.run().message, "Echo passed");

        let bad = CommandCheck::from_config(&config(
            "Build",
            &["sh", "-c", "echo 'x.c:1: error: nope' >&2; exit 2"],
        ))
        .unwrap();
        let result = bad.run();
        assert!(!result.success);
        assert_eq!(result.details, vec!["x.c:1: error: nope"]);
    }

    #[test]
    fn test_failure_details_ignore_case() {
        let check = CommandCheck::from_config(&config("Tests", &["make", "test"])).unwrap();
        let text = "running 3 tests\nERROR: t1 crashed\nAssertionError in t2\nok t3\n";
        let result = check.evaluate(&output(false, text));
        assert_eq!(
            result.details,
            vec!["ERROR: t1 crashed", "AssertionError in t2"]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_background_child_does_not_outlive_timeout() {
        let check = CommandCheck::from_config(&config("Bg", &["sh", "-c", "sleep 4 & echo hi"]))
            .unwrap()
            .with_timeout(Duration::from_millis(300));
        let start = Instant::now();
        let result = check.run();
        assert!(start.elapsed() < Duration::from_secs(3));
        assert!(!result.success);
        assert_eq!(result.message, "Command timed out after 0s");
    }

    #[cfg(unix)]
    #[test]
    fn test_command_timeout() {
        let check = CommandCheck::from_config(&config("Slow", &["sh", "-c", "sleep 5"]))
            .unwrap()
            .with_timeout(Duration::from_millis(200));
        let start = Instant::now();
        let result = check.run();
        assert!(!result.success);
        assert_eq!(result.message, "Command timed out after 0s");
        assert!(start.elapsed() < Duration::from_secs(4));
    }

    #[cfg(unix)]
    #[test]
    fn test_run_checks_in_order() {
        let checks = build_checks(&[
            config("First", &["sh", "-c", "true"]),
            config("Second", &["sh", "-c", "false"]),
        ])
        .unwrap();
        let results = run_checks(&checks);
        let names: Vec<&str> = results.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["First", "Second"]);
        assert!(results[0].success);
        assert!(!results[1].success);
    }
}
