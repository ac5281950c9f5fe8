use crate::analyzer::StyleChecker;
use crate::checks::{build_checks, run_checks, CheckResult};
use crate::cli::Cli;
use crate::config::{Config, RuleOverrides};
use crate::constants::{DEFAULT_PATHS, STYLE_NAME};
use crate::error::{exit_code, FernStyleError};
use crate::output;
use anyhow::Result;
use clap::Parser;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Installs the stderr log subscriber.
///
/// `RUST_LOG` takes precedence over the verbosity flags. Repeated calls in the
/// same process keep the first subscriber.
pub fn init_logging(verbose: u8, quiet: bool) {
    let default = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        (false, _) => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Runs the checker with the given arguments, writing output to stdout.
///
/// # Errors
///
/// Returns an error if writing the output fails.
pub fn run_with_args(args: Vec<String>) -> Result<i32> {
    run_with_args_to(args, &mut std::io::stdout())
}

/// Run FernStyle with the given arguments, writing output to the specified writer.
///
/// This is the testable version of `run_with_args` that allows output capture.
/// Returns the process exit code.
///
/// # Errors
///
/// Returns an error if writing the output fails.
pub fn run_with_args_to<W: std::io::Write>(args: Vec<String>, writer: &mut W) -> Result<i32> {
    let mut program_args = vec!["fernstyle".to_owned()];
    program_args.extend(args);
    let cli = match Cli::try_parse_from(program_args) {
        Ok(c) => c,
        Err(e) => match e.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                write!(writer, "{e}")?;
                writer.flush()?;
                return Ok(exit_code::PASS);
            }
            _ => {
                eprint!("{e}");
                return Ok(exit_code::CONFIG_ERROR);
            }
        },
    };

    if cli.output.no_color {
        colored::control::set_override(false);
    }
    init_logging(cli.output.verbose, cli.output.quiet);

    match run(&cli, writer) {
        Ok(code) => Ok(code),
        Err(err) => match err.downcast_ref::<FernStyleError>() {
            Some(fern_err) => {
                eprintln!("Error: {fern_err}");
                Ok(fern_err.exit_code())
            }
            None => Err(err),
        },
    }
}

fn run<W: std::io::Write>(cli: &Cli, writer: &mut W) -> Result<i32> {
    let config_root = cli.paths.first().map_or(Path::new("."), PathBuf::as_path);
    let config = Config::load_from_path(config_root)?;

    let overrides = RuleOverrides {
        lenient: cli.rules.lenient,
        disable: cli.rules.disable.clone(),
        max_function_lines: cli.rules.max_lines,
        min_assertions: cli.rules.min_assertions,
    };
    let rule_config = config.to_rule_config(&overrides);
    let mode = rule_config.mode;

    let explicit = !cli.paths.is_empty();
    let paths: Vec<PathBuf> = if explicit {
        cli.paths.clone()
    } else {
        config
            .fernstyle
            .paths
            .clone()
            .unwrap_or_else(|| DEFAULT_PATHS.iter().map(|&p| p.to_owned()).collect())
            .into_iter()
            .map(PathBuf::from)
            .collect()
    };

    let mut exclude_folders = config.fernstyle.exclude_folders.clone().unwrap_or_default();
    exclude_folders.extend(cli.exclude_folders.iter().cloned());
    let mut include_folders = config.fernstyle.include_folders.clone().unwrap_or_default();
    include_folders.extend(cli.include_folders.iter().cloned());

    let checker = StyleChecker::new(rule_config)
        .with_excludes(exclude_folders)
        .with_includes(include_folders)
        .with_extensions(config.extensions());
    let files = checker.resolve_files(&paths, explicit)?;

    let checks = if cli.style_only {
        Vec::new()
    } else {
        build_checks(&config.fernstyle.checks)?
    };

    let report_mode = !cli.output.json && !cli.output.summary;
    if report_mode {
        output::print_header(writer, mode)?;
    }

    let mut check_results: Vec<CheckResult> = Vec::new();
    if !checks.is_empty() {
        if report_mode {
            output::print_section(writer, "Build & Test")?;
        }
        check_results = run_checks(&checks);
        for result in &check_results {
            if cli.output.json {
                if !result.success {
                    eprintln!("{}: {}", result.name, result.message);
                }
            } else {
                output::print_check_result(writer, result)?;
            }
        }
        if report_mode {
            writeln!(writer)?;
        }
    }
    let checks_passed = check_results.iter().all(|r| r.success);

    let checker = if report_mode && std::io::stderr().is_terminal() {
        let pb = Arc::new(output::create_progress_bar(files.len() as u64));
        checker.with_progress_bar(pb)
    } else {
        checker
    };
    let result = checker.check_files(&files);
    if let Some(pb) = &checker.progress_bar {
        pb.finish_and_clear();
    }

    if cli.output.json {
        output::print_json(writer, &result)?;
    } else if cli.output.summary {
        output::print_summary_line(writer, &result.summary)?;
    } else {
        output::print_section(writer, &format!("{STYLE_NAME} Compliance"))?;
        output::print_files_checked(writer, result.summary.files_checked)?;
        if result.summary.files_checked > 0 {
            output::print_violations(writer, &result)?;
        }
        output::print_final_status(writer, checks_passed && result.summary.passed)?;
    }
    writer.flush()?;

    if checks_passed && result.summary.passed {
        Ok(exit_code::PASS)
    } else {
        Ok(exit_code::VIOLATIONS)
    }
}
