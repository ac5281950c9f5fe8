use crate::rules::ids::RuleId;
use clap::{ArgAction, Args, Parser};
use std::path::PathBuf;

/// Help text for configuration file options, shown at the bottom of --help.
const CONFIG_HELP: &str = "\
RULES:
  assertion-density  function-length  no-malloc  no-free  bounded-loops
  doc-comment  doc-params  doc-return  no-raw-char  no-tagged-union

  Suppress inside a function:  // FERN_STYLE: allow(no-malloc, doc-style)

CONFIGURATION FILE (.fernstyle.toml):
  Create this file in your project root to set defaults.

  [fernstyle]
  paths = [\"src\", \"lib\"]     # Default inputs
  extensions = [\"c\"]          # Source file extensions
  lenient = false              # Downgrade doc/shape rules to warnings
  exclude_folders = [\"third_party\"]
  disable = [\"no-tagged-union\"]
  max_function_lines = 70
  min_assertions = 2

  [[fernstyle.checks]]         # Run before the style scan
  name = \"Build\"
  command = [\"make\", \"debug\"]
  fail_on_warnings = true
  timeout_secs = 300
";

/// Options for output formatting and verbosity.
#[derive(Args, Debug, Default, Clone)]
#[allow(clippy::struct_excessive_bools)] // CLI flags are legitimately booleans
pub struct OutputOptions {
    /// Show only the error and warning counts.
    #[arg(long)]
    pub summary: bool,

    /// Output raw JSON.
    #[arg(long, conflicts_with = "summary")]
    pub json: bool,

    /// Disable colored output.
    #[arg(long)]
    pub no_color: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors.
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Rule selection and thresholds.
#[derive(Args, Debug, Default, Clone)]
pub struct RuleOptions {
    /// Report documentation and shape rules as warnings; fail only on errors.
    #[arg(long)]
    pub lenient: bool,

    /// Disable a rule everywhere (repeatable).
    #[arg(long, value_name = "RULE")]
    pub disable: Vec<RuleId>,

    /// Set maximum allowed function lines (overrides config).
    #[arg(long)]
    pub max_lines: Option<usize>,

    /// Set minimum assertions per function (overrides config).
    #[arg(long)]
    pub min_assertions: Option<usize>,
}

/// Command line interface configuration using `clap`.
/// This struct defines the arguments and flags accepted by the program.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "FernStyle - structural FERN_STYLE compliance checker for C sources",
    long_about = None,
    after_help = CONFIG_HELP
)]
pub struct Cli {
    /// Files or directories to check (default: config `paths`, then `src lib`).
    pub paths: Vec<PathBuf>,

    /// Only run the style scan, skipping configured checks.
    #[arg(long)]
    pub style_only: bool,

    /// Rule options.
    #[command(flatten)]
    pub rules: RuleOptions,

    /// Output formatting options.
    #[command(flatten)]
    pub output: OutputOptions,

    /// Folders to exclude from discovery.
    #[arg(long, alias = "exclude-folder")]
    pub exclude_folders: Vec<String>,

    /// Folders to force-include in discovery (overrides default exclusions).
    #[arg(long, alias = "include-folder")]
    pub include_folders: Vec<String>,
}
