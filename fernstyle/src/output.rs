use crate::analyzer::{AnalysisResult, AnalysisSummary};
use crate::checks::CheckResult;
use crate::constants::STYLE_NAME;
use crate::rules::{Severity, SeverityMode, Violation};
use crate::utils::{normalize_display_path, pluralize};
use colored::Colorize;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;
use std::time::Duration;

/// Create a progress bar with file count.
///
/// In test mode, returns a hidden progress bar to avoid polluting test output.
#[must_use]
pub fn create_progress_bar(total_files: u64) -> ProgressBar {
    if cfg!(test) {
        return ProgressBar::hidden();
    }

    let pb =
        ProgressBar::with_draw_target(Some(total_files), ProgressDrawTarget::stderr_with_hz(20));
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓░"),
    );
    pb.set_message("checking...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Print the main header with box-drawing characters.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_header(writer: &mut impl Write, mode: SeverityMode) -> std::io::Result<()> {
    writeln!(writer)?;
    writeln!(writer, "{}", "╔════════════════════════════════════════╗".blue())?;
    writeln!(writer, "{}", "║  Fern Quality Checker                  ║".blue().bold())?;
    writeln!(writer, "{}", "╚════════════════════════════════════════╝".blue())?;
    writeln!(writer, "{}", format!("   {mode} mode").dimmed())?;
    writeln!(writer)?;
    Ok(())
}

/// Print a bold section title.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_section(writer: &mut impl Write, title: &str) -> std::io::Result<()> {
    writeln!(writer, "{}\n", title.cyan().bold())
}

/// Print the outcome of one external check.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_check_result(writer: &mut impl Write, result: &CheckResult) -> std::io::Result<()> {
    if result.success {
        writeln!(writer, "  {}   {}", "OK".green().bold(), result.message)?;
    } else {
        writeln!(writer, "  {} {}", "FAIL".red().bold(), result.message)?;
        for line in &result.details {
            writeln!(writer, "       {}", line.dimmed())?;
        }
    }
    Ok(())
}

/// Helper to create a styled table
fn create_table(headers: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(headers);
    if !colored::control::SHOULD_COLORIZE.should_colorize() {
        table.force_no_tty();
    }
    table
}

fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Error => Color::Red,
        Severity::Warning => Color::Yellow,
    }
}

/// Label for the function column: `name()` or `file` for file-level violations.
fn function_label(v: &Violation) -> String {
    if v.is_file_level() {
        "file".to_owned()
    } else {
        format!("{}()", v.function)
    }
}

/// Format the closing summary, e.g. `3 errors, 1 warning in 2 files`.
///
/// Zero counts are left out.
#[must_use]
pub fn format_trailer(errors: usize, warnings: usize, files: usize) -> String {
    let mut parts = Vec::new();
    if errors > 0 {
        parts.push(pluralize(errors, "error"));
    }
    if warnings > 0 {
        parts.push(pluralize(warnings, "warning"));
    }
    format!("{} in {}", parts.join(", "), pluralize(files, "file"))
}

/// Print violations grouped by file, one table per file.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_violations(writer: &mut impl Write, result: &AnalysisResult) -> std::io::Result<()> {
    let summary = &result.summary;
    if result.violations.is_empty() {
        let message = format!(
            "All {} pass {STYLE_NAME} checks",
            pluralize(summary.files_checked, "file")
        );
        writeln!(writer, "{}", message.green().bold())?;
        return Ok(());
    }

    let mut by_file: BTreeMap<&Path, Vec<&Violation>> = BTreeMap::new();
    for v in &result.violations {
        by_file.entry(v.file.as_path()).or_default().push(v);
    }

    for (file, violations) in by_file {
        writeln!(writer, "{}", normalize_display_path(file).bold().underline())?;

        let mut table = create_table(vec!["", "Function", "Line", "Rule", "Message"]);
        for v in violations {
            let color = severity_color(v.severity);
            table.add_row(vec![
                Cell::new(v.severity.indicator())
                    .fg(color)
                    .add_attribute(Attribute::Bold),
                Cell::new(function_label(v)).fg(Color::Yellow),
                Cell::new(v.line)
                    .set_alignment(CellAlignment::Right)
                    .add_attribute(Attribute::Dim),
                Cell::new(v.rule).fg(Color::Magenta),
                Cell::new(&v.message).fg(color),
            ]);
        }
        writeln!(writer, "{table}\n")?;
    }

    let trailer = format_trailer(summary.errors, summary.warnings, summary.files_with_violations);
    if summary.errors > 0 {
        writeln!(writer, "{}", trailer.red().bold())?;
    } else {
        writeln!(writer, "{}", trailer.yellow().bold())?;
    }
    Ok(())
}

/// Print the condensed single-line result.
///
/// A run that found no files says so instead of reporting a pass.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_summary_line(writer: &mut impl Write, summary: &AnalysisSummary) -> std::io::Result<()> {
    if summary.files_checked == 0 {
        print_files_checked(writer, 0)
    } else if summary.errors + summary.warnings == 0 {
        let message = format!("All files pass {STYLE_NAME} checks");
        writeln!(writer, "{}", message.green())
    } else {
        let message = format!("{} errors, {} warnings", summary.errors, summary.warnings);
        writeln!(writer, "{}", message.red())
    }
}

/// Print the files-checked line of the style section.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_files_checked(writer: &mut impl Write, files: usize) -> std::io::Result<()> {
    if files == 0 {
        writeln!(writer, "{}", "No source files found to check".yellow())
    } else {
        writeln!(writer, "Checked {}\n", pluralize(files, "file").bold())
    }
}

/// Print the final pass/fail banner.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_final_status(writer: &mut impl Write, passed: bool) -> std::io::Result<()> {
    writeln!(writer)?;
    if passed {
        writeln!(writer, "{}", "All checks passed!".green().bold())
    } else {
        writeln!(
            writer,
            "{}",
            "Checks failed - fix issues before committing".red().bold()
        )
    }
}

/// Print the result as pretty JSON.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn print_json(writer: &mut impl Write, result: &AnalysisResult) -> std::io::Result<()> {
    let json = serde_json::to_string_pretty(result)?;
    writeln!(writer, "{json}")
}
