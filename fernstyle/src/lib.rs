//! Core library for the `FernStyle` structural style checker.
//!
//! This library scans C sources with line-oriented heuristics, extracts function
//! definitions, and checks them against the FERN_STYLE rule set. It can also run
//! configured build and test commands before the style scan.

#![allow(
    clippy::similar_names,
    clippy::format_push_string,
    clippy::map_unwrap_or,
    clippy::items_after_statements
)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

/// Module containing the core analyzer logic.
/// This includes the `StyleChecker` struct and its methods for running a check.
pub mod analyzer;

/// Module for running external build and test commands.
pub mod checks;

/// Module defining the command-line interface arguments and structs.
pub mod cli;

/// Module for loading configuration.
pub mod config;

/// Module containing shared constants and regex patterns.
pub mod constants;

/// Module defining the entry point logic shared by both binaries.
pub mod entry_point;

/// Error types and process exit codes.
pub mod error;

/// Module for rich CLI output formatting with colored text and tables.
pub mod output;

/// Module containing the FERN_STYLE rules and their evaluation.
pub mod rules;

/// Line-oriented C source scanning: function extraction and per-function evidence.
pub mod scanner;

/// Module containing utility functions.
/// This includes path helpers used across the application.
pub mod utils;
