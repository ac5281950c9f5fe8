//! Error types and process exit codes.

use std::path::PathBuf;

use thiserror::Error;

/// Process exit codes for the `fernstyle` CLI.
pub mod exit_code {
    /// All files pass and every configured check succeeded.
    pub const PASS: i32 = 0;
    /// Violations failed the run, or an external check failed.
    pub const VIOLATIONS: i32 = 1;
    /// Bad config file, invalid pattern, missing path or bad arguments.
    pub const CONFIG_ERROR: i32 = 2;
}

/// Errors that stop a run before or outside of scanning.
///
/// Problems with individual source files are never errors; they become
/// `read-error` violations instead.
#[derive(Error, Debug)]
pub enum FernStyleError {
    /// The config file exists but could not be read.
    #[error("failed to read config {}: {source}", .path.display())]
    ConfigRead {
        /// Config file path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The config file is not valid TOML for the expected schema.
    #[error("failed to parse config {}: {source}", .path.display())]
    ConfigParse {
        /// Config file path.
        path: PathBuf,
        /// Underlying TOML error.
        source: toml::de::Error,
    },

    /// A configured regex does not compile.
    #[error("invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        /// The pattern as written.
        pattern: String,
        /// Underlying regex error.
        source: regex::Error,
    },

    /// An external check command could not be started.
    #[error("failed to run '{command}': {source}")]
    CommandSpawn {
        /// The command line.
        command: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// An explicitly named input path does not exist.
    #[error("path does not exist: {}", .0.display())]
    MissingPath(PathBuf),
}

impl FernStyleError {
    /// Exit code the CLI uses when this error ends a run.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            FernStyleError::CommandSpawn { .. } => exit_code::VIOLATIONS,
            _ => exit_code::CONFIG_ERROR,
        }
    }
}
