//! Error types for the minimal-API linter.

use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Exit codes
// ---------------------------------------------------------------------------

/// Process exit codes for the minapi-lint CLI.
///
/// These follow a Unix-style convention where 0 is success and higher
/// values indicate increasingly severe problems.
pub mod exit_code {
    /// No issues found (clean).
    pub const CLEAN: i32 = 0;
    /// Lint issues were found.
    pub const LINT_ISSUES: i32 = 1;
    /// Configuration error (bad config file, invalid CLI args).
    pub const CONFIG_ERROR: i32 = 2;
    /// I/O error (file not found, permission denied, etc.).
    pub const IO_ERROR: i32 = 3;
    /// Internal error (bug in minapi-lint itself).
    pub const INTERNAL_ERROR: i32 = 4;
}

// ---------------------------------------------------------------------------
// Lint errors
// ---------------------------------------------------------------------------

/// Errors that can occur while reading and analyzing source files.
#[derive(Error, Debug)]
pub enum LintError {
    #[error("I/O error reading {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("file is not valid UTF-8: {path}")]
    Encoding { path: PathBuf },

    #[error("parser could not produce a syntax tree for {path}")]
    Parse { path: PathBuf },
}

pub type Result<T> = std::result::Result<T, LintError>;
