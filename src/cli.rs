//! CLI argument definitions and validation for minapi-lint.
//!
//! Extracted into its own module so that integration tests can use
//! [`Cli::try_parse_from`] to verify argument validation without
//! spawning a subprocess.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::lint::{ColorMode, OutputFormat, RuleCode};

/// Parse a positive (>= 1) usize value for CLI arguments.
fn parse_positive_usize(s: &str) -> Result<usize, String> {
    let val: usize = s
        .parse()
        .map_err(|e| format!("invalid integer: {}", e))?;
    if val == 0 {
        return Err("value must be at least 1".to_string());
    }
    Ok(val)
}

/// Validate a comma-separated list of rule codes at parse time.
///
/// Each code is checked against [`RuleCode::parse_code`]. If any token
/// is not a known code the parser rejects the whole value immediately,
/// giving the user an actionable error message from clap.
fn validate_rule_codes(s: &str) -> Result<String, String> {
    for raw in s.split(',') {
        let code = raw.trim();
        if code.is_empty() {
            continue;
        }
        if RuleCode::parse_code(code).is_none() {
            let valid: Vec<&str> = RuleCode::all()
                .iter()
                .map(|r| r.as_str())
                .collect();
            return Err(format!(
                "unknown rule code '{}'. Valid codes: {}",
                code,
                valid.join(", "),
            ));
        }
    }
    Ok(s.to_string())
}

/// minapi-lint: Fast linter for ASP.NET Core minimal API handlers.
///
/// Parses C# source with tree-sitter and flags attributes placed on local
/// functions that route-handler lambdas merely invoke -- attributes like
/// [Authorize] or [Produces] that silently have no effect there.
///
/// Quick start:
///   minapi-lint check src/          Check files for issues
///   minapi-lint rules               List available rules
///   minapi-lint init                Write a default config file
#[derive(Debug, Parser)]
#[command(name = "minapi-lint", version, about, verbatim_doc_comment)]
pub struct Cli {
    /// When to use ANSI colors in output.
    #[arg(long, global = true, value_enum, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,

    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only log errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable debug logging.
    #[arg(long, global = true)]
    pub debug: bool,

    /// Explicit config file path (skips discovery of .minapi-lint.toml).
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Check C# files for issues.
    Check {
        /// Files or directories to check.
        #[arg(default_value = ".")]
        paths: Vec<PathBuf>,

        /// Comma-separated rule codes to enable exclusively
        /// (e.g., --select ASP0004).
        #[arg(long, value_parser = validate_rule_codes)]
        select: Option<String>,

        /// Comma-separated rule codes to disable.
        #[arg(long, value_parser = validate_rule_codes)]
        ignore: Option<String>,

        /// Output format (defaults to the config file's choice, then text).
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,

        /// Stop after collecting this many diagnostics.
        #[arg(long, value_parser = parse_positive_usize)]
        max_diagnostics: Option<usize>,

        /// Always exit with code 0, even when issues are found.
        #[arg(long)]
        exit_zero: bool,
    },

    /// List available rules.
    Rules,

    /// Write a default .minapi-lint.toml in the current directory.
    Init {
        /// Overwrite an existing config file.
        #[arg(long)]
        force: bool,
    },
}

/// Check semantic constraints that clap cannot express and return
/// user-facing warnings.
pub fn validate_cli_semantics(cli: &Cli) -> Vec<String> {
    let mut warnings = Vec::new();
    if cli.quiet && cli.verbose {
        warnings.push("Warning: --quiet and --verbose are both set; --quiet wins".to_string());
    }
    if cli.quiet && cli.debug {
        warnings.push("Warning: --quiet is ignored because --debug is set".to_string());
    }
    warnings
}
