//! Integration tests for CLI argument validation.
//!
//! Uses [`clap::Parser::try_parse_from`] to exercise clap-level validation
//! (value parsers, unknown codes) and [`validate_cli_semantics`] for runtime
//! semantic warnings, all without spawning a subprocess.

use clap::Parser;
use minapi_lint::cli::{validate_cli_semantics, Cli, Commands};

/// Attempt to parse a command line, returning Ok(Cli) or the clap error string.
fn try_parse(args: &[&str]) -> Result<Cli, String> {
    Cli::try_parse_from(args).map_err(|e| e.to_string())
}

/// Shorthand: parse must succeed.
fn must_parse(args: &[&str]) -> Cli {
    try_parse(args).unwrap_or_else(|e| panic!("expected parse to succeed, got:\n{}", e))
}

/// Shorthand: parse must fail and the error must contain `needle`.
fn must_fail_containing(args: &[&str], needle: &str) {
    let err = try_parse(args).expect_err("expected parse to fail");
    assert!(
        err.contains(needle),
        "error does not contain '{}'. Full error:\n{}",
        needle,
        err,
    );
}

#[test]
fn bare_invocation_requires_a_subcommand() {
    must_fail_containing(&["minapi-lint"], "Usage");
}

#[test]
fn check_accepts_multiple_paths() {
    let cli = must_parse(&["minapi-lint", "check", "src", "tests"]);
    match cli.command {
        Commands::Check { paths, .. } => assert_eq!(paths.len(), 2),
        _ => panic!("expected check command"),
    }
}

#[test]
fn select_and_ignore_validate_codes_at_parse_time() {
    must_parse(&["minapi-lint", "check", "--select", "ASP0003,ASP0004"]);
    must_fail_containing(
        &["minapi-lint", "check", "--ignore", "FST001"],
        "unknown rule code 'FST001'",
    );
}

#[test]
fn select_error_lists_valid_codes() {
    must_fail_containing(
        &["minapi-lint", "check", "--select", "nope"],
        "Valid codes: ASP0003, ASP0004",
    );
}

#[test]
fn global_flags_work_before_and_after_subcommand() {
    let before = must_parse(&["minapi-lint", "--verbose", "check"]);
    assert!(before.verbose);
    let after = must_parse(&["minapi-lint", "check", "--verbose"]);
    assert!(after.verbose);
}

#[test]
fn color_mode_parses_all_variants() {
    for mode in ["auto", "always", "never"] {
        must_parse(&["minapi-lint", "--color", mode, "rules"]);
    }
    must_fail_containing(&["minapi-lint", "--color", "sometimes", "rules"], "sometimes");
}

#[test]
fn max_diagnostics_rejects_non_numeric() {
    must_fail_containing(
        &["minapi-lint", "check", "--max-diagnostics", "lots"],
        "invalid integer",
    );
}

#[test]
fn exit_zero_flag_parses() {
    let cli = must_parse(&["minapi-lint", "check", "--exit-zero"]);
    match cli.command {
        Commands::Check { exit_zero, .. } => assert!(exit_zero),
        _ => panic!("expected check command"),
    }
}

#[test]
fn no_semantic_warnings_for_plain_invocations() {
    let cli = must_parse(&["minapi-lint", "check"]);
    assert!(validate_cli_semantics(&cli).is_empty());
}

#[test]
fn debug_with_quiet_warns() {
    let cli = must_parse(&["minapi-lint", "--debug", "--quiet", "check"]);
    let warnings = validate_cli_semantics(&cli);
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("--debug"));
}
