//! minapi-lint: a fast linter for ASP.NET Core minimal API handlers.
//!
//! Parses C# source with tree-sitter and flags attributes placed on local
//! functions that registered route-handler lambdas merely invoke. An
//! attribute like `[Authorize]` only takes effect on the delegate passed to
//! `MapGet` and friends; placed on an invoked helper it is silently ignored.

pub mod cli;
pub mod error;
pub mod lint;
pub mod lint_config;

pub use cli::{validate_cli_semantics, Cli, Commands};
pub use error::{exit_code, LintError};
pub use lint::{
    detect, CancelFlag, Descriptor, Diagnostic, DiagnosticSeverity, LintConfig, LintEngine,
    MisplacedAttributeRule, OutputFormat, Range, Rule, RuleCode,
};
pub use lint_config::{
    discover_and_load_config, discover_config, ConfigError, LintFileConfig, CONFIG_FILE_NAME,
};
