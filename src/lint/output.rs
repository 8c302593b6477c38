//! Output formatting for lint diagnostics.
//!
//! Formats:
//! - **Text**: human-readable with optional color
//! - **Concise**: one-line-per-diagnostic for editors/scripts
//! - **JSON**: machine-readable
//! - **GitHub**: `::warning` / `::error` annotation format for GitHub Actions
//!
//! Color support respects `--color`, `NO_COLOR`, `FORCE_COLOR`, and terminal
//! detection.

use std::collections::HashMap;
use std::io::{self, IsTerminal};
use std::sync::OnceLock;

use clap::ValueEnum;
use serde::Serialize;

use super::rules::{Diagnostic, DiagnosticSeverity, Range, RuleCode};

// ============================================================================
// COLOR CONFIGURATION
// ============================================================================

/// Controls when ANSI color codes are emitted.
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
pub enum ColorMode {
    /// Detect automatically: enable color when stdout is a terminal,
    /// `NO_COLOR` is not set, and `FORCE_COLOR` is not overriding.
    #[default]
    Auto,
    /// Always emit ANSI color codes, even when piped.
    Always,
    /// Never emit ANSI color codes.
    Never,
}

/// Holds the resolved color-enabled flag and provides accessor methods
/// that return either the real ANSI escape sequence or an empty string.
#[derive(Debug, Clone, Copy)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Resolve a `ColorMode` into a concrete on/off decision.
    ///
    /// Precedence (highest to lowest):
    /// 1. `ColorMode::Always` / `ColorMode::Never` (explicit CLI flag)
    /// 2. `FORCE_COLOR` env var (non-empty = force on)
    /// 3. `NO_COLOR` env var (any value = force off)
    /// 4. TTY detection via `isatty(stdout)`
    pub fn from_mode(mode: ColorMode) -> Self {
        let enabled = match mode {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => {
                if let Ok(val) = std::env::var("FORCE_COLOR") {
                    if !val.is_empty() && val != "0" {
                        return Self { enabled: true };
                    }
                }
                if std::env::var_os("NO_COLOR").is_some() {
                    return Self { enabled: false };
                }
                io::stdout().is_terminal()
            }
        };
        Self { enabled }
    }

    /// Shorthand for `from_mode(ColorMode::Auto)`.
    pub fn auto() -> Self {
        Self::from_mode(ColorMode::Auto)
    }

    /// Whether color output is enabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn reset(&self) -> &'static str { if self.enabled { "\x1b[0m" } else { "" } }
    pub fn bold(&self) -> &'static str { if self.enabled { "\x1b[1m" } else { "" } }
    pub fn dim(&self) -> &'static str { if self.enabled { "\x1b[2m" } else { "" } }
    pub fn red(&self) -> &'static str { if self.enabled { "\x1b[31m" } else { "" } }
    pub fn yellow(&self) -> &'static str { if self.enabled { "\x1b[33m" } else { "" } }
    pub fn cyan(&self) -> &'static str { if self.enabled { "\x1b[36m" } else { "" } }
    pub fn gray(&self) -> &'static str { if self.enabled { "\x1b[90m" } else { "" } }
}

/// Process-wide color configuration, initialized once at startup.
static COLOR: OnceLock<ColorConfig> = OnceLock::new();

/// Set the global color mode. Call this once from `main` before any output.
/// Subsequent calls are ignored (first write wins).
pub fn init_color(mode: ColorMode) {
    let _ = COLOR.set(ColorConfig::from_mode(mode));
}

/// Return the active `ColorConfig`, falling back to auto-detection if
/// `init_color` was never called.
pub fn color_config() -> &'static ColorConfig {
    COLOR.get_or_init(ColorConfig::auto)
}

// ============================================================================
// OUTPUT FORMAT
// ============================================================================

/// Output format for lint results.
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable text output with color.
    #[default]
    Text,
    /// Concise one-line-per-diagnostic format.
    Concise,
    /// JSON output for machine consumption.
    Json,
    /// GitHub Actions annotation format (`::warning`, `::error`).
    Github,
}

// ============================================================================
// SUMMARY STATISTICS
// ============================================================================

/// Summary statistics for a lint run.
#[derive(Debug, Default)]
pub struct LintSummary {
    pub files_checked: usize,
    pub total_diagnostics: usize,
    pub errors: usize,
    pub warnings: usize,
    pub infos: usize,
    pub hints: usize,
    pub by_rule: HashMap<RuleCode, usize>,
}

impl LintSummary {
    pub fn add_diagnostic(&mut self, diag: &Diagnostic) {
        self.total_diagnostics += 1;
        match diag.severity {
            DiagnosticSeverity::Error => self.errors += 1,
            DiagnosticSeverity::Warning => self.warnings += 1,
            DiagnosticSeverity::Info => self.infos += 1,
            DiagnosticSeverity::Hint => self.hints += 1,
        }
        *self.by_rule.entry(diag.rule).or_insert(0) += 1;
    }
}

// ============================================================================
// FORMATTING
// ============================================================================

fn severity_color(severity: DiagnosticSeverity, colors: &ColorConfig) -> &'static str {
    match severity {
        DiagnosticSeverity::Error => colors.red(),
        DiagnosticSeverity::Warning => colors.yellow(),
        DiagnosticSeverity::Info => colors.cyan(),
        DiagnosticSeverity::Hint => colors.gray(),
    }
}

/// Render one diagnostic in the human-readable text format.
pub fn format_text(diag: &Diagnostic, colors: &ColorConfig) -> String {
    format!(
        "{}{}{}:{}:{}: {}{}{}[{}]{} {}",
        colors.bold(),
        diag.file.display(),
        colors.reset(),
        diag.range.start_line,
        diag.range.start_col,
        severity_color(diag.severity, colors),
        diag.severity,
        colors.dim(),
        diag.rule,
        colors.reset(),
        diag.message,
    )
}

/// Render one diagnostic in the concise one-line format.
pub fn format_concise(diag: &Diagnostic) -> String {
    format!(
        "{}:{}:{} {} {}",
        diag.file.display(),
        diag.range.start_line,
        diag.range.start_col,
        diag.rule,
        diag.message,
    )
}

/// Render one diagnostic as a GitHub Actions workflow annotation.
pub fn format_github(diag: &Diagnostic) -> String {
    let level = match diag.severity {
        DiagnosticSeverity::Error => "error",
        DiagnosticSeverity::Warning => "warning",
        DiagnosticSeverity::Info | DiagnosticSeverity::Hint => "notice",
    };
    format!(
        "::{} file={},line={},col={},endLine={},endColumn={}::{}: {}",
        level,
        diag.file.display(),
        diag.range.start_line,
        diag.range.start_col,
        diag.range.end_line,
        diag.range.end_col,
        diag.rule,
        diag.message,
    )
}

#[derive(Serialize)]
struct JsonDiagnostic<'a> {
    file: String,
    code: &'a str,
    name: &'a str,
    severity: DiagnosticSeverity,
    message: &'a str,
    range: &'a Range,
    help_uri: &'a str,
}

/// Render all diagnostics as a JSON array.
pub fn format_json(diagnostics: &[Diagnostic]) -> String {
    let entries: Vec<JsonDiagnostic<'_>> = diagnostics
        .iter()
        .map(|d| JsonDiagnostic {
            file: d.file.display().to_string(),
            code: d.rule.as_str(),
            name: d.rule.name(),
            severity: d.severity,
            message: &d.message,
            range: &d.range,
            help_uri: d.rule.descriptor().help_uri,
        })
        .collect();
    serde_json::to_string_pretty(&entries).unwrap_or_else(|_| "[]".to_string())
}

/// Print diagnostics to stdout in the requested format.
pub fn print_diagnostics(diagnostics: &[Diagnostic], format: OutputFormat) {
    match format {
        OutputFormat::Text => {
            let colors = color_config();
            for diag in diagnostics {
                println!("{}", format_text(diag, colors));
            }
        }
        OutputFormat::Concise => {
            for diag in diagnostics {
                println!("{}", format_concise(diag));
            }
        }
        OutputFormat::Json => {
            println!("{}", format_json(diagnostics));
        }
        OutputFormat::Github => {
            for diag in diagnostics {
                println!("{}", format_github(diag));
            }
        }
    }
}

/// Print the closing summary line for text output.
pub fn print_summary(summary: &LintSummary) {
    let colors = color_config();
    if summary.total_diagnostics == 0 {
        println!(
            "{}No issues found{} (checked {} file{})",
            colors.bold(),
            colors.reset(),
            summary.files_checked,
            if summary.files_checked == 1 { "" } else { "s" },
        );
        return;
    }

    let mut parts = Vec::new();
    if summary.errors > 0 {
        parts.push(format!("{} error{}", summary.errors, plural(summary.errors)));
    }
    if summary.warnings > 0 {
        parts.push(format!("{} warning{}", summary.warnings, plural(summary.warnings)));
    }
    if summary.infos > 0 {
        parts.push(format!("{} info{}", summary.infos, plural(summary.infos)));
    }
    if summary.hints > 0 {
        parts.push(format!("{} hint{}", summary.hints, plural(summary.hints)));
    }
    println!(
        "{}Found {}{} (checked {} file{})",
        colors.bold(),
        parts.join(", "),
        colors.reset(),
        summary.files_checked,
        if summary.files_checked == 1 { "" } else { "s" },
    );
}

fn plural(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}
