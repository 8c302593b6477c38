//! Lint rule definitions, the diagnostic descriptor catalog, and shared
//! diagnostic types.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::Serialize;

/// Rule codes for minimal-API linting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RuleCode {
    /// ASP0003: Model binding attributes on Map action delegate parameters.
    Asp0003,
    /// ASP0004: Attribute placed on an invoked method instead of the delegate.
    Asp0004,
}

impl RuleCode {
    /// Parse a rule code from string (e.g., "ASP0004").
    pub fn parse_code(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "ASP0003" => Some(RuleCode::Asp0003),
            "ASP0004" => Some(RuleCode::Asp0004),
            _ => None,
        }
    }

    /// All available rule codes.
    pub fn all() -> &'static [RuleCode] {
        &[RuleCode::Asp0003, RuleCode::Asp0004]
    }

    /// Short name for the rule.
    pub fn name(&self) -> &'static str {
        match self {
            RuleCode::Asp0003 => "model-binding-attribute",
            RuleCode::Asp0004 => "misplaced-lambda-attribute",
        }
    }

    /// Detailed description of what the rule checks.
    pub fn description(&self) -> &'static str {
        match self {
            RuleCode::Asp0003 => {
                "Detects model binding attributes ([FromRoute], [FromQuery], [FromBody], ...) \
                 specified on parameters of delegates passed to Map actions. Minimal APIs \
                 infer binding sources; the attributes are not honored there."
            }
            RuleCode::Asp0004 => {
                "Detects attributes placed on a local function that is merely invoked from a \
                 route handler lambda. Attributes like [Authorize] or [Produces] only take \
                 effect on the registered delegate itself, so an attribute on the invoked \
                 helper is silently ignored."
            }
        }
    }

    /// Return the string representation (e.g., `"ASP0004"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleCode::Asp0003 => "ASP0003",
            RuleCode::Asp0004 => "ASP0004",
        }
    }

    /// The immutable descriptor backing this code.
    pub fn descriptor(&self) -> &'static Descriptor {
        match self {
            RuleCode::Asp0003 => &MODEL_BINDING_ATTRIBUTE,
            RuleCode::Asp0004 => &MISPLACED_LAMBDA_ATTRIBUTE,
        }
    }

    /// Whether a rule implementation ships for this code.
    ///
    /// ASP0003 is catalog-only: its descriptor exists for tooling that
    /// consumes the full diagnostic table, but no checker is registered.
    pub fn is_implemented(&self) -> bool {
        matches!(self, RuleCode::Asp0004)
    }
}

impl fmt::Display for RuleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Descriptor catalog
// ---------------------------------------------------------------------------

/// Immutable static metadata for a diagnostic, independent of any occurrence.
///
/// Message templates use numbered positional placeholders (`{0}`, `{1}`)
/// substituted by [`Descriptor::format_message`].
#[derive(Debug, PartialEq, Eq)]
pub struct Descriptor {
    pub id: &'static str,
    pub title: &'static str,
    pub message_template: &'static str,
    pub category: &'static str,
    pub severity: DiagnosticSeverity,
    pub enabled_by_default: bool,
    pub help_uri: &'static str,
}

impl Descriptor {
    /// Substitute positional placeholders into the message template.
    ///
    /// Placeholder `{N}` is replaced by `args[N]`; placeholders without a
    /// matching argument are left as-is.
    pub fn format_message(&self, args: &[&str]) -> String {
        let mut message = self.message_template.to_string();
        for (i, arg) in args.iter().enumerate() {
            message = message.replace(&format!("{{{}}}", i), arg);
        }
        message
    }
}

/// ASP0003: model binding attributes are ignored on Map action parameters.
pub static MODEL_BINDING_ATTRIBUTE: Descriptor = Descriptor {
    id: "ASP0003",
    title: "Do not use model binding attributes with Map actions",
    message_template: "{0} should not be specified for a {1} delegate parameter",
    category: "Usage",
    severity: DiagnosticSeverity::Warning,
    enabled_by_default: true,
    help_uri: "https://aka.ms/aspnet/analyzers",
};

/// ASP0004: an attribute on an invoked local function has no effect.
pub static MISPLACED_LAMBDA_ATTRIBUTE: Descriptor = Descriptor {
    id: "ASP0004",
    title: "Do not place attribute on invoked method",
    message_template: "{0} should be placed on the delegate instead of {1}",
    category: "Usage",
    severity: DiagnosticSeverity::Warning,
    enabled_by_default: true,
    help_uri: "https://aka.ms/aspnet/analyzers",
};

// ---------------------------------------------------------------------------
// Diagnostics
// ---------------------------------------------------------------------------

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
    Error,
    Warning,
    Info,
    Hint,
}

impl fmt::Display for DiagnosticSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticSeverity::Error => write!(f, "error"),
            DiagnosticSeverity::Warning => write!(f, "warning"),
            DiagnosticSeverity::Info => write!(f, "info"),
            DiagnosticSeverity::Hint => write!(f, "hint"),
        }
    }
}

/// A text range in a file (1-indexed lines and columns).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Range {
    pub start_line: usize,
    pub start_col: usize,
    pub end_line: usize,
    pub end_col: usize,
}

impl Range {
    /// Create a new range with validation.
    ///
    /// All values must be >= 1 (1-indexed). End must be >= start.
    /// When start_line == end_line, end_col must be >= start_col.
    pub fn new(start_line: usize, start_col: usize, end_line: usize, end_col: usize) -> Self {
        assert!(start_line >= 1, "start_line must be >= 1 (1-indexed), got {}", start_line);
        assert!(start_col >= 1, "start_col must be >= 1 (1-indexed), got {}", start_col);
        assert!(end_line >= 1, "end_line must be >= 1 (1-indexed), got {}", end_line);
        assert!(end_col >= 1, "end_col must be >= 1 (1-indexed), got {}", end_col);
        assert!(
            end_line >= start_line,
            "end_line ({}) must be >= start_line ({})",
            end_line, start_line
        );
        assert!(
            end_line > start_line || end_col >= start_col,
            "when start_line == end_line, end_col ({}) must be >= start_col ({})",
            end_col, start_col
        );
        Self {
            start_line,
            start_col,
            end_line,
            end_col,
        }
    }

    /// Create a range for a single point.
    pub fn point(line: usize, col: usize) -> Self {
        assert!(line >= 1, "line must be >= 1 (1-indexed), got {}", line);
        assert!(col >= 1, "col must be >= 1 (1-indexed), got {}", col);
        Self {
            start_line: line,
            start_col: col,
            end_line: line,
            end_col: col,
        }
    }
}

/// A lint diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// The rule that produced this diagnostic.
    pub rule: RuleCode,
    /// Severity level.
    pub severity: DiagnosticSeverity,
    /// File path.
    pub file: PathBuf,
    /// Location in the file.
    pub range: Range,
    /// Human-readable message.
    pub message: String,
}

// ---------------------------------------------------------------------------
// Cancellation
// ---------------------------------------------------------------------------

/// Cooperative cancellation flag shared between the engine and rules.
///
/// Rules check it between units of work and abort with whatever diagnostics
/// were already produced. The engine trips it when `--max-diagnostics` is
/// reached so in-flight files stop early.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

// ---------------------------------------------------------------------------
// Rule trait
// ---------------------------------------------------------------------------

/// A lint rule.
pub trait Rule: Send + Sync {
    /// The rule code.
    fn code(&self) -> RuleCode;

    /// Check a single file and return diagnostics.
    fn check(&self, file: &Path, content: &str, cancel: &CancelFlag) -> Vec<Diagnostic>;
}

/// Print all catalog entries in a formatted table.
pub fn print_rules() {
    println!("Available minimal-API lint rules:\n");
    println!("{:<9} {:<28} {:<8} {:<12} Description", "Code", "Name", "Default", "Implemented");
    println!("{}", "-".repeat(100));

    for code in RuleCode::all() {
        let descriptor = code.descriptor();
        let default = if descriptor.enabled_by_default { "on" } else { "off" };
        let implemented = if code.is_implemented() { "yes" } else { "no" };
        // Truncate description to first sentence for the table
        let desc = code.description();
        let short_desc = desc.split('.').next().unwrap_or(desc);

        println!(
            "{:<9} {:<28} {:<8} {:<12} {}",
            code,
            code.name(),
            default,
            implemented,
            short_desc
        );
    }

    println!("\nUse --select to enable specific rules (e.g., --select ASP0004)");
    println!("Use --ignore to disable specific rules (e.g., --ignore ASP0003)");
}
