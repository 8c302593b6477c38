//! Minimal-API linting infrastructure.

mod engine;
mod misplaced_attribute;
mod output;
mod rules;
pub mod syntax;

pub use engine::{LintConfig, LintEngine, RunOutcome};
pub use misplaced_attribute::{detect, MisplacedAttributeRule};
pub use output::{
    color_config, format_concise, format_github, format_json, format_text, init_color,
    print_diagnostics, print_summary, ColorConfig, ColorMode, LintSummary, OutputFormat,
};
pub use rules::{
    print_rules, CancelFlag, Descriptor, Diagnostic, DiagnosticSeverity, Range, Rule, RuleCode,
    MISPLACED_LAMBDA_ATTRIBUTE, MODEL_BINDING_ATTRIBUTE,
};
