//! Lint engine that orchestrates file collection and rule checking.
//!
//! Files are checked in parallel with rayon; each file's analysis is
//! independent and touches no shared mutable state beyond the atomic
//! early-termination counter. `--max-diagnostics` trips a shared
//! [`CancelFlag`] so in-flight files stop collecting once the limit is
//! reached.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use rayon::prelude::*;
use rustc_hash::FxHashSet;
use tracing::{debug, warn};

use super::misplaced_attribute::MisplacedAttributeRule;
use super::output::{print_diagnostics, print_summary, LintSummary, OutputFormat};
use super::rules::{CancelFlag, Diagnostic, Rule, RuleCode};
use crate::error::exit_code;

/// File extension analyzed by this linter.
const SOURCE_EXTENSION: &str = "cs";

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration for the lint engine.
#[derive(Debug, Clone, Default)]
pub struct LintConfig {
    /// Rules to enable (if None, all rules are enabled).
    pub select: Option<FxHashSet<RuleCode>>,
    /// Rules to ignore.
    pub ignore: FxHashSet<RuleCode>,
    /// Glob patterns for files to exclude from checking.
    pub exclude: Vec<String>,
    /// Maximum number of diagnostics to collect before stopping.
    /// `None` means unlimited.
    pub max_diagnostics: Option<usize>,
}

impl LintConfig {
    /// Create a new lint configuration from comma-separated CLI strings.
    ///
    /// Warns on stderr about any unrecognized rule codes in `--select` or
    /// `--ignore`. If `--select` is provided but yields zero valid codes,
    /// `has_empty_selection()` returns true so callers can exit early.
    pub fn new(select: Option<String>, ignore: Option<String>) -> Self {
        let select_set = select.map(|s| Self::parse_code_list(&s, "--select"));

        if let Some(ref set) = select_set {
            if set.is_empty() {
                eprintln!("Warning: No valid rules selected, nothing will be checked");
            }
        }

        let ignore_set = ignore
            .map(|s| Self::parse_code_list(&s, "--ignore"))
            .unwrap_or_default();

        Self {
            select: select_set,
            ignore: ignore_set,
            exclude: Vec::new(),
            max_diagnostics: None,
        }
    }

    fn parse_code_list(s: &str, flag: &str) -> FxHashSet<RuleCode> {
        let mut valid = FxHashSet::default();
        for raw in s.split(',') {
            let code = raw.trim();
            if code.is_empty() {
                continue;
            }
            match RuleCode::parse_code(code) {
                Some(rc) => {
                    valid.insert(rc);
                }
                None => {
                    eprintln!("Warning: Unknown rule code '{}' in {} (ignored)", code, flag);
                }
            }
        }
        valid
    }

    /// Builder: set the maximum number of diagnostics to collect.
    pub fn with_max_diagnostics(mut self, max: Option<usize>) -> Self {
        self.max_diagnostics = max;
        self
    }

    /// Builder: set file-exclusion glob patterns.
    pub fn with_excludes(mut self, patterns: Vec<String>) -> Self {
        self.exclude = patterns;
        self
    }

    /// Returns true when `--select` was provided but no valid rule codes
    /// were parsed, meaning the engine would check nothing.
    pub fn has_empty_selection(&self) -> bool {
        matches!(&self.select, Some(set) if set.is_empty())
    }

    /// Check if a rule is enabled.
    pub fn is_rule_enabled(&self, rule: RuleCode) -> bool {
        if self.ignore.contains(&rule) {
            return false;
        }
        match &self.select {
            Some(selected) => selected.contains(&rule),
            None => rule.descriptor().enabled_by_default,
        }
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Result of one engine run over a set of paths.
#[derive(Debug, Default)]
pub struct RunOutcome {
    /// Diagnostics sorted by (file, position, rule); at most
    /// `max_diagnostics` entries.
    pub diagnostics: Vec<Diagnostic>,
    /// Number of files actually read and checked.
    pub files_checked: usize,
    /// Number of files that could not be read.
    pub read_errors: usize,
}

/// The main lint engine.
pub struct LintEngine {
    config: LintConfig,
    rules: Vec<Box<dyn Rule>>,
}

impl LintEngine {
    /// Create a new lint engine with the given configuration.
    pub fn new(config: LintConfig) -> Self {
        let mut rules: Vec<Box<dyn Rule>> = Vec::new();

        if config.is_rule_enabled(RuleCode::Asp0004) {
            rules.push(Box::new(MisplacedAttributeRule::new()));
        }

        Self { config, rules }
    }

    /// Collect `.cs` files from the given paths, in sorted order.
    ///
    /// Directories are walked with gitignore support; explicit file
    /// arguments are taken as-is (even without the expected extension).
    /// Config exclusion globs are applied to both.
    pub fn collect_files(&self, paths: &[PathBuf]) -> (Vec<PathBuf>, usize) {
        let exclude = self.build_exclude_set();
        let mut files = Vec::new();
        let mut errors = 0usize;

        for path in paths {
            if path.is_file() {
                if !Self::is_excluded(&exclude, path) {
                    files.push(path.clone());
                }
            } else if path.is_dir() {
                for entry in WalkBuilder::new(path).build() {
                    let entry = match entry {
                        Ok(e) => e,
                        Err(e) => {
                            warn!(error = %e, "skipping unreadable directory entry");
                            errors += 1;
                            continue;
                        }
                    };
                    let entry_path = entry.path();
                    if !entry.file_type().is_some_and(|t| t.is_file()) {
                        continue;
                    }
                    let is_source = entry_path
                        .extension()
                        .and_then(|e| e.to_str())
                        .is_some_and(|e| e == SOURCE_EXTENSION);
                    if is_source && !Self::is_excluded(&exclude, entry_path) {
                        files.push(entry_path.to_path_buf());
                    }
                }
            } else {
                warn!(path = %path.display(), "path does not exist");
                errors += 1;
            }
        }

        files.sort();
        files.dedup();
        (files, errors)
    }

    fn build_exclude_set(&self) -> Option<GlobSet> {
        if self.config.exclude.is_empty() {
            return None;
        }
        let mut builder = GlobSetBuilder::new();
        for pattern in &self.config.exclude {
            match Glob::new(pattern) {
                Ok(glob) => {
                    builder.add(glob);
                }
                Err(e) => {
                    eprintln!("Warning: invalid exclude pattern '{}': {}", pattern, e);
                }
            }
        }
        builder.build().ok()
    }

    fn is_excluded(exclude: &Option<GlobSet>, path: &Path) -> bool {
        exclude.as_ref().is_some_and(|set| set.is_match(path))
    }

    /// Run all enabled rules over the given paths.
    pub fn run(&self, paths: &[PathBuf]) -> RunOutcome {
        let (files, walk_errors) = self.collect_files(paths);
        debug!(files = files.len(), "collected source files");

        let cancel = CancelFlag::new();
        let produced = AtomicUsize::new(0);
        let read_errors = AtomicUsize::new(walk_errors);

        let per_file: Vec<Vec<Diagnostic>> = files
            .par_iter()
            .map(|file| {
                if cancel.is_cancelled() {
                    return Vec::new();
                }

                let content = match fs::read_to_string(file) {
                    Ok(content) => content,
                    Err(e) => {
                        warn!(file = %file.display(), error = %e, "could not read file");
                        read_errors.fetch_add(1, Ordering::Relaxed);
                        return Vec::new();
                    }
                };

                let mut file_diagnostics = Vec::new();
                for rule in &self.rules {
                    if cancel.is_cancelled() {
                        break;
                    }
                    file_diagnostics.extend(rule.check(file, &content, &cancel));
                }

                if let Some(max) = self.config.max_diagnostics {
                    let total =
                        produced.fetch_add(file_diagnostics.len(), Ordering::SeqCst)
                            + file_diagnostics.len();
                    if total >= max {
                        cancel.cancel();
                    }
                }

                file_diagnostics
            })
            .collect();

        let mut diagnostics: Vec<Diagnostic> = per_file.into_iter().flatten().collect();
        // Stable sort keeps a declaration's attribute diagnostics, which
        // share a span, in their original order.
        diagnostics.sort_by(|a, b| {
            (&a.file, a.range.start_line, a.range.start_col, a.rule)
                .cmp(&(&b.file, b.range.start_line, b.range.start_col, b.rule))
        });
        if let Some(max) = self.config.max_diagnostics {
            diagnostics.truncate(max);
        }

        RunOutcome {
            diagnostics,
            files_checked: files.len(),
            read_errors: read_errors.load(Ordering::Relaxed),
        }
    }

    /// Run, print results in the requested format, and return the process
    /// exit code.
    pub fn check(&self, paths: &[PathBuf], format: OutputFormat) -> i32 {
        let outcome = self.run(paths);

        let mut summary = LintSummary::default();
        summary.files_checked = outcome.files_checked;
        for diagnostic in &outcome.diagnostics {
            summary.add_diagnostic(diagnostic);
        }

        print_diagnostics(&outcome.diagnostics, format);
        if matches!(format, OutputFormat::Text) {
            print_summary(&summary);
        }

        if !outcome.diagnostics.is_empty() {
            exit_code::LINT_ISSUES
        } else if outcome.read_errors > 0 {
            exit_code::IO_ERROR
        } else {
            exit_code::CLEAN
        }
    }
}
