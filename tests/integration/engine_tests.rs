//! Engine-level integration tests: file collection, parallel checking,
//! output formats, and config merging over real temporary projects.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use minapi_lint::lint::{format_json, LintConfig, LintEngine};
use minapi_lint::lint_config::LintFileConfig;

const MISPLACED: &str = "\
var app = WebApplication.Create();
app.MapGet(\"/\", () => Hello());
[Authorize]
void Hello() { }
";

const CLEAN: &str = "\
var app = WebApplication.Create();
app.MapGet(\"/\", [Authorize] () => Hello());
void Hello() { }
";

fn project(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for (name, content) in files {
        let path = dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }
    dir
}

#[test]
fn mixed_project_reports_only_offending_files() {
    let dir = project(&[
        ("src/Offending.cs", MISPLACED),
        ("src/Fine.cs", CLEAN),
        ("notes.txt", "irrelevant"),
    ]);

    let engine = LintEngine::new(LintConfig::default());
    let outcome = engine.run(&[dir.path().to_path_buf()]);

    assert_eq!(outcome.files_checked, 2);
    assert_eq!(outcome.diagnostics.len(), 1);
    assert!(outcome.diagnostics[0]
        .file
        .to_string_lossy()
        .ends_with("Offending.cs"));
}

#[test]
fn diagnostics_are_sorted_by_file_then_position() {
    let dir = project(&[("b.cs", MISPLACED), ("a.cs", MISPLACED)]);

    let engine = LintEngine::new(LintConfig::default());
    let outcome = engine.run(&[dir.path().to_path_buf()]);

    assert_eq!(outcome.diagnostics.len(), 2);
    let files: Vec<String> = outcome
        .diagnostics
        .iter()
        .map(|d| d.file.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(files, vec!["a.cs", "b.cs"]);
}

#[test]
fn ignoring_the_rule_silences_everything() {
    let dir = project(&[("app.cs", MISPLACED)]);

    let config = LintConfig::new(None, Some("ASP0004".to_string()));
    let engine = LintEngine::new(config);
    let outcome = engine.run(&[dir.path().to_path_buf()]);
    assert!(outcome.diagnostics.is_empty());
}

#[test]
fn file_config_excludes_apply_to_directory_walks() {
    let dir = project(&[
        ("src/app.cs", MISPLACED),
        ("obj/generated.cs", MISPLACED),
    ]);

    let file_config = LintFileConfig::from_toml_str(
        r#"
[files]
exclude = ["**/obj/**"]
"#,
    )
    .unwrap();
    let config = LintConfig::default().with_excludes(file_config.files.exclude.clone());
    let engine = LintEngine::new(config);
    let outcome = engine.run(&[dir.path().to_path_buf()]);

    assert_eq!(outcome.files_checked, 1);
    assert_eq!(outcome.diagnostics.len(), 1);
}

#[test]
fn unreadable_and_missing_paths_are_counted_not_fatal() {
    let dir = project(&[("app.cs", MISPLACED)]);
    let missing = PathBuf::from("/nonexistent/never-here");

    let engine = LintEngine::new(LintConfig::default());
    let outcome = engine.run(&[dir.path().to_path_buf(), missing]);

    assert_eq!(outcome.read_errors, 1);
    assert_eq!(outcome.diagnostics.len(), 1);
}

#[test]
fn json_output_round_trips_diagnostic_fields() {
    let dir = project(&[("app.cs", MISPLACED)]);

    let engine = LintEngine::new(LintConfig::default());
    let outcome = engine.run(&[dir.path().to_path_buf()]);
    let json = format_json(&outcome.diagnostics);
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed.as_array().unwrap().len(), 1);
    assert_eq!(parsed[0]["code"], "ASP0004");
    assert_eq!(
        parsed[0]["message"],
        "Authorize should be placed on the delegate instead of Hello"
    );
    assert_eq!(parsed[0]["range"]["start_line"], 3);
}

#[test]
fn engine_runs_are_deterministic() {
    let dir = project(&[("a.cs", MISPLACED), ("b.cs", MISPLACED), ("c.cs", CLEAN)]);

    let engine = LintEngine::new(LintConfig::default());
    let first = engine.run(&[dir.path().to_path_buf()]);
    let second = engine.run(&[dir.path().to_path_buf()]);
    assert_eq!(first.diagnostics, second.diagnostics);
}
