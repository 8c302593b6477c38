//! End-to-end detector scenarios over real C# source strings.
//!
//! These mirror the published behavior of the rule: the literal messages,
//! the declaration-span locations, and the call-order emission sequence.

use std::path::Path;

use minapi_lint::lint::syntax::{self, CalleeShape};
use minapi_lint::lint::{detect, CancelFlag, Diagnostic, MisplacedAttributeRule, Rule, RuleCode};

/// Run the full rule (trigger walk + detector) over a source string.
fn check(source: &str) -> Vec<Diagnostic> {
    MisplacedAttributeRule::new().check(Path::new("Program.cs"), source, &CancelFlag::new())
}

#[test]
fn correctly_placed_attribute_works() {
    let source = "\
using Microsoft.AspNetCore.Authorization;
using Microsoft.AspNetCore.Builder;
var app = WebApplication.Create();
app.MapGet(\"/\", [Authorize] () => Hello());
void Hello() { }
";
    assert!(check(source).is_empty());
}

#[test]
fn misplaced_attribute_produces_diagnostic() {
    let source = "\
using Microsoft.AspNetCore.Authorization;
using Microsoft.AspNetCore.Builder;
var app = WebApplication.Create();
app.MapGet(\"/\", () => Hello());
[Authorize]
void Hello() { }
";
    let diagnostics = check(source);
    assert_eq!(diagnostics.len(), 1);
    let diagnostic = &diagnostics[0];
    assert_eq!(diagnostic.rule, RuleCode::Asp0004);
    assert_eq!(diagnostic.rule.as_str(), "ASP0004");
    assert_eq!(
        diagnostic.message,
        "Authorize should be placed on the delegate instead of Hello"
    );
    // The location is the declaration's span, which starts at `[Authorize]`.
    assert_eq!(diagnostic.range.start_line, 5);
    assert_eq!(diagnostic.range.start_col, 1);
}

#[test]
fn multiple_misplaced_attributes_produce_diagnostics() {
    let source = "\
using Microsoft.AspNetCore.Authorization;
using Microsoft.AspNetCore.Builder;
using Microsoft.AspNetCore.Mvc;
var app = WebApplication.Create();
app.MapGet(\"/\", () => Hello());
[Authorize]
[Produces(\"application/xml\")]
void Hello() { }
";
    let diagnostics = check(source);
    assert_eq!(diagnostics.len(), 2);
    assert_eq!(
        diagnostics[0].message,
        "Authorize should be placed on the delegate instead of Hello"
    );
    assert_eq!(
        diagnostics[1].message,
        "Produces should be placed on the delegate instead of Hello"
    );
    assert_eq!(diagnostics[0].range, diagnostics[1].range);
    assert_eq!(diagnostics[0].range.start_line, 6);
}

#[test]
fn misplaced_attributes_on_multiple_methods_produce_diagnostics() {
    let source = "\
using Microsoft.AspNetCore.Authorization;
using Microsoft.AspNetCore.Builder;
using Microsoft.AspNetCore.Mvc;
var app = WebApplication.Create();
app.MapGet(\"/\", () => {
    if (true)
    {
        Hello();
    }
    Bye();
});
[Authorize]
void Hello() { }
[Produces(\"application/xml\")]
void Bye() { }
";
    let diagnostics = check(source);
    assert_eq!(diagnostics.len(), 2);
    assert_eq!(
        diagnostics[0].message,
        "Authorize should be placed on the delegate instead of Hello"
    );
    assert_eq!(
        diagnostics[1].message,
        "Produces should be placed on the delegate instead of Bye"
    );
}

#[test]
fn diagnostics_follow_call_site_order() {
    // Bye is declared after Hello but called first; call order wins.
    let source = "\
var app = WebApplication.Create();
app.MapGet(\"/\", () => {
    Bye();
    Hello();
});
[Authorize]
void Hello() { }
[Produces(\"application/xml\")]
void Bye() { }
";
    let messages: Vec<String> = check(source).into_iter().map(|d| d.message).collect();
    assert_eq!(
        messages,
        vec![
            "Produces should be placed on the delegate instead of Bye",
            "Authorize should be placed on the delegate instead of Hello",
        ]
    );
}

#[test]
fn detect_called_directly_is_pure_and_idempotent() {
    let source = "\
var app = WebApplication.Create();
app.MapGet(\"/\", () => Hello());
[Authorize]
void Hello() { }
";
    let tree = syntax::parse(source).expect("source parses");
    let root = tree.root_node();
    let registrations = syntax::route_registrations(root, source);
    assert_eq!(registrations.len(), 1);
    let (invocation, lambda) = registrations[0];

    let cancel = CancelFlag::new();
    let file = Path::new("Program.cs");
    let first = detect(root, source, invocation, lambda, file, &cancel);
    let second = detect(root, source, invocation, lambda, file, &cancel);
    assert_eq!(first, second);
    assert_eq!(first.len(), 1);
}

#[test]
fn lambda_with_no_calls_yields_nothing() {
    let source = "\
var app = WebApplication.Create();
app.MapGet(\"/\", () => 42);
[Authorize]
void Hello() { }
";
    assert!(check(source).is_empty());
}

#[test]
fn callee_shapes_other_than_identifiers_are_outside_the_pattern() {
    let source = "\
var app = WebApplication.Create();
app.MapGet(\"/\", () => Helpers.Hello());
[Authorize]
void Hello() { }
";
    // `Helpers.Hello()` is a member access, not a bare identifier.
    let tree = syntax::parse(source).expect("source parses");
    let (_, lambda) = syntax::route_registrations(tree.root_node(), source)[0];
    let body = syntax::anonymous_function_body(lambda).unwrap();
    let nested = syntax::invocations_within(body);
    assert_eq!(nested.len(), 1);
    assert_eq!(syntax::callee_shape(nested[0], source), CalleeShape::Other);

    assert!(check(source).is_empty());
}

#[test]
fn name_resolution_is_case_sensitive() {
    let source = "\
var app = WebApplication.Create();
app.MapGet(\"/\", () => hello());
[Authorize]
void Hello() { }
";
    assert!(check(source).is_empty());
}

#[test]
fn attributes_anywhere_in_file_are_found_regardless_of_position() {
    // Declaration before the registration; lookup spans the whole file.
    let source = "\
var app = WebApplication.Create();
[Authorize]
void Hello() { }
app.MapGet(\"/\", () => Hello());
";
    let diagnostics = check(source);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(
        diagnostics[0].message,
        "Authorize should be placed on the delegate instead of Hello"
    );
}
