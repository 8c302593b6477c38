//! ASP0004: attribute placed on an invoked local function instead of the
//! registered handler delegate.
//!
//! `app.MapGet("/", () => Hello());` with `[Authorize] void Hello() { }`
//! looks protected but is not: attributes only take effect on the delegate
//! that gets registered, so the `[Authorize]` on `Hello` is silently
//! ignored. The detector walks the handler lambda's body for calls to local
//! functions declared in the same file and reports every attribute attached
//! to such a callee.

use std::path::Path;

use tracing::debug;
use tree_sitter::Node;

use super::rules::{CancelFlag, Diagnostic, Rule, RuleCode};
use super::syntax::{self, CalleeShape};

/// Detect misplaced attributes for one matched (invocation, lambda) pair.
///
/// `invocation` must be a route-registration invocation whose argument list
/// contains `lambda`; the caller owns that trigger condition. The result
/// preserves call-site source order, then attribute-list order, then
/// attribute order within each list. Every diagnostic for attributes on the
/// same declaration carries the declaration's own span, pointing the user at
/// the function rather than at each attribute token.
///
/// Pure function over the tree: no state, idempotent, never fails. Callee
/// shapes other than a bare identifier, names that resolve to no local
/// function, and lambdas without a body all degrade to "no findings".
pub fn detect(
    root: Node<'_>,
    source: &str,
    invocation: Node<'_>,
    lambda: Node<'_>,
    file: &Path,
    cancel: &CancelFlag,
) -> Vec<Diagnostic> {
    debug_assert!(syntax::is_invocation(invocation));
    debug_assert!(
        lambda.start_byte() >= invocation.start_byte()
            && lambda.end_byte() <= invocation.end_byte(),
        "lambda must be contained in the invocation's argument list"
    );

    let Some(body) = syntax::anonymous_function_body(lambda) else {
        return Vec::new();
    };

    let nested = syntax::invocations_within(body);
    if nested.is_empty() {
        // A handler that calls no named function cannot misplace an
        // attribute on one.
        return Vec::new();
    }

    let locals = syntax::local_functions(root, source);
    let descriptor = RuleCode::Asp0004.descriptor();
    let mut diagnostics = Vec::new();

    for invoke in nested {
        if cancel.is_cancelled() {
            break;
        }

        let name = match syntax::callee_shape(invoke, source) {
            CalleeShape::Identifier(name) => name,
            // Member accesses, chained calls, etc. are outside the pattern.
            CalleeShape::Other => continue,
        };

        // Resolve against the whole file, exact and case-sensitive. The
        // no-match check happens before any field access; on duplicates the
        // first declaration in source order wins.
        let mut candidates = locals.iter().filter(|f| f.name == name);
        let Some(declaration) = candidates.next() else {
            continue;
        };
        if candidates.next().is_some() {
            debug!(
                name,
                "multiple local functions share this name; using the first in source order"
            );
        }

        for attribute_list in &declaration.attribute_lists {
            for attribute in attribute_list {
                diagnostics.push(Diagnostic {
                    rule: RuleCode::Asp0004,
                    severity: descriptor.severity,
                    file: file.to_path_buf(),
                    range: declaration.range.clone(),
                    message: descriptor.format_message(&[&attribute.name, &declaration.name]),
                });
            }
        }
    }

    diagnostics
}

/// The ASP0004 rule: find route registrations with anonymous handler
/// arguments and run [`detect`] on each pair.
pub struct MisplacedAttributeRule;

impl MisplacedAttributeRule {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MisplacedAttributeRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for MisplacedAttributeRule {
    fn code(&self) -> RuleCode {
        RuleCode::Asp0004
    }

    fn check(&self, file: &Path, content: &str, cancel: &CancelFlag) -> Vec<Diagnostic> {
        let Some(tree) = syntax::parse(content) else {
            return Vec::new();
        };
        let root = tree.root_node();

        let mut diagnostics = Vec::new();
        for (invocation, lambda) in syntax::route_registrations(root, content) {
            if cancel.is_cancelled() {
                break;
            }
            diagnostics.extend(detect(root, content, invocation, lambda, file, cancel));
        }
        diagnostics
    }
}
