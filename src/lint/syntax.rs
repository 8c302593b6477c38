//! C# syntax tree support for minimal-API analysis.
//!
//! Thin layer over the tree-sitter C# grammar: parsing, the node-shape
//! recognizers the rules need (invocations, anonymous functions, local
//! function declarations, attribute lists), and conversion from tree-sitter
//! positions to 1-indexed ranges.
//!
//! Everything here is read-only over an already-parsed [`Tree`]; no node is
//! ever mutated and no state outlives a single analysis pass.

use tree_sitter::{Node, Parser, Tree};

use super::rules::Range;

/// Route-registration method names recognized as minimal-API handler
/// registrations. The callee may be a bare identifier or the name side of a
/// member access (`app.MapGet`).
pub const ROUTE_REGISTRATION_METHODS: &[&str] = &[
    "Map",
    "MapGet",
    "MapPost",
    "MapPut",
    "MapDelete",
    "MapPatch",
    "MapMethods",
    "MapFallback",
    "MapGroup",
];

/// Parse C# source into a syntax tree.
///
/// Returns `None` when the parser cannot produce a tree at all (the
/// degenerate-document case); callers treat that as "no findings", never as
/// an error.
pub fn parse(source: &str) -> Option<Tree> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_c_sharp::LANGUAGE.into())
        .ok()?;
    parser.parse(source, None)
}

/// Extract the text of a node from the source it was parsed from.
pub fn node_text<'s>(node: Node<'_>, source: &'s str) -> &'s str {
    node.utf8_text(source.as_bytes()).unwrap_or("")
}

/// Convert a node's span to a 1-indexed [`Range`].
pub fn range_of(node: Node<'_>) -> Range {
    let start = node.start_position();
    let end = node.end_position();
    Range::new(start.row + 1, start.column + 1, end.row + 1, end.column + 1)
}

pub fn is_invocation(node: Node<'_>) -> bool {
    node.kind() == "invocation_expression"
}

/// Lambda literals and `delegate` expressions both register as handlers.
pub fn is_anonymous_function(node: Node<'_>) -> bool {
    matches!(
        node.kind(),
        "lambda_expression" | "anonymous_method_expression"
    )
}

// ---------------------------------------------------------------------------
// Callee shapes
// ---------------------------------------------------------------------------

/// The shape of an invocation's callee expression.
///
/// Only a bare identifier is a supported callee for local-function
/// resolution; everything else (member access, invocation-of-invocation,
/// conditional access, ...) is an explicit non-match rather than an implicit
/// assumption.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalleeShape<'s> {
    /// An unqualified function reference, e.g. `Hello()`.
    Identifier(&'s str),
    /// Any other callee expression; outside the supported pattern.
    Other,
}

/// Classify the callee of an invocation.
pub fn callee_shape<'s>(invocation: Node<'_>, source: &'s str) -> CalleeShape<'s> {
    match invocation.child_by_field_name("function") {
        Some(callee) if callee.kind() == "identifier" => {
            CalleeShape::Identifier(node_text(callee, source))
        }
        _ => CalleeShape::Other,
    }
}

/// The simple name of an invocation's callee: the identifier itself, or the
/// name side of a member access. `None` for anything more exotic.
pub fn callee_simple_name<'s>(invocation: Node<'_>, source: &'s str) -> Option<&'s str> {
    let callee = invocation.child_by_field_name("function")?;
    match callee.kind() {
        "identifier" => Some(node_text(callee, source)),
        "member_access_expression" => callee
            .child_by_field_name("name")
            .map(|name| node_text(name, source)),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Traversal
// ---------------------------------------------------------------------------

/// All invocation nodes within a subtree, in source order, at any nesting
/// depth. Includes `node` itself when it is an invocation (an
/// expression-bodied lambda's body *is* the call).
pub fn invocations_within<'t>(node: Node<'t>) -> Vec<Node<'t>> {
    let mut out = Vec::new();
    collect_invocations(node, &mut out);
    out
}

fn collect_invocations<'t>(node: Node<'t>, out: &mut Vec<Node<'t>>) {
    if is_invocation(node) {
        out.push(node);
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_invocations(child, out);
    }
}

/// The body subtree of a lambda or anonymous-method expression.
pub fn anonymous_function_body<'t>(node: Node<'t>) -> Option<Node<'t>> {
    node.child_by_field_name("body").or_else(|| {
        // anonymous_method_expression carries its block without a field name
        let mut cursor = node.walk();
        let found = node.named_children(&mut cursor).find(|c| c.kind() == "block");
        found
    })
}

// ---------------------------------------------------------------------------
// Local function declarations
// ---------------------------------------------------------------------------

/// An attribute as written in source, e.g. `Authorize` in `[Authorize]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeInfo {
    /// The attribute name text as written (may be qualified).
    pub name: String,
    pub range: Range,
}

/// A named local function declared in the file, summarized for resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalFunction {
    /// Simple identifier text of the declaration.
    pub name: String,
    /// Span of the whole declaration, starting at its first attribute list.
    pub range: Range,
    /// Attribute lists in declaration order, each holding attributes in
    /// written order.
    pub attribute_lists: Vec<Vec<AttributeInfo>>,
}

/// Collect every local function declaration in the file, in source order.
pub fn local_functions(root: Node<'_>, source: &str) -> Vec<LocalFunction> {
    let mut out = Vec::new();
    collect_local_functions(root, source, &mut out);
    out
}

fn collect_local_functions(node: Node<'_>, source: &str, out: &mut Vec<LocalFunction>) {
    if node.kind() == "local_function_statement" {
        if let Some(func) = summarize_local_function(node, source) {
            out.push(func);
        }
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_local_functions(child, source, out);
    }
}

fn summarize_local_function(node: Node<'_>, source: &str) -> Option<LocalFunction> {
    let name = node.child_by_field_name("name")?;
    if name.kind() != "identifier" {
        return None;
    }

    let mut attribute_lists = Vec::new();
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if child.kind() != "attribute_list" {
            continue;
        }
        let mut attributes = Vec::new();
        let mut inner = child.walk();
        for attr in child.named_children(&mut inner) {
            if attr.kind() != "attribute" {
                continue;
            }
            let attr_name = attr
                .child_by_field_name("name")
                .map(|n| node_text(n, source))
                .unwrap_or_else(|| node_text(attr, source));
            attributes.push(AttributeInfo {
                name: attr_name.to_string(),
                range: range_of(attr),
            });
        }
        attribute_lists.push(attributes);
    }

    Some(LocalFunction {
        name: node_text(name, source).to_string(),
        range: range_of(node),
        attribute_lists,
    })
}

// ---------------------------------------------------------------------------
// Route registrations
// ---------------------------------------------------------------------------

/// The first anonymous-function argument of an invocation, if any.
pub fn anonymous_function_argument<'t>(invocation: Node<'t>) -> Option<Node<'t>> {
    let args = invocation.child_by_field_name("arguments")?;
    let mut cursor = args.walk();
    for arg in args.named_children(&mut cursor) {
        if arg.kind() != "argument" {
            continue;
        }
        let mut inner = arg.walk();
        let lambda = arg.named_children(&mut inner).find(|c| is_anonymous_function(*c));
        if let Some(lambda) = lambda {
            return Some(lambda);
        }
    }
    None
}

/// Find every route-registration invocation in the file that passes an
/// anonymous function as a handler, in source order.
///
/// This is the trigger condition: an invocation whose callee's simple name
/// is in the `Map*` family and whose argument list contains a lambda or
/// `delegate` expression.
pub fn route_registrations<'t>(root: Node<'t>, source: &str) -> Vec<(Node<'t>, Node<'t>)> {
    let mut out = Vec::new();
    collect_route_registrations(root, source, &mut out);
    out
}

fn collect_route_registrations<'t>(
    node: Node<'t>,
    source: &str,
    out: &mut Vec<(Node<'t>, Node<'t>)>,
) {
    if is_invocation(node) {
        let is_registration = callee_simple_name(node, source)
            .is_some_and(|name| ROUTE_REGISTRATION_METHODS.contains(&name));
        if is_registration {
            if let Some(lambda) = anonymous_function_argument(node) {
                out.push((node, lambda));
            }
        }
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_route_registrations(child, source, out);
    }
}
