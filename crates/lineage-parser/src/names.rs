//! Name resolution for receivers and call targets.
//!
//! Both resolutions are purely syntactic. A call through `t.N()` resolves to
//! `t.N` no matter what type `t` has, so it only matches a declared method
//! when the qualifier happens to be spelled like the receiver type.

use lineage_core::graph::{QualifiedName, qualified_name};

/// Outcome of resolving a method receiver's type expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReceiverType<'a> {
    /// Simple type name, with pointer, parentheses and type arguments stripped.
    Named(&'a str),
    /// The type expression has a shape we do not name (the method is skipped).
    Unresolved,
}

/// Outcome of resolving a call expression's callee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallTarget {
    /// `f(..)` → `f`, `x.f(..)` → `x.f`.
    Candidate(QualifiedName),
    /// Any other callee shape (the call site is ignored).
    Unsupported,
}

/// Resolve the receiver type of a `method_declaration` node.
pub fn receiver_type<'a>(method: &tree_sitter::Node, source: &'a str) -> ReceiverType<'a> {
    let Some(params) = method.child_by_field_name("receiver") else {
        return ReceiverType::Unresolved;
    };
    let mut cursor = params.walk();
    let param = params
        .named_children(&mut cursor)
        .find(|n| n.kind() == "parameter_declaration");
    match param.and_then(|p| p.child_by_field_name("type")) {
        Some(ty) => type_name(&ty, source),
        None => ReceiverType::Unresolved,
    }
}

fn type_name<'a>(node: &tree_sitter::Node, source: &'a str) -> ReceiverType<'a> {
    match node.kind() {
        "type_identifier" => ReceiverType::Named(&source[node.byte_range()]),
        "pointer_type" | "parenthesized_type" => {
            let mut cursor = node.walk();
            let inner = node.named_children(&mut cursor).next();
            match inner {
                Some(inner) => type_name(&inner, source),
                None => ReceiverType::Unresolved,
            }
        }
        "generic_type" => match node.child_by_field_name("type") {
            Some(base) if base.kind() == "type_identifier" => {
                ReceiverType::Named(&source[base.byte_range()])
            }
            _ => ReceiverType::Unresolved,
        },
        _ => ReceiverType::Unresolved,
    }
}

/// Resolve the callee of a `call_expression` node.
pub fn call_target(call: &tree_sitter::Node, source: &str) -> CallTarget {
    // f[int](x) is an index expression in Go's own AST, not a named call.
    if call.child_by_field_name("type_arguments").is_some() {
        return CallTarget::Unsupported;
    }
    let Some(function) = call.child_by_field_name("function") else {
        return CallTarget::Unsupported;
    };
    match function.kind() {
        "identifier" => CallTarget::Candidate(source[function.byte_range()].to_string()),
        "selector_expression" => {
            let operand = function.child_by_field_name("operand");
            let field = function.child_by_field_name("field");
            match (operand, field) {
                (Some(operand), Some(field)) if operand.kind() == "identifier" => {
                    CallTarget::Candidate(qualified_name(
                        Some(&source[operand.byte_range()]),
                        &source[field.byte_range()],
                    ))
                }
                _ => CallTarget::Unsupported,
            }
        }
        _ => CallTarget::Unsupported,
    }
}
