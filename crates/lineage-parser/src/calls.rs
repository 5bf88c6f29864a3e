//! Resolve call sites inside each declaration against the corpus-wide
//! declaration set.

use crate::declarations::declared_nodes;
use crate::names::{CallTarget, call_target};
use crate::treesitter::ParsedFile;
use lineage_core::graph::{DeclarationSet, QualifiedName};

/// Callees of one declared caller in one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerEdges {
    pub caller: QualifiedName,
    /// Distinct declared callees in order of first call site.
    pub callees: Vec<QualifiedName>,
}

/// For every declaration in `file` (in source order), the declared names it calls.
///
/// The whole declaration subtree is searched, so calls in closures, deferred
/// statements and goroutines count toward the enclosing declaration. Call
/// sites whose target is not in `declared` are dropped.
pub fn extract_edges(file: &ParsedFile, declared: &DeclarationSet) -> Vec<CallerEdges> {
    declared_nodes(file)
        .into_iter()
        .map(|d| {
            let mut callees = Vec::new();
            collect_calls(&d.node, &file.source, declared, &mut callees);
            CallerEdges {
                caller: d.declaration.name,
                callees,
            }
        })
        .collect()
}

/// Pre-order walk: an outer call is seen before calls in its arguments.
fn collect_calls(
    node: &tree_sitter::Node,
    source: &str,
    declared: &DeclarationSet,
    callees: &mut Vec<QualifiedName>,
) {
    if node.kind() == "call_expression" {
        match call_target(node, source) {
            CallTarget::Candidate(name) => {
                if declared.contains(&name) && !callees.contains(&name) {
                    callees.push(name);
                }
            }
            CallTarget::Unsupported => {
                tracing::trace!(
                    line = node.start_position().row + 1,
                    "ignoring call with unsupported target shape"
                );
            }
        }
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_calls(&child, source, declared, callees);
    }
}
