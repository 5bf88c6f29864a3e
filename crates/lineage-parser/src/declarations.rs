//! Collect top-level function and method declarations from a parsed file.

use crate::names::{ReceiverType, receiver_type};
use crate::treesitter::ParsedFile;
use lineage_core::graph::{Declaration, DeclarationSet};

/// A declaration together with the syntax node it came from.
pub(crate) struct DeclaredNode<'t> {
    pub declaration: Declaration,
    pub node: tree_sitter::Node<'t>,
}

/// Walk the file's top level and name every function and method.
///
/// Methods whose receiver type cannot be reduced to a simple name are skipped.
pub(crate) fn declared_nodes(file: &ParsedFile) -> Vec<DeclaredNode<'_>> {
    let root = file.root();
    let mut out = Vec::new();
    let mut cursor = root.walk();
    for child in root.named_children(&mut cursor) {
        let receiver = match child.kind() {
            "function_declaration" => None,
            "method_declaration" => match receiver_type(&child, &file.source) {
                ReceiverType::Named(name) => Some(name),
                ReceiverType::Unresolved => {
                    tracing::trace!(
                        file = %file.path.display(),
                        line = child.start_position().row + 1,
                        "skipping method with unresolved receiver type"
                    );
                    continue;
                }
            },
            _ => continue,
        };
        let Some(name_node) = child.child_by_field_name("name") else {
            continue;
        };
        out.push(DeclaredNode {
            declaration: Declaration::new(
                receiver,
                file.text(&name_node),
                file.path.clone(),
                child.start_position().row + 1,
            ),
            node: child,
        });
    }
    out
}

/// Declarations in source order.
pub fn collect_declarations(file: &ParsedFile) -> Vec<Declaration> {
    declared_nodes(file)
        .into_iter()
        .map(|d| d.declaration)
        .collect()
}

/// The qualified names declared in one file.
pub fn declared_names(file: &ParsedFile) -> DeclarationSet {
    declared_nodes(file)
        .into_iter()
        .map(|d| d.declaration.name)
        .collect()
}
