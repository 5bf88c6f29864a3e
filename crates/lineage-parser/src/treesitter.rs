//! Tree-sitter integration: source text in, syntax tree out.
//!
//! Tree-sitter recovers from syntax errors by inserting `ERROR` and `MISSING`
//! nodes. A file whose tree contains any of them is rejected, so the
//! extractor only ever sees well-formed trees.

use crate::languages::Language;
use lineage_core::error::AnalysisError;
use std::path::{Path, PathBuf};

/// One successfully parsed source file.
pub struct ParsedFile {
    /// Path as reported in declarations (relative to the analysis root when known).
    pub path: PathBuf,
    pub source: String,
    pub tree: tree_sitter::Tree,
}

impl ParsedFile {
    pub fn root(&self) -> tree_sitter::Node<'_> {
        self.tree.root_node()
    }

    /// Source text covered by `node`.
    pub fn text(&self, node: &tree_sitter::Node) -> &str {
        &self.source[node.byte_range()]
    }
}

impl std::fmt::Debug for ParsedFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParsedFile")
            .field("path", &self.path)
            .field("bytes", &self.source.len())
            .finish_non_exhaustive()
    }
}

/// Parse in-memory source text.
pub fn parse_source(
    path: impl Into<PathBuf>,
    source: String,
    language: Language,
) -> Result<ParsedFile, AnalysisError> {
    let path = path.into();
    let mut parser = tree_sitter::Parser::new();
    parser
        .set_language(&language.ts_language())
        .map_err(|e| AnalysisError::Grammar(e.to_string()))?;
    let tree = parser
        .parse(source.as_bytes(), None)
        .ok_or_else(|| AnalysisError::Parse {
            path: path.clone(),
            line: 1,
            column: 1,
        })?;

    if let Some(bad) = first_syntax_error(tree.root_node()) {
        let pos = bad.start_position();
        return Err(AnalysisError::Parse {
            path,
            line: pos.row + 1,
            column: pos.column + 1,
        });
    }

    Ok(ParsedFile { path, source, tree })
}

/// Read and parse `root.join(relative)`, keeping `relative` as the reported path.
pub fn parse_file(root: &Path, relative: &Path) -> Result<ParsedFile, AnalysisError> {
    let full = root.join(relative);
    let source = std::fs::read_to_string(&full).map_err(|source| AnalysisError::Read {
        path: full.clone(),
        source,
    })?;
    let language = Language::from_path(relative).unwrap_or(Language::Go);
    parse_source(relative, source, language)
}

/// The first `ERROR` or `MISSING` node in document order.
fn first_syntax_error(node: tree_sitter::Node<'_>) -> Option<tree_sitter::Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    node.children(&mut cursor).find_map(first_syntax_error)
}
