//! Two-pass call graph assembly over a corpus.
//!
//! Pass 1 unions every file's declarations into one corpus-wide set. Pass 2
//! resolves each file's call sites against that set. Pass 2 never starts
//! before pass 1 has seen every file, so a call into a file discovered later
//! still resolves.

use crate::calls::extract_edges;
use crate::declarations::collect_declarations;
use crate::discovery::discover;
use crate::languages::Language;
use crate::treesitter::{ParsedFile, parse_file, parse_source};
use lineage_core::config::DiscoveryConfig;
use lineage_core::error::AnalysisError;
use lineage_core::graph::{CallGraph, DeclarationIndex};
use std::path::{Path, PathBuf};

/// Result of one analysis run.
#[derive(Debug, Clone)]
pub struct Analysis {
    /// Directory that file paths are relative to.
    pub root: PathBuf,
    /// Analyzed files in discovery order.
    pub files: Vec<PathBuf>,
    pub declarations: DeclarationIndex,
    pub graph: CallGraph,
}

/// Pass 1: every declaration in the corpus, merged by qualified name.
pub fn collect_corpus_declarations(corpus: &[ParsedFile]) -> DeclarationIndex {
    corpus
        .iter()
        .fold(DeclarationIndex::new(), |mut index, file| {
            index.extend(collect_declarations(file));
            index
        })
}

/// Pass 2 folded over the corpus, starting from a graph with every declared
/// name as a caller.
pub fn assemble(corpus: &[ParsedFile], declarations: &DeclarationIndex) -> CallGraph {
    let names = declarations.names();
    corpus
        .iter()
        .fold(CallGraph::with_callers(names), |mut graph, file| {
            for edges in extract_edges(file, names) {
                graph.merge(&edges.caller, &edges.callees);
            }
            graph
        })
}

/// Run both passes over already-parsed files.
pub fn build_call_graph(corpus: &[ParsedFile]) -> (DeclarationIndex, CallGraph) {
    let declarations = collect_corpus_declarations(corpus);
    tracing::debug!(
        files = corpus.len(),
        declarations = declarations.len(),
        "collected declarations"
    );
    let graph = assemble(corpus, &declarations);
    (declarations, graph)
}

/// Parse the given files (relative to `root`) and build the call graph.
///
/// The first unreadable or unparsable file aborts the run.
pub fn analyze_files(root: &Path, files: &[PathBuf]) -> Result<Analysis, AnalysisError> {
    let mut corpus = Vec::with_capacity(files.len());
    for path in files {
        tracing::debug!(path = %path.display(), "parsing");
        corpus.push(parse_file(root, path)?);
    }
    Ok(finish(root.to_path_buf(), corpus))
}

/// Build a call graph from in-memory sources, given as `(path, text)` pairs.
pub fn analyze_sources<I, P>(sources: I) -> Result<Analysis, AnalysisError>
where
    I: IntoIterator<Item = (P, String)>,
    P: Into<PathBuf>,
{
    let corpus = sources
        .into_iter()
        .map(|(path, source)| parse_source(path, source, Language::Go))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(finish(PathBuf::new(), corpus))
}

/// Enumerate, parse, and assemble everything under `root`.
pub fn analyze_directory(
    root: &Path,
    config: &DiscoveryConfig,
) -> Result<Analysis, AnalysisError> {
    let sources = discover(root, config)?;
    let base = sources.base().to_path_buf();
    let files = sources.collect::<Result<Vec<_>, _>>()?;
    analyze_files(&base, &files)
}

fn finish(root: PathBuf, corpus: Vec<ParsedFile>) -> Analysis {
    let (declarations, graph) = build_call_graph(&corpus);
    tracing::info!(
        files = corpus.len(),
        functions = graph.len(),
        edges = graph.edge_count(),
        "call graph assembled"
    );
    Analysis {
        root,
        files: corpus.into_iter().map(|f| f.path).collect(),
        declarations,
        graph,
    }
}
