//! Caller lineage: breadth-first walk up the call graph from one function.

use lineage_core::graph::{CallGraph, Declaration, DeclarationIndex, QualifiedName};
use lineage_parser::pipeline::Analysis;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet, VecDeque};
use std::path::{Path, PathBuf};

/// One transitive caller of the lineage origin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineageEntry {
    pub caller: QualifiedName,
    /// 1 for direct callers, 2 for their callers, and so on.
    pub depth: usize,
    pub file: PathBuf,
    pub line: usize,
}

/// Every function that can reach `origin` through declared calls.
#[derive(Debug, Clone, Serialize)]
pub struct Lineage {
    pub origin: QualifiedName,
    pub callers: Vec<LineageEntry>,
    pub max_depth_reached: usize,
}

/// Reverse adjacency of a call graph: callee → direct callers (sorted).
#[derive(Debug, Clone, Default)]
pub struct CallerIndex<'g> {
    callers: BTreeMap<&'g str, Vec<&'g str>>,
}

impl<'g> CallerIndex<'g> {
    pub fn new(graph: &'g CallGraph) -> Self {
        let mut callers: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        for (caller, callees) in graph.iter() {
            for callee in callees {
                callers
                    .entry(callee.as_str())
                    .or_default()
                    .push(caller.as_str());
            }
        }
        Self { callers }
    }

    pub fn direct(&self, callee: &str) -> &[&'g str] {
        self.callers.get(callee).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Walk callers of `origin` breadth-first, up to `max_depth` levels
    /// (unbounded when `None`). Returns `None` if `origin` is not declared.
    ///
    /// Each caller is reported once, at its shallowest depth. Cycles
    /// terminate, and `origin` never appears in its own lineage.
    pub fn lineage(
        &self,
        declarations: &DeclarationIndex,
        origin: &str,
        max_depth: Option<usize>,
    ) -> Option<Lineage> {
        if !declarations.contains(origin) {
            return None;
        }
        let limit = max_depth.unwrap_or(usize::MAX);

        let mut visited = HashSet::new();
        visited.insert(origin);
        let mut queue = VecDeque::new();
        queue.push_back((origin, 0usize));

        let mut callers = Vec::new();
        let mut max_depth_reached = 0;

        while let Some((current, depth)) = queue.pop_front() {
            if depth >= limit {
                continue;
            }
            for &caller in self.direct(current) {
                if !visited.insert(caller) {
                    continue;
                }
                let Some(decl) = declarations.get(caller) else {
                    continue;
                };
                let new_depth = depth + 1;
                max_depth_reached = max_depth_reached.max(new_depth);
                callers.push(LineageEntry {
                    caller: caller.to_string(),
                    depth: new_depth,
                    file: decl.file.clone(),
                    line: decl.line,
                });
                queue.push_back((caller, new_depth));
            }
        }

        Some(Lineage {
            origin: origin.to_string(),
            callers,
            max_depth_reached,
        })
    }
}

/// Lineage of `origin` in a finished analysis.
pub fn lineage(analysis: &Analysis, origin: &str, max_depth: Option<usize>) -> Option<Lineage> {
    CallerIndex::new(&analysis.graph).lineage(&analysis.declarations, origin, max_depth)
}

/// Declarations whose location is `file`, in line order.
///
/// `file` may be relative to the analysis root or an absolute path under it.
pub fn functions_in_file<'a>(analysis: &'a Analysis, file: &Path) -> Vec<&'a Declaration> {
    let relative = file.strip_prefix(&analysis.root).unwrap_or(file);
    let mut found: Vec<&Declaration> = analysis
        .declarations
        .declarations()
        .filter(|d| d.file == relative)
        .collect();
    found.sort_by_key(|d| d.line);
    found
}
