//! Call graph data model: qualified names, declarations, and caller → callee edges.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

/// Identifier of a declared unit: `Foo` for a function, `Type.Method` for a method.
pub type QualifiedName = String;

/// Corpus-wide set of every declared [`QualifiedName`].
pub type DeclarationSet = BTreeSet<QualifiedName>;

/// Build the qualified name for a function, or for a method when a receiver
/// type name is given. Declarations and call sites both go through here.
pub fn qualified_name(receiver: Option<&str>, function: &str) -> QualifiedName {
    match receiver {
        Some(receiver) => format!("{}.{}", receiver, function),
        None => function.to_string(),
    }
}

/// A top-level function or method declaration and where it lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    pub name: QualifiedName,
    /// Bare function or method identifier.
    pub function: String,
    /// Simple receiver type name for methods.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receiver: Option<String>,
    pub file: PathBuf,
    /// 1-based line of the `func` keyword.
    pub line: usize,
}

impl Declaration {
    pub fn new(
        receiver: Option<&str>,
        function: &str,
        file: impl Into<PathBuf>,
        line: usize,
    ) -> Self {
        Self {
            name: qualified_name(receiver, function),
            function: function.to_string(),
            receiver: receiver.map(String::from),
            file: file.into(),
            line,
        }
    }
}

/// Declarations gathered over a whole corpus.
///
/// Every record is kept in discovery order, so `main` declared in two
/// `cmd/*/main.go` files shows up twice in [`declarations`](Self::declarations).
/// Names merge across files: [`get`](Self::get) returns the first record seen
/// for a name, which is the location lineage links point at.
#[derive(Debug, Clone, Default)]
pub struct DeclarationIndex {
    names: DeclarationSet,
    records: Vec<Declaration>,
    first: BTreeMap<QualifiedName, usize>,
}

impl DeclarationIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a declaration. Returns `false` if the name was already known;
    /// the record is kept either way.
    pub fn insert(&mut self, declaration: Declaration) -> bool {
        let fresh = self.names.insert(declaration.name.clone());
        if fresh {
            self.first.insert(declaration.name.clone(), self.records.len());
        }
        self.records.push(declaration);
        fresh
    }

    pub fn names(&self) -> &DeclarationSet {
        &self.names
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// First declaration recorded for `name`.
    pub fn get(&self, name: &str) -> Option<&Declaration> {
        self.first.get(name).map(|&i| &self.records[i])
    }

    /// Every declaration record, in discovery order.
    pub fn declarations(&self) -> impl Iterator<Item = &Declaration> {
        self.records.iter()
    }

    /// Number of declaration records (at least `names().len()`).
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Extend<Declaration> for DeclarationIndex {
    fn extend<I: IntoIterator<Item = Declaration>>(&mut self, iter: I) {
        for declaration in iter {
            self.insert(declaration);
        }
    }
}

/// Directed call graph: caller → distinct callees in first-seen order.
///
/// Callers iterate in sorted order so two renderings of the same graph are
/// byte-identical regardless of file discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CallGraph {
    callers: BTreeMap<QualifiedName, Vec<QualifiedName>>,
}

impl CallGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// A graph with every declared name present as a caller with no callees.
    pub fn with_callers(names: &DeclarationSet) -> Self {
        Self {
            callers: names.iter().map(|n| (n.clone(), Vec::new())).collect(),
        }
    }

    /// Make sure `caller` is a key, leaving existing callees untouched.
    pub fn ensure_caller(&mut self, caller: &str) {
        if !self.callers.contains_key(caller) {
            self.callers.insert(caller.to_string(), Vec::new());
        }
    }

    /// Add `caller -> callee` unless already present. Returns whether the edge was new.
    pub fn add_edge(&mut self, caller: &str, callee: &str) -> bool {
        let callees = self.callers.entry(caller.to_string()).or_default();
        if callees.iter().any(|c| c == callee) {
            return false;
        }
        callees.push(callee.to_string());
        true
    }

    /// Append callees for `caller`, skipping any already recorded.
    pub fn merge<I, S>(&mut self, caller: &str, callees: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.ensure_caller(caller);
        for callee in callees {
            self.add_edge(caller, callee.as_ref());
        }
    }

    pub fn callees(&self, caller: &str) -> Option<&[QualifiedName]> {
        self.callers.get(caller).map(Vec::as_slice)
    }

    pub fn contains(&self, caller: &str) -> bool {
        self.callers.contains_key(caller)
    }

    /// Number of callers (equals the number of declared names after assembly).
    pub fn len(&self) -> usize {
        self.callers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callers.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.callers.values().map(Vec::len).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&QualifiedName, &[QualifiedName])> {
        self.callers.iter().map(|(k, v)| (k, v.as_slice()))
    }
}
