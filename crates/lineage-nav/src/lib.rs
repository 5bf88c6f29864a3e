//! Navigation over an assembled call graph.
//!
//! Renders graphs as text, JSON or DOT (Graphviz), and answers "who calls
//! this?" queries by walking the graph backwards from a function.

pub mod export;
pub mod lineage;
