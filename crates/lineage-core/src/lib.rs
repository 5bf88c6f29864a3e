//! Core types for codelineage call graphs.
//!
//! Provides the call graph model ([`graph::CallGraph`]), qualified naming for
//! functions and methods, the corpus-wide declaration set, run configuration,
//! and the error taxonomy shared by the extraction pipeline.

pub mod config;
pub mod error;
pub mod graph;
