//! Tree-sitter based call graph extraction for Go sources.
//!
//! Discovers source files, parses them, collects top-level function and
//! method declarations across the corpus, then resolves call sites against
//! that corpus-wide declaration set.

pub mod calls;
pub mod declarations;
pub mod discovery;
pub mod languages;
pub mod names;
pub mod pipeline;
pub mod treesitter;
