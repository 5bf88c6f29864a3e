//! Stdio request/response loop answering caller-lineage queries for editors.
//!
//! Reads a stream of JSON request objects and writes one JSON response object
//! per request. Each request triggers a fresh analysis of the project root.

pub mod server;
pub mod types;
