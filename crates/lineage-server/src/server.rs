//! `LineageServer`: request handling and the blocking stdio loop.

use crate::types::{CodeAnalysis, FunctionAnalysis, GET_LINEAGES, Lineage, Link, Request};
use anyhow::{Context, Result};
use lineage_core::config::DiscoveryConfig;
use lineage_core::error::AnalysisError;
use lineage_core::graph::Declaration;
use lineage_nav::lineage::{CallerIndex, functions_in_file};
use lineage_parser::pipeline::{Analysis, analyze_directory};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

/// Answers lineage requests for one project root.
#[derive(Debug, Clone)]
pub struct LineageServer {
    root: PathBuf,
    discovery: DiscoveryConfig,
}

impl LineageServer {
    pub fn new(root: PathBuf, discovery: DiscoveryConfig) -> Self {
        Self { root, discovery }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Handle one request. Each call re-analyzes the root so edits between
    /// requests are picked up.
    pub fn handle(&self, request: &Request) -> Result<CodeAnalysis, AnalysisError> {
        match request.kind.as_str() {
            GET_LINEAGES => {
                let analysis = analyze_directory(&self.root, &self.discovery)?;
                Ok(lineages_for(&analysis, request.file_name.as_deref()))
            }
            other => {
                tracing::warn!(kind = other, "ignoring unknown request type");
                Ok(CodeAnalysis::default())
            }
        }
    }

    /// Read concatenated JSON requests from `reader` until end of input,
    /// writing one newline-terminated response per request to `writer`.
    ///
    /// Decode and encode failures end the loop with an error. A failed
    /// analysis (say, a file mid-edit with a syntax error) is logged and
    /// answered with an empty function list. Returns the number of requests
    /// served.
    pub fn serve<R: Read, W: Write>(&self, reader: R, mut writer: W) -> Result<usize> {
        let requests = serde_json::Deserializer::from_reader(reader).into_iter::<Request>();
        let mut served = 0;
        for request in requests {
            let request = request.context("failed to decode request")?;
            tracing::debug!(kind = %request.kind, file = ?request.file_name, "request");
            let response = self.handle(&request).unwrap_or_else(|err| {
                tracing::warn!(
                    root = %self.root.display(),
                    file = ?err.path(),
                    error = %err,
                    "analysis failed, answering with no functions"
                );
                CodeAnalysis::default()
            });
            serde_json::to_writer(&mut writer, &response).context("failed to encode response")?;
            writer
                .write_all(b"\n")
                .and_then(|()| writer.flush())
                .context("failed to write response")?;
            served += 1;
        }
        Ok(served)
    }
}

/// Build the response for `file_name` (or every declaration when `None`).
pub fn lineages_for(analysis: &Analysis, file_name: Option<&str>) -> CodeAnalysis {
    let declarations: Vec<&Declaration> = match file_name {
        Some(name) => functions_in_file(analysis, Path::new(name)),
        None => {
            let mut all: Vec<&Declaration> = analysis.declarations.declarations().collect();
            all.sort_by(|a, b| a.file.cmp(&b.file).then(a.line.cmp(&b.line)));
            all
        }
    };

    let index = CallerIndex::new(&analysis.graph);
    let functions = declarations
        .into_iter()
        .map(|decl| {
            let lineages = index
                .lineage(&analysis.declarations, &decl.name, None)
                .map(|l| l.callers)
                .unwrap_or_default()
                .into_iter()
                .map(|entry| Lineage {
                    lineage: entry.caller,
                    link: Link {
                        file_name: entry.file.display().to_string(),
                        line: entry.line,
                    },
                })
                .collect();
            FunctionAnalysis {
                func_name: decl.function.clone(),
                struct_name: decl.receiver.clone().unwrap_or_default(),
                lineages,
            }
        })
        .collect();

    CodeAnalysis { functions }
}
