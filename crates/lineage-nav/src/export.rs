//! Export a call graph as plain text, JSON, or DOT (Graphviz).

use lineage_core::graph::CallGraph;
use std::fmt::Write;
use std::str::FromStr;

/// Export format for graph rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Text,
    Json,
    Dot,
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "dot" | "graphviz" => Ok(Self::Dot),
            other => Err(format!(
                "unknown format '{}' (expected text, json, or dot)",
                other
            )),
        }
    }
}

/// Render `graph` in the requested format.
pub fn render(graph: &CallGraph, format: ExportFormat) -> serde_json::Result<String> {
    match format {
        ExportFormat::Text => Ok(export_text(graph)),
        ExportFormat::Json => export_json(graph),
        ExportFormat::Dot => Ok(export_dot(graph)),
    }
}

/// One block per caller: `<caller> calls:` followed by `  - <callee>` lines.
pub fn export_text(graph: &CallGraph) -> String {
    let mut out = String::new();
    for (caller, callees) in graph.iter() {
        writeln!(out, "{} calls:", caller).unwrap();
        for callee in callees {
            writeln!(out, "  - {}", callee).unwrap();
        }
    }
    out
}

/// Pretty-printed `{caller: [callees]}` object.
pub fn export_json(graph: &CallGraph) -> serde_json::Result<String> {
    let mut json = serde_json::to_string_pretty(graph)?;
    json.push('\n');
    Ok(json)
}

/// Export the graph as a DOT (Graphviz) string.
pub fn export_dot(graph: &CallGraph) -> String {
    let mut out = String::new();
    writeln!(out, "digraph CallGraph {{").unwrap();
    writeln!(out, "  rankdir=TB;").unwrap();
    writeln!(
        out,
        "  node [shape=box, style=\"rounded,filled\", fillcolor=\"#ffffff\", fontname=\"Courier\", fontsize=10];"
    )
    .unwrap();
    writeln!(out, "  edge [arrowhead=vee, arrowsize=0.8];").unwrap();
    writeln!(out).unwrap();

    for (caller, _) in graph.iter() {
        let shape = if caller.contains('.') { "box" } else { "ellipse" };
        writeln!(
            out,
            "  \"{}\" [shape={}];",
            dot_escape(caller),
            shape
        )
        .unwrap();
    }

    writeln!(out).unwrap();

    for (caller, callees) in graph.iter() {
        for callee in callees {
            writeln!(
                out,
                "  \"{}\" -> \"{}\";",
                dot_escape(caller),
                dot_escape(callee)
            )
            .unwrap();
        }
    }

    writeln!(out, "}}").unwrap();
    out
}

fn dot_escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}
