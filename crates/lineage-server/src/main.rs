//! codelineage-server: answers caller-lineage requests over stdin/stdout.
//!
//! Requests are JSON objects, e.g. `{"type":"GET_LINEAGES","fileName":"cmd/main.go"}`.
//! Each response is a single line of JSON. Logs go to stderr.

use anyhow::{Context, Result};
use clap::Parser;
use lineage_core::config::LineageConfig;
use lineage_server::server::LineageServer;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "codelineage-server", version, about)]
struct Cli {
    /// Project root to analyze (defaults to the current directory)
    root: Option<PathBuf>,

    /// Explicit config file instead of `.lineage/config.toml`
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let root = match cli.root {
        Some(root) => root,
        None => std::env::current_dir().context("failed to get current directory")?,
    };
    let root = root
        .canonicalize()
        .with_context(|| format!("project root not found: {}", root.display()))?;

    let config = match &cli.config {
        Some(path) => LineageConfig::load_file(path)?,
        None => LineageConfig::load(&root)?,
    };

    let server = LineageServer::new(root, config.discovery);
    tracing::info!(root = %server.root().display(), "codelineage-server starting");
    let served = server.serve(std::io::stdin().lock(), std::io::stdout().lock())?;
    tracing::info!(served, "input closed, shutting down");
    Ok(())
}
