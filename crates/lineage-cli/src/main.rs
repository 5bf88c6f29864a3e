//! CLI binary for codelineage: extract, render, and query Go call graphs.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lineage_core::config::LineageConfig;
use lineage_nav::export::{ExportFormat, render};
use lineage_parser::discovery::discover;
use lineage_parser::pipeline::{Analysis, analyze_files};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "codelineage", version, about = "Static call graph extractor for Go")]
struct Cli {
    /// Config file to use instead of `<DIR>/.lineage/config.toml`
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the call graph and print it
    Analyze {
        /// Directory (or single file) to analyze
        dir: Option<PathBuf>,

        /// Output format: text, json, dot (defaults to the configured format)
        #[arg(short, long)]
        format: Option<String>,

        /// Write the rendering to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Glob patterns to include files (repeatable)
        #[arg(long)]
        include: Vec<String>,

        /// Glob patterns to exclude files (repeatable)
        #[arg(long)]
        exclude: Vec<String>,

        /// Walk files listed in .gitignore too
        #[arg(long)]
        no_gitignore: bool,
    },

    /// List every transitive caller of a function or method
    Callers {
        /// Qualified name, e.g. `main` or `Server.Start`
        name: String,

        /// Directory (or single file) to analyze
        dir: Option<PathBuf>,

        /// Maximum number of caller levels to walk
        #[arg(long)]
        depth: Option<usize>,
    },

    /// Show file, declaration, and edge counts
    Info {
        /// Directory (or single file) to analyze
        dir: Option<PathBuf>,
    },
}

fn resolve_dir(dir: Option<PathBuf>) -> Result<PathBuf> {
    match dir {
        Some(d) => Ok(d),
        None => std::env::current_dir().context("failed to get current directory"),
    }
}

fn load_config(explicit: Option<&Path>, dir: &Path) -> Result<LineageConfig> {
    match explicit {
        Some(path) => LineageConfig::load_file(path),
        None => LineageConfig::load(if dir.is_file() {
            dir.parent().unwrap_or(dir)
        } else {
            dir
        }),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            dir,
            format,
            output,
            include,
            exclude,
            no_gitignore,
        } => {
            let dir = resolve_dir(dir)?;
            let mut config = load_config(cli.config.as_deref(), &dir)?;
            config.discovery.include.extend(include);
            config.discovery.exclude.extend(exclude);
            if no_gitignore {
                config.discovery.respect_gitignore = false;
            }
            if let Some(format) = format {
                config.output.format = format;
            }
            cmd_analyze(&dir, &config, output.as_deref())
        }
        Commands::Callers { name, dir, depth } => {
            let dir = resolve_dir(dir)?;
            let config = load_config(cli.config.as_deref(), &dir)?;
            cmd_callers(&dir, &config, &name, depth)
        }
        Commands::Info { dir } => {
            let dir = resolve_dir(dir)?;
            let config = load_config(cli.config.as_deref(), &dir)?;
            cmd_info(&dir, &config)
        }
    }
}

/// Enumerate the corpus behind a spinner, then run both passes.
fn run_analysis(dir: &Path, config: &LineageConfig) -> Result<Analysis> {
    use indicatif::{ProgressBar, ProgressStyle};

    let sources = discover(dir, &config.discovery)?;
    let base = sources.base().to_path_buf();

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .context("invalid spinner template")?,
    );
    spinner.set_message("Scanning files...");

    let mut files = Vec::new();
    for file in sources {
        files.push(file?);
        spinner.set_message(format!("{} files collected", files.len()));
        spinner.tick();
    }
    spinner.finish_and_clear();

    if files.is_empty() {
        tracing::warn!(dir = %dir.display(), "no source files found");
    }

    let analysis = analyze_files(&base, &files)
        .with_context(|| format!("failed to analyze {}", dir.display()))?;
    Ok(analysis)
}

fn cmd_analyze(dir: &Path, config: &LineageConfig, output: Option<&Path>) -> Result<()> {
    let format: ExportFormat = config
        .output
        .format
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;
    let analysis = run_analysis(dir, config)?;
    let rendered = render(&analysis.graph, format).context("failed to render call graph")?;

    match output {
        Some(path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!(
                "Wrote {} functions, {} edges to {}",
                analysis.graph.len(),
                analysis.graph.edge_count(),
                path.display()
            );
        }
        None => print!("{rendered}"),
    }
    Ok(())
}

fn cmd_callers(
    dir: &Path,
    config: &LineageConfig,
    name: &str,
    depth: Option<usize>,
) -> Result<()> {
    let analysis = run_analysis(dir, config)?;
    let Some(lineage) = lineage_nav::lineage::lineage(&analysis, name, depth) else {
        anyhow::bail!("'{}' is not declared in {}", name, dir.display());
    };

    if lineage.callers.is_empty() {
        println!("{} has no callers", lineage.origin);
        return Ok(());
    }

    println!(
        "{} is reached by {} callers (max depth {}):",
        lineage.origin,
        lineage.callers.len(),
        lineage.max_depth_reached
    );
    for entry in &lineage.callers {
        println!(
            "  [{}] {} ({}:{})",
            entry.depth,
            entry.caller,
            entry.file.display(),
            entry.line
        );
    }
    Ok(())
}

fn cmd_info(dir: &Path, config: &LineageConfig) -> Result<()> {
    let analysis = run_analysis(dir, config)?;
    let methods = analysis
        .declarations
        .declarations()
        .filter(|d| d.receiver.is_some())
        .count();
    let leaves = analysis
        .graph
        .iter()
        .filter(|(_, callees)| callees.is_empty())
        .count();

    println!("Root: {}", analysis.root.display());
    println!("Files: {}", analysis.files.len());
    println!("Declarations: {}", analysis.declarations.len());
    println!("  Functions: {}", analysis.declarations.len() - methods);
    println!("  Methods: {}", methods);
    println!("Qualified names: {}", analysis.declarations.names().len());
    println!("Call edges: {}", analysis.graph.edge_count());
    println!("Leaf functions: {}", leaves);
    Ok(())
}
