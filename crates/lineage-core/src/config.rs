//! Configuration for source discovery and output rendering.
//!
//! Load order: `.lineage/config.toml` (or an explicit file) → environment
//! variables → defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

const CONFIG_DIR: &str = ".lineage";
const CONFIG_FILE: &str = "config.toml";

/// Top-level codelineage configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LineageConfig {
    pub discovery: DiscoveryConfig,
    pub output: OutputConfig,
}

/// Which files under the project root make up the corpus.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Files must end with this suffix to be analyzed.
    pub source_suffix: String,
    /// Files ending with this suffix are excluded from both passes.
    pub test_suffix: String,
    /// Honour `.gitignore` files while walking.
    pub respect_gitignore: bool,
    /// Glob patterns (relative to the root) a file must match, if any are given.
    pub include: Vec<String>,
    /// Glob patterns (relative to the root) that drop a file.
    pub exclude: Vec<String>,
}

/// Rendering defaults for the command line.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// One of `text`, `json`, `dot`.
    pub format: String,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            source_suffix: ".go".to_string(),
            test_suffix: "_test.go".to_string(),
            respect_gitignore: true,
            include: Vec::new(),
            exclude: Vec::new(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "text".to_string(),
        }
    }
}

/// Helper to parse an env var and apply it to a config field.
fn env_override<T: std::str::FromStr>(var: &str, target: &mut T) {
    if let Ok(v) = std::env::var(var)
        && let Ok(n) = v.parse()
    {
        *target = n;
    }
}

impl LineageConfig {
    /// Load config from `.lineage/config.toml` in the project root, with env var overrides.
    /// Falls back to defaults if no config file exists.
    pub fn load(project_root: &Path) -> Result<Self> {
        let config_path = project_root.join(CONFIG_DIR).join(CONFIG_FILE);
        if config_path.exists() {
            Self::load_file(&config_path)
        } else {
            Self::finish(Self::default())
        }
    }

    /// Load config from an explicit TOML file, with env var overrides.
    pub fn load_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("invalid config {}", path.display()))?;
        Self::finish(config)
    }

    fn finish(mut config: Self) -> Result<Self> {
        env_override(
            "LINEAGE_SOURCE_SUFFIX",
            &mut config.discovery.source_suffix,
        );
        env_override("LINEAGE_TEST_SUFFIX", &mut config.discovery.test_suffix);
        env_override(
            "LINEAGE_RESPECT_GITIGNORE",
            &mut config.discovery.respect_gitignore,
        );
        env_override("LINEAGE_OUTPUT_FORMAT", &mut config.output.format);

        if config.discovery.source_suffix.is_empty() {
            anyhow::bail!("discovery.source_suffix must not be empty");
        }

        Ok(config)
    }
}
