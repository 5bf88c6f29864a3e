//! Enumerate the source files that make up a corpus.
//!
//! Files are yielded lazily in a stable order (directory walk sorted by file
//! name), as paths relative to the corpus base directory.

use globset::{Glob, GlobSet, GlobSetBuilder};
use lineage_core::config::DiscoveryConfig;
use lineage_core::error::AnalysisError;
use std::path::{Path, PathBuf};

const IGNORE_FILE: &str = ".lineageignore";

/// Lazy, finite sequence of corpus source files.
pub struct SourceFiles {
    base: PathBuf,
    walk: ignore::Walk,
    filter: SourceFilter,
}

impl SourceFiles {
    /// Directory the yielded relative paths are rooted at.
    ///
    /// Equals the requested root, or its parent when the root is a single file.
    pub fn base(&self) -> &Path {
        &self.base
    }
}

impl Iterator for SourceFiles {
    type Item = Result<PathBuf, AnalysisError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.walk.next()? {
                Ok(entry) => entry,
                Err(e) => {
                    return Some(Err(AnalysisError::Enumeration {
                        root: self.base.clone(),
                        message: e.to_string(),
                    }));
                }
            };
            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }
            let relative = entry
                .path()
                .strip_prefix(&self.base)
                .unwrap_or(entry.path())
                .to_path_buf();
            if self.filter.accepts(&relative) {
                return Some(Ok(relative));
            }
            tracing::trace!(path = %relative.display(), "skipping non-source file");
        }
    }
}

/// Suffix and glob rules deciding corpus membership.
#[derive(Debug, Clone)]
pub struct SourceFilter {
    source_suffix: String,
    test_suffix: String,
    include: Option<GlobSet>,
    exclude: Option<GlobSet>,
}

impl SourceFilter {
    pub fn new(config: &DiscoveryConfig) -> Result<Self, globset::Error> {
        Ok(Self {
            source_suffix: config.source_suffix.clone(),
            test_suffix: config.test_suffix.clone(),
            include: build_glob_set(&config.include)?,
            exclude: build_glob_set(&config.exclude)?,
        })
    }

    /// Whether a path (relative to the corpus base) belongs to the corpus.
    pub fn accepts(&self, relative: &Path) -> bool {
        let Some(name) = relative.file_name().and_then(|n| n.to_str()) else {
            return false;
        };
        if !name.ends_with(&self.source_suffix) {
            return false;
        }
        if !self.test_suffix.is_empty() && name.ends_with(&self.test_suffix) {
            return false;
        }
        if let Some(ref inc) = self.include
            && !inc.is_match(relative)
        {
            return false;
        }
        if let Some(ref exc) = self.exclude
            && exc.is_match(relative)
        {
            return false;
        }
        true
    }
}

fn build_glob_set(patterns: &[String]) -> Result<Option<GlobSet>, globset::Error> {
    if patterns.is_empty() {
        return Ok(None);
    }
    let mut builder = GlobSetBuilder::new();
    for p in patterns {
        builder.add(Glob::new(p)?);
    }
    Ok(Some(builder.build()?))
}

/// Start enumerating source files under `root`.
pub fn discover(root: &Path, config: &DiscoveryConfig) -> Result<SourceFiles, AnalysisError> {
    if !root.exists() {
        return Err(AnalysisError::Enumeration {
            root: root.to_path_buf(),
            message: "path does not exist".to_string(),
        });
    }
    let filter = SourceFilter::new(config).map_err(|e| AnalysisError::Enumeration {
        root: root.to_path_buf(),
        message: format!("invalid glob pattern: {}", e),
    })?;

    let base = if root.is_file() {
        root.parent().map(Path::to_path_buf).unwrap_or_default()
    } else {
        root.to_path_buf()
    };

    let walk = ignore::WalkBuilder::new(root)
        .hidden(true)
        .git_ignore(config.respect_gitignore)
        .git_exclude(config.respect_gitignore)
        .git_global(config.respect_gitignore)
        .require_git(false)
        .add_custom_ignore_filename(IGNORE_FILE)
        .sort_by_file_name(|a, b| a.cmp(b))
        .build();

    tracing::debug!(root = %root.display(), "enumerating source files");
    Ok(SourceFiles { base, walk, filter })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter(include: &[&str], exclude: &[&str]) -> SourceFilter {
        let config = DiscoveryConfig {
            include: include.iter().map(|s| (*s).to_string()).collect(),
            exclude: exclude.iter().map(|s| (*s).to_string()).collect(),
            ..DiscoveryConfig::default()
        };
        SourceFilter::new(&config).unwrap()
    }

    #[test]
    fn test_suffix_rules() {
        let f = filter(&[], &[]);
        assert!(f.accepts(Path::new("main.go")));
        assert!(f.accepts(Path::new("pkg/server/handler.go")));
        assert!(!f.accepts(Path::new("pkg/server/handler_test.go")));
        assert!(!f.accepts(Path::new("README.md")));
        assert!(!f.accepts(Path::new("go.mod")));
    }

    #[test]
    fn test_include_and_exclude_globs() {
        let f = filter(&["cmd/**"], &["cmd/legacy/**"]);
        assert!(f.accepts(Path::new("cmd/app/main.go")));
        assert!(!f.accepts(Path::new("internal/util.go")));
        assert!(!f.accepts(Path::new("cmd/legacy/old.go")));
    }

    #[test]
    fn test_invalid_glob_is_enumeration_error() {
        let tmp = tempfile::tempdir().unwrap();
        let config = DiscoveryConfig {
            exclude: vec!["[".to_string()],
            ..DiscoveryConfig::default()
        };
        let err = discover(tmp.path(), &config).err().unwrap();
        assert!(matches!(err, AnalysisError::Enumeration { .. }));
    }

    #[test]
    fn test_missing_root_is_enumeration_error() {
        let err = discover(Path::new("/definitely/not/here"), &DiscoveryConfig::default())
            .err()
            .unwrap();
        assert!(matches!(err, AnalysisError::Enumeration { .. }));
    }
}
