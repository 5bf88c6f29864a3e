//! Errors that abort an analysis run.
//!
//! Shapes the pipeline merely skips (unresolvable receiver types, unsupported
//! call targets) are not errors; they are modelled as enum variants by the
//! parser crate.

use std::path::PathBuf;

/// A fatal failure: the run stops and no partial graph is produced.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("failed to enumerate source files under {}: {message}", root.display())]
    Enumeration { root: PathBuf, message: String },
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to load grammar: {0}")]
    Grammar(String),
    #[error("syntax error in {} at line {line}, column {column}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        column: usize,
    },
}

impl AnalysisError {
    /// The file the error refers to, if it is tied to one.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::Read { path, .. } | Self::Parse { path, .. } => Some(path),
            Self::Enumeration { .. } | Self::Grammar(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_message() {
        let err = AnalysisError::Parse {
            path: PathBuf::from("pkg/server.go"),
            line: 12,
            column: 5,
        };
        assert_eq!(
            err.to_string(),
            "syntax error in pkg/server.go at line 12, column 5"
        );
        assert_eq!(err.path(), Some(std::path::Path::new("pkg/server.go")));
    }

    #[test]
    fn test_enumeration_error_has_no_path() {
        let err = AnalysisError::Enumeration {
            root: PathBuf::from("/missing"),
            message: "No such file or directory".to_string(),
        };
        assert!(err.path().is_none());
        assert!(err.to_string().contains("/missing"));
    }
}
