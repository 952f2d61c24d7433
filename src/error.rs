//! Error taxonomy for the repomap core.

use std::path::PathBuf;

/// Crate-wide error type. One variant per entry in the error taxonomy.
#[derive(Debug, thiserror::Error)]
pub enum RepoMapError {
    /// Invalid configuration value (empty project root, threshold out of range, unknown strategy).
    #[error("invalid configuration: {message}")]
    ConfigError { message: String },

    /// Filesystem access failure at a boundary where skipping is not appropriate.
    #[error("io error at {path}: {cause}")]
    IoError { path: PathBuf, cause: String },

    /// A single-file parse failure. Always recoverable; surfaced as a diagnostic
    /// on the affected FileTags/FileImports, never returned from a batch operation.
    #[error("parse error in {path}: {cause}")]
    ParseError { path: PathBuf, cause: String },

    /// Persistent cache corruption. The core continues with an in-memory cache.
    #[error("cache error: {cause}")]
    CacheError { cause: String },

    /// Worker-pool failure not attributable to a single file.
    #[error("parallel orchestrator failure: {cause}")]
    ParallelError { cause: String },

    /// Invariant violation detected during graph construction. Should not occur.
    #[error("dependency graph invariant violated: {message}")]
    GraphError { message: String },

    /// Named target absent from the graph (impact/centrality of an unknown file).
    #[error("not found: {path}")]
    NotFoundError { path: PathBuf },
}

impl From<std::io::Error> for RepoMapError {
    fn from(err: std::io::Error) -> Self {
        RepoMapError::IoError {
            path: PathBuf::new(),
            cause: err.to_string(),
        }
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, RepoMapError>;

/// A per-file, non-aborting failure record. Distinct from [`RepoMapError`]: a
/// diagnostic is attached to a component's output and never unwinds a call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub path: PathBuf,
    pub kind: DiagnosticKind,
    pub message: String,
}

impl Diagnostic {
    pub fn new(path: impl Into<PathBuf>, kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind,
            message: message.into(),
        }
    }
}

/// The taxonomy kind a [`Diagnostic`] corresponds to, mirrored without the
/// structured payload carried by [`RepoMapError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    Io,
    Parse,
    Cache,
    NotFound,
}

#[cfg(test)]
#[path = "error.test.rs"]
mod tests;
