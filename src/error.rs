//! Error types for urlgen.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while discovering, parsing or generating.
#[derive(Debug, Error)]
pub enum UrlgenError {
    #[error("Output template text does not contain the required placeholder \"{0}\"")]
    MissingPlaceholder(&'static str),

    #[error("Failed to initialise C# parser for {0:?}: {1}")]
    ParserInitError(PathBuf, String),

    #[error("tree-sitter failed to parse {0:?}")]
    TreeSitterParseFailed(PathBuf),

    #[error("No compilation unit root in {0:?}")]
    MissingCompilationUnit(PathBuf),

    #[error("Root directory {0:?} does not exist")]
    RootNotFound(PathBuf),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for urlgen operations.
pub type Result<T> = std::result::Result<T, UrlgenError>;
