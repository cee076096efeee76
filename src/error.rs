//! Error types and exit codes for keg

use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;

/// Main error type for keg operations
#[derive(Error, Debug)]
pub enum KegError {
    #[error("bad line in latest.md: {line}")]
    BadDexLine { line: usize },

    #[error("bad timestamp in latest.md line {line}: {value:?}: {source}")]
    BadDexTimestamp {
        line: usize,
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("invalid timestamp {value:?}: {source}")]
    BadTimestamp {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("no timestamp found in {}", path.display())]
    NoTimestamp { path: PathBuf },

    #[error("Failed to parse document: {message}")]
    ParseFailure { message: String },

    #[error("node ({id:?}) is not a valid node id")]
    InvalidNodeId { id: String },

    #[error("node already exists: {}", path.display())]
    NodeExists { path: PathBuf },

    #[error("node not found: {id}")]
    NodeNotFound { id: u64 },

    #[error("no keg found at {}", path.display())]
    KegNotFound { path: PathBuf },

    #[error("Git error: {message}")]
    Git { message: String },

    #[error("Editor error: {message}")]
    Editor { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl KegError {
    /// Convert error to the process exit code:
    /// - 0: Success
    /// - 1: IO error / keg not found
    /// - 2: Malformed index
    /// - 3: Node errors (bad id, existing node, unreadable document)
    /// - 4: Configuration error
    /// - 5: Git or editor failure
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::Io(_) | Self::KegNotFound { .. } => ExitCode::from(1),
            Self::BadDexLine { .. }
            | Self::BadDexTimestamp { .. }
            | Self::BadTimestamp { .. }
            | Self::NoTimestamp { .. } => ExitCode::from(2),
            Self::ParseFailure { .. }
            | Self::InvalidNodeId { .. }
            | Self::NodeExists { .. }
            | Self::NodeNotFound { .. } => ExitCode::from(3),
            Self::Config { .. } => ExitCode::from(4),
            Self::Git { .. } | Self::Editor { .. } => ExitCode::from(5),
        }
    }
}

/// Result type alias for keg operations
pub type Result<T> = std::result::Result<T, KegError>;
