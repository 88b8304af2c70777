//! Error types and exit codes for nidsparser

use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;

/// Main error type for nidsparser operations
#[derive(Error, Debug)]
pub enum NidError {
    #[error("Error opening {path}: {source}")]
    RootOpen {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Error reading {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Error writing {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("JSON encoding failed: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl NidError {
    /// Convert error to appropriate exit code:
    /// - 0: Success
    /// - 1: Input error (root directory or stub file unreadable)
    /// - 2: Output error (database cannot be encoded or written)
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::RootOpen { .. } => ExitCode::from(1),
            Self::FileRead { .. } => ExitCode::from(1),
            Self::OutputWrite { .. } => ExitCode::from(2),
            Self::Encode(_) => ExitCode::from(2),
            Self::Io(_) => ExitCode::from(1),
        }
    }
}

/// Result type alias for nidsparser operations
pub type Result<T> = std::result::Result<T, NidError>;
