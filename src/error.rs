//! Error types for dictionary loading.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading dictionaries.
/// Scoring itself never fails.
#[derive(Debug, Error)]
pub enum TaggerError {
    /// Dictionary file could not be opened or read.
    #[error("failed to read dictionary {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A dictionary line could not be parsed.
    #[error("{path}:{line}: {message}")]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    /// A segmentation dictionary contained no entries.
    #[error("dictionary {path} has no entries")]
    EmptyDictionary { path: PathBuf },
}

/// Result type for loading operations.
pub type Result<T> = std::result::Result<T, TaggerError>;
