use std::path::PathBuf;

use thiserror::Error;

/// Errors that make the dataset unavailable. All of them are fatal at
/// startup.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("spreadsheet not found, tried {tried:?}")]
    SourceNotFound { tried: Vec<PathBuf> },

    #[error("failed to read {}: {reason}", .path.display())]
    Unreadable { path: PathBuf, reason: String },

    #[error("spreadsheet has {found} columns, expected {expected}")]
    SchemaMismatch { expected: usize, found: usize },
}
