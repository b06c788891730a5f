//! Error types for the Notegraph core library.

use thiserror::Error;

/// All errors that can occur within the Notegraph core library.
///
/// Absent records are not errors: lookups return `Option` so that callers
/// can tell "not there" apart from a failed read.
#[derive(Debug, Error)]
pub enum NotegraphError {
    /// A SQLite operation failed.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A stored record body could not be (de)serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An I/O operation on the filesystem failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The opened file is not a valid Notegraph store.
    #[error("Invalid store: {0}")]
    InvalidStore(String),
}

/// Convenience alias that pins the error type to [`NotegraphError`].
pub type Result<T> = std::result::Result<T, NotegraphError>;

impl NotegraphError {
    /// Returns a short, human-readable message suitable for display to the end user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Database(e) => format!("Failed to access store: {e}"),
            Self::Json(e) => format!("Data format error: {e}"),
            Self::Io(e) => format!("File error: {e}"),
            Self::InvalidStore(_) => "Could not open store file".to_string(),
        }
    }
}
