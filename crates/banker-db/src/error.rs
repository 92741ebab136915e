//! Error types for the persistence layer.
//!
//! All errors are propagated via [`DbError`]. None of them is a business
//! rule violation: every variant is fatal for the command that hit it.

use std::path::PathBuf;

/// Errors that can occur while loading or saving a snapshot.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// Reading or writing the snapshot file failed.
    #[error("snapshot I/O error on {path}: {source}")]
    Io {
        /// The file being accessed.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The snapshot could not be encoded or decoded.
    #[error("snapshot serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The snapshot exists but holds no data.
    #[error("snapshot at {0} is empty")]
    EmptySnapshot(PathBuf),

    /// The persisted revision is not the one this save was based on.
    #[error("snapshot revision conflict: expected {expected:?} on disk, found {found:?}")]
    Conflict {
        /// The revision the writer expected to replace.
        expected: Option<u64>,
        /// The revision actually persisted.
        found: Option<u64>,
    },
}
