//! Error types for the project file system.
//!
//! Each domain gets its own enum so callers can tell a rejected mutation
//! apart from a storage hiccup:
//!
//! - [`VfsError`] - mutation rejected, store left untouched
//! - [`PersistenceError`] - durable write/read failed, in-memory state kept
//! - [`BridgeError`] - bulk import or archive export could not complete

use thiserror::Error;

/// Mutation-level errors. None of these change the store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VfsError {
    /// Target path is already occupied (by itself or its file/folder twin).
    #[error("'{0}' already exists")]
    NameConflict(String),

    /// Empty name, a name containing `/`, or a malformed path.
    #[error("invalid name: '{0}'")]
    InvalidName(String),

    /// Operated on a path that is not in the store.
    #[error("no such file or folder: '{0}'")]
    NotFound(String),

    /// Tried to move a folder underneath itself.
    #[error("cannot move '{from}' into its own subtree '{to}'")]
    MoveIntoDescendant { from: String, to: String },
}

/// Storage failures. Logged and reported; never rolled back in memory.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersistenceError {
    /// The storage backend could not be opened.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// The record could not be encoded or decoded.
    #[error("record serialization failed: {0}")]
    Serialization(String),

    /// The backend rejected a read, write or delete.
    #[error("storage operation failed: {0}")]
    Backend(String),
}

impl From<serde_json::Error> for PersistenceError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Import/export failures at the collaborator boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BridgeError {
    /// A selected file could not be read; the whole import was abandoned.
    #[error("import abandoned: failed to read '{path}': {reason}")]
    ImportPartialFailure { path: String, reason: String },

    /// A selected file carried a relative path the store cannot hold.
    #[error("import abandoned: invalid path '{0}'")]
    InvalidImportPath(String),

    /// The directory selection contained no files.
    #[error("nothing to import")]
    EmptySelection,

    /// No archive collaborator is available.
    #[error("archive export is unavailable")]
    ExportUnavailable,

    /// There is nothing in the project to export.
    #[error("no files to export")]
    EmptyProject,

    /// The archive collaborator failed while writing.
    #[error("archive error: {0}")]
    Archive(String),
}

impl From<zip::result::ZipError> for BridgeError {
    fn from(err: zip::result::ZipError) -> Self {
        Self::Archive(err.to_string())
    }
}

impl From<std::io::Error> for BridgeError {
    fn from(err: std::io::Error) -> Self {
        Self::Archive(err.to_string())
    }
}
