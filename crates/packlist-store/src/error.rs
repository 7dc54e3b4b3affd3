//! Store error types.

use thiserror::Error;

/// Errors produced by the persistence layer and CRUD service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The requested entity does not exist.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// The entity kind ("checklist", "category", "item", "upload").
        entity: &'static str,
        /// Display form of the missing ID or token.
        id: String,
    },

    /// A checklist with one of the given share tokens already exists.
    ///
    /// Insertion-time backstop for the uniqueness invariant; the service's
    /// minting loop retries issuance until this cannot happen.
    #[error("share token already in use")]
    DuplicateToken,

    /// The supplied edit token does not own the targeted checklist.
    #[error("edit token does not match the targeted checklist")]
    EditTokenMismatch,

    /// The item only accepts a single file and already has one.
    #[error("this item does not allow multiple file uploads; delete the existing file first")]
    MultipleUploadsNotAllowed {
        /// The item that rejected the upload.
        item_id: String,
    },

    /// The filename is empty or contains path separators or `..` segments.
    #[error("invalid filename: {filename}")]
    InvalidFilename {
        /// The rejected filename.
        filename: String,
    },

    /// The file extension is not in the suggested set.
    #[error("file type not recommended; suggested file types are: {suggested}")]
    UnsupportedFileType {
        /// The rejected extension (may be empty).
        extension: String,
        /// Comma-separated list of accepted extensions.
        suggested: String,
    },

    /// The upload exceeds the size limit.
    #[error("file too large; maximum size is {max_bytes} bytes")]
    FileTooLarge {
        /// Size of the rejected payload.
        size: usize,
        /// The enforced limit.
        max_bytes: usize,
    },

    /// Storage backend fault (I/O error, etc.).
    #[error("storage error: {0}")]
    Storage(String),
}

impl StoreError {
    /// Create a not-found error.
    #[must_use]
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
