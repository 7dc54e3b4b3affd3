//! Access-control error types.

use thiserror::Error;

/// Errors produced by the access layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    /// The request was denied by the access classifier.
    ///
    /// Terminal for the request: never retried, and the reason is surfaced
    /// verbatim as the 403 response's `detail` field.
    #[error("permission denied: {reason}")]
    PermissionDenied {
        /// Human-readable reason for the denial.
        reason: String,
    },

    /// A freshly issued share token collided with an existing one.
    ///
    /// Practically unreachable at 128 bits of entropy. Absorbed by the
    /// issuance retry loop in the service layer; never surfaced to callers.
    #[error("share token collision, reissue required")]
    TokenCollision,

    /// An HTTP method string could not be parsed.
    #[error("unsupported HTTP method: {method}")]
    UnsupportedMethod {
        /// The method string that failed to parse.
        method: String,
    },
}

impl AccessError {
    /// Create a permission-denied error.
    #[must_use]
    pub fn denied(reason: impl Into<String>) -> Self {
        Self::PermissionDenied {
            reason: reason.into(),
        }
    }
}

/// Result type for access operations.
pub type AccessResult<T> = Result<T, AccessError>;
