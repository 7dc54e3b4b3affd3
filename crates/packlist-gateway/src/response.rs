//! The deny response shape.

use serde::{Deserialize, Serialize};

use packlist_access::AccessError;

/// HTTP status for denied requests.
pub const FORBIDDEN: u16 = 403;

/// JSON body of a denied response: `{"detail": <reason>}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DenyBody {
    /// The deny reason, verbatim from the classifier.
    pub detail: String,
}

/// The response emitted when the gate denies a request.
///
/// This is the *only* observable output of a denied request: status 403 and
/// the reason string as the body's `detail` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeniedResponse {
    status: u16,
    body: DenyBody,
}

impl DeniedResponse {
    /// Build a deny response for a reason.
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            status: FORBIDDEN,
            body: DenyBody {
                detail: reason.into(),
            },
        }
    }

    /// The HTTP status code (always 403).
    #[must_use]
    pub fn status(&self) -> u16 {
        self.status
    }

    /// The deny reason.
    #[must_use]
    pub fn detail(&self) -> &str {
        &self.body.detail
    }

    /// The response body.
    #[must_use]
    pub fn body(&self) -> &DenyBody {
        &self.body
    }

    /// The body rendered as a JSON string.
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::json!({ "detail": self.body.detail }).to_string()
    }
}

impl From<AccessError> for DeniedResponse {
    fn from(error: AccessError) -> Self {
        Self::new(error.to_string())
    }
}
