//! The access gate.

use std::future::Future;

use packlist_access::{AccessClassifier, AccessIdentity, AccessRequest, Decision};

use crate::response::DeniedResponse;

/// The single entry point for request authorization.
///
/// Every inbound request flows through the gate before any business-logic
/// handler executes. The gate itself holds no state and performs no I/O: it
/// delegates to the pure [`AccessClassifier`] and enforces the verdict.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccessGate {
    classifier: AccessClassifier,
}

impl AccessGate {
    /// Create a gate.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            classifier: AccessClassifier::new(),
        }
    }

    /// Classify a request and enforce the decision.
    ///
    /// # Errors
    ///
    /// Returns the [`DeniedResponse`] to emit when the classifier denies the
    /// request.
    pub fn check(&self, request: &AccessRequest) -> Result<AccessIdentity, DeniedResponse> {
        match self.classifier.classify(request) {
            Decision::Allow { identity } => {
                tracing::debug!(
                    method = %request.method(),
                    path = %request.path(),
                    %identity,
                    "request allowed"
                );
                Ok(identity)
            },
            Decision::Deny { reason } => {
                tracing::info!(
                    method = %request.method(),
                    path = %request.path(),
                    %reason,
                    "request denied"
                );
                Err(DeniedResponse::new(reason))
            },
        }
    }

    /// Run a handler behind the gate.
    ///
    /// The handler receives the request unchanged plus the asserted identity,
    /// and is **never** invoked when the request is denied.
    ///
    /// # Errors
    ///
    /// Returns the [`DeniedResponse`] instead of running the handler when the
    /// classifier denies the request.
    pub async fn dispatch<H, Fut, T>(
        &self,
        request: AccessRequest,
        handler: H,
    ) -> Result<T, DeniedResponse>
    where
        H: FnOnce(AccessRequest, AccessIdentity) -> Fut,
        Fut: Future<Output = T>,
    {
        let identity = self.check(&request)?;
        Ok(handler(request, identity).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use packlist_access::{EDIT_TOKEN_PARAM, Method, PUBLIC_LINK_DENY_REASON};
    use std::sync::atomic::{AtomicBool, Ordering};

    #[tokio::test]
    async fn test_allowed_request_reaches_handler() {
        let gate = AccessGate::new();
        let request = AccessRequest::new(Method::Get, "/checklists/public/abc123/categories");

        let result = gate
            .dispatch(request, |req, identity| async move {
                (req.path().to_string(), identity)
            })
            .await
            .unwrap();

        assert_eq!(result.0, "/checklists/public/abc123/categories");
        assert_eq!(result.1, AccessIdentity::PublicLink);
    }

    #[tokio::test]
    async fn test_denied_request_never_runs_handler() {
        let gate = AccessGate::new();
        let ran = AtomicBool::new(false);
        let request = AccessRequest::new(Method::Delete, "/items/7");

        let result = gate
            .dispatch(request, |_req, _identity| async {
                ran.store(true, Ordering::SeqCst);
            })
            .await;

        let denied = result.unwrap_err();
        assert_eq!(denied.status(), 403);
        assert!(denied.detail().contains(EDIT_TOKEN_PARAM));
        assert!(!ran.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_public_mutation_denied_with_original_reason() {
        let gate = AccessGate::new();
        let request = AccessRequest::new(Method::Put, "/checklists/public/abc123/categories/5");

        let denied = gate.dispatch(request, |_r, _i| async {}).await.unwrap_err();
        assert_eq!(denied.detail(), PUBLIC_LINK_DENY_REASON);
        assert_eq!(
            denied.to_json(),
            serde_json::json!({ "detail": PUBLIC_LINK_DENY_REASON }).to_string()
        );
    }

    #[test]
    fn test_check_allows_mutation_with_query_token() {
        let gate = AccessGate::new();
        let request = AccessRequest::new(Method::Put, "/categories/5")
            .with_query_param(EDIT_TOKEN_PARAM, "xyz");
        assert_eq!(gate.check(&request).unwrap(), AccessIdentity::EditToken);
    }
}
