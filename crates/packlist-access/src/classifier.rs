//! The access classifier.
//!
//! A pure function from request shape to an allow/deny decision. No storage
//! access, no I/O, no retained state: every request is classified
//! independently, so the classifier is thread-safe and idempotent by
//! construction.
//!
//! # Classification order
//!
//! First matching rule wins:
//!
//! 1. Public-scoped path (`checklists/public/`):
//!    - `GET` → Allow (viewing, any depth)
//!    - `POST` targeting an upload endpoint → Allow
//!    - anything else → Deny (public link is view + upload only)
//! 2. Otherwise, for mutating requests (`PUT`, `DELETE`, or a `POST` that is
//!    not a file upload):
//!    - checklist-collection `POST` and clone paths → Allow (this is how new
//!      checklists and tokens come into existence; no prior token exists)
//!    - edit-scoped path (`checklists/edit/`) → Allow
//!    - `edit_token` present in the query string → Allow (presence only; the
//!      handler layer re-validates the token against the targeted checklist)
//!    - otherwise → Deny
//! 3. All other requests → Allow.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AccessError, AccessResult};
use crate::route::{RouteClass, RouteScope};

/// Query parameter asserting edit access on ID-addressed mutations.
pub const EDIT_TOKEN_PARAM: &str = "edit_token";

/// Deny reason for structural mutations attempted through a public link.
pub const PUBLIC_LINK_DENY_REASON: &str =
    "You don't have permission to edit this checklist. Use the edit link to modify the structure.";

/// Deny reason for mutations carrying no edit token at all.
pub const MISSING_EDIT_TOKEN_REASON: &str =
    "Editing the checklist structure requires an edit_token query parameter.";

/// HTTP request method, as far as the classifier cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    /// GET
    Get,
    /// HEAD
    Head,
    /// POST
    Post,
    /// PUT
    Put,
    /// DELETE
    Delete,
    /// PATCH
    Patch,
    /// OPTIONS
    Options,
}

impl Method {
    /// The canonical uppercase method name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Head => "HEAD",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Patch => "PATCH",
            Self::Options => "OPTIONS",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Method {
    type Err = AccessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "HEAD" => Ok(Self::Head),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "DELETE" => Ok(Self::Delete),
            "PATCH" => Ok(Self::Patch),
            "OPTIONS" => Ok(Self::Options),
            other => Err(AccessError::UnsupportedMethod {
                method: other.to_string(),
            }),
        }
    }
}

/// The identity a request asserts.
///
/// Asserted, not verified: the classifier reports which credential class the
/// request claims, and presence-level checks only. Resolving a token against
/// the targeted checklist belongs to the handler layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessIdentity {
    /// Holder of the checklist's public link.
    PublicLink,
    /// Holder of (or claimant to) the checklist's edit token.
    EditToken,
    /// No credential asserted.
    Anonymous,
}

impl fmt::Display for AccessIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PublicLink => write!(f, "public_link"),
            Self::EditToken => write!(f, "edit_token"),
            Self::Anonymous => write!(f, "anonymous"),
        }
    }
}

/// The shape of an inbound request, as the classifier sees it.
///
/// Built by the routing layer before handler dispatch. Route params (entity
/// IDs, tokens) are carried through for handlers but are opaque to the
/// classifier itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessRequest {
    method: Method,
    path: String,
    route: RouteClass,
    params: HashMap<String, String>,
    query: HashMap<String, String>,
}

impl AccessRequest {
    /// Build a request, classifying the route from the raw path.
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        let path = path.into();
        let route = RouteClass::classify(&path);
        Self {
            method,
            path,
            route,
            params: HashMap::new(),
            query: HashMap::new(),
        }
    }

    /// Build a request with a route class precomputed at route registration.
    #[must_use]
    pub fn with_route_class(method: Method, path: impl Into<String>, route: RouteClass) -> Self {
        Self {
            method,
            path: path.into(),
            route,
            params: HashMap::new(),
            query: HashMap::new(),
        }
    }

    /// Attach a route parameter.
    #[must_use]
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// Attach a single query parameter.
    #[must_use]
    pub fn with_query_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(name.into(), value.into());
        self
    }

    /// Attach query parameters parsed from a raw query string.
    #[must_use]
    pub fn with_query_string(mut self, raw: &str) -> Self {
        for (name, value) in url::form_urlencoded::parse(raw.as_bytes()) {
            self.query.insert(name.into_owned(), value.into_owned());
        }
        self
    }

    /// The request method.
    #[must_use]
    pub fn method(&self) -> Method {
        self.method
    }

    /// The request path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The route class.
    #[must_use]
    pub fn route(&self) -> RouteClass {
        self.route
    }

    /// Look up a route parameter.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// Look up a query parameter.
    #[must_use]
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query.get(name).map(String::as_str)
    }

    /// The `edit_token` query parameter, if present.
    #[must_use]
    pub fn edit_token(&self) -> Option<&str> {
        self.query_param(EDIT_TOKEN_PARAM)
    }
}

/// The classifier's verdict on a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    /// The request may proceed to its handler.
    Allow {
        /// The identity the request asserts.
        identity: AccessIdentity,
    },
    /// The request must be rejected before any handler runs.
    Deny {
        /// Human-readable reason, surfaced verbatim as the 403 `detail`.
        reason: String,
    },
}

impl Decision {
    /// Whether the request was allowed.
    #[must_use]
    pub fn is_allow(&self) -> bool {
        matches!(self, Self::Allow { .. })
    }

    /// The asserted identity, if allowed.
    #[must_use]
    pub fn identity(&self) -> Option<AccessIdentity> {
        match self {
            Self::Allow { identity } => Some(*identity),
            Self::Deny { .. } => None,
        }
    }

    /// The deny reason, if denied.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Allow { .. } => None,
            Self::Deny { reason } => Some(reason),
        }
    }

    /// Convert into a result, mapping denial to [`AccessError::PermissionDenied`].
    ///
    /// # Errors
    ///
    /// Returns `PermissionDenied` when the decision is a denial.
    pub fn into_result(self) -> AccessResult<AccessIdentity> {
        match self {
            Self::Allow { identity } => Ok(identity),
            Self::Deny { reason } => Err(AccessError::PermissionDenied { reason }),
        }
    }
}

/// The pure decision function mapping request shape to allow/deny.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccessClassifier;

impl AccessClassifier {
    /// Create a classifier.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Classify a request. See the module docs for the rule order.
    #[must_use]
    pub fn classify(&self, request: &AccessRequest) -> Decision {
        let route = request.route();

        // Rule 1: public-link scope is view + upload only.
        if route.scope() == RouteScope::Public {
            return match request.method() {
                Method::Get => Decision::Allow {
                    identity: AccessIdentity::PublicLink,
                },
                Method::Post if route.targets_uploads() => Decision::Allow {
                    identity: AccessIdentity::PublicLink,
                },
                _ => Decision::Deny {
                    reason: PUBLIC_LINK_DENY_REASON.to_string(),
                },
            };
        }

        // Rule 2: structural mutations need an edit credential, except the
        // two operations that mint one.
        if Self::is_mutating(request.method(), route) {
            if route.is_checklist_collection() && request.method() == Method::Post {
                return Decision::Allow {
                    identity: AccessIdentity::Anonymous,
                };
            }
            if route.is_clone() {
                return Decision::Allow {
                    identity: AccessIdentity::Anonymous,
                };
            }
            if route.scope() == RouteScope::Edit {
                return Decision::Allow {
                    identity: AccessIdentity::EditToken,
                };
            }
            if request.edit_token().is_some() {
                return Decision::Allow {
                    identity: AccessIdentity::EditToken,
                };
            }
            return Decision::Deny {
                reason: MISSING_EDIT_TOKEN_REASON.to_string(),
            };
        }

        // Rule 3: everything else passes through.
        Decision::Allow {
            identity: if route.scope() == RouteScope::Edit {
                AccessIdentity::EditToken
            } else {
                AccessIdentity::Anonymous
            },
        }
    }

    /// Whether a request is a structural mutation.
    ///
    /// `POST` to an upload endpoint is file submission, not a structural
    /// change, so it is excluded here and handled by rules 1 and 3.
    fn is_mutating(method: Method, route: RouteClass) -> bool {
        match method {
            Method::Put | Method::Delete => true,
            Method::Post => !route.targets_uploads(),
            _ => false,
        }
    }
}
