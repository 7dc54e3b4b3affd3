//! Packlist Access - request classification in front of checklist CRUD.
//!
//! This crate provides:
//! - Share-token issuance (public link / edit token pairs)
//! - Route classification with explicit [`RouteClass`] values
//! - The access classifier: a pure function from request shape to an
//!   allow/deny [`Decision`] plus the asserted [`AccessIdentity`]
//!
//! # Permission model
//!
//! Every checklist is shared through two opaque tokens:
//! - Public link (`/checklists/public/{public_link}`): view-only with file
//!   upload permission
//! - Edit link (`/checklists/edit/{edit_token}`): full structural control
//!
//! The classifier inspects the request *shape* only: path, method, and
//! query parameters. It never touches storage: for mutations addressed by
//! bare entity IDs it enforces the presence of an `edit_token` query
//! parameter, and leaves verifying that the token actually owns the target
//! to the handler layer.
//!
//! # Example
//!
//! ```
//! use packlist_access::{AccessClassifier, AccessIdentity, AccessRequest, Method};
//!
//! let classifier = AccessClassifier::new();
//!
//! let view = AccessRequest::new(Method::Get, "/checklists/public/abc123/categories");
//! assert!(classifier.classify(&view).is_allow());
//!
//! let edit = AccessRequest::new(Method::Delete, "/items/7");
//! assert!(!classifier.classify(&edit).is_allow());
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

mod classifier;
mod error;
mod route;
mod token;

pub use classifier::{
    AccessClassifier, AccessIdentity, AccessRequest, Decision, Method, EDIT_TOKEN_PARAM,
    MISSING_EDIT_TOKEN_REASON, PUBLIC_LINK_DENY_REASON,
};
pub use error::{AccessError, AccessResult};
pub use route::{RouteClass, RouteScope};
pub use token::{issue_distinct_pair, issue_token};
