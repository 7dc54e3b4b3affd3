//! Prelude module - commonly used types for convenient import.
//!
//! Use `use packlist_access::prelude::*;` to import all essential types.
//!
//! # Example
//!
//! ```rust
//! use packlist_access::prelude::*;
//!
//! let classifier = AccessClassifier::new();
//! let request = AccessRequest::new(Method::Get, "/checklists/public/abc123");
//! assert!(classifier.classify(&request).is_allow());
//! ```

// Errors
pub use crate::{AccessError, AccessResult};

// Classifier
pub use crate::{AccessClassifier, AccessIdentity, AccessRequest, Decision, Method};

// Routes
pub use crate::{RouteClass, RouteScope};

// Token issuance
pub use crate::{issue_distinct_pair, issue_token};
