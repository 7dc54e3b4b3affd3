//! Packlist Gateway - the interception point in front of every handler.
//!
//! The routing layer builds an [`AccessRequest`](packlist_access::AccessRequest)
//! for each inbound request and passes it through [`AccessGate`] *before*
//! dispatching to business logic. On deny the gate short-circuits with a
//! [`DeniedResponse`] (HTTP 403, body `{"detail": <reason>}`) and the handler
//! is never invoked, so no side effects and no persistence access occur. On allow the
//! request is forwarded unchanged.
//!
//! The gate runs before any resource lookup, so a denied request learns
//! nothing beyond "this operation class is not permitted", not even whether
//! the targeted ID exists.
//!
//! # Example
//!
//! ```
//! use packlist_access::{AccessRequest, Method};
//! use packlist_gateway::AccessGate;
//!
//! # async fn example() {
//! let gate = AccessGate::new();
//!
//! let request = AccessRequest::new(Method::Get, "/checklists/public/abc123");
//! let result = gate
//!     .dispatch(request, |_request, _identity| async { "handled" })
//!     .await;
//! assert_eq!(result.unwrap(), "handled");
//! # }
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod gate;
mod response;

pub use gate::AccessGate;
pub use response::{DeniedResponse, DenyBody, FORBIDDEN};
