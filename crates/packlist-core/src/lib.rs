//! Packlist Core - Foundation types and entity model for the checklist service.
//!
//! This crate provides:
//! - Id newtypes and the `Timestamp` wrapper used throughout the workspace
//! - The [`ShareToken`] value type (opaque sharing credential)
//! - The entity model: [`Checklist`] → [`Category`] → [`Item`] → [`FileUpload`],
//!   with exclusive by-value ownership so dropping a parent drops every
//!   descendant
//! - Draft and patch types mirroring the create/update payloads handlers
//!   receive
//!
//! Token issuance and the access classifier live in `packlist-access`;
//! persistence collaborators live in `packlist-store`.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]

pub mod prelude;

pub mod draft;
pub mod model;
pub mod types;

pub use draft::{CategoryDraft, CategoryPatch, ChecklistDraft, ChecklistPatch, ItemDraft, ItemPatch};
pub use model::{Category, Checklist, FileUpload, Item};
pub use types::{CategoryId, ChecklistId, ItemId, ShareToken, Timestamp, UploadId};
