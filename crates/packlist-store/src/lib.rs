//! Packlist Store - persistence collaborators and the CRUD surface.
//!
//! This crate provides:
//! - The [`ChecklistRepository`] trait the access core only assumes
//!   conceptually, with an in-memory reference implementation
//! - File storage for upload bytes (in-memory and on-disk)
//! - [`ChecklistService`]: the operations handlers call once a request has
//!   cleared the access gate: create/read/update/delete/clone with explicit
//!   cascade semantics and unique share-token minting
//!
//! Nothing in this crate makes authorization decisions. The classifier in
//! `packlist-access` runs first; by the time a service method executes, the
//! request has already been allowed.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod error;
mod files;
mod memory;
mod repository;
mod service;

pub use error::{StoreError, StoreResult};
pub use files::{
    DiskFileStore, FileStore, InMemoryFileStore, MAX_UPLOAD_BYTES, SUGGESTED_EXTENSIONS,
    upload_key,
};
pub use memory::InMemoryChecklistStore;
pub use repository::ChecklistRepository;
pub use service::ChecklistService;
