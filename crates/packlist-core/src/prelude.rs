//! Prelude module - commonly used types for convenient import.
//!
//! Use `use packlist_core::prelude::*;` to import all essential types.

// Ids & time
pub use crate::types::{CategoryId, ChecklistId, ItemId, ShareToken, Timestamp, UploadId};

// Entity model
pub use crate::model::{Category, Checklist, FileUpload, Item};

// Drafts & patches
pub use crate::draft::{
    CategoryDraft, CategoryPatch, ChecklistDraft, ChecklistPatch, ItemDraft, ItemPatch,
};
