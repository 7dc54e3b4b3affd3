//! Integration tests for the Packlist workspace.
//!
//! The actual tests live under `tests/`; this library only carries shared
//! fixtures.

use std::sync::Arc;

use packlist_core::{CategoryDraft, ChecklistDraft, ItemDraft};
use packlist_store::{ChecklistService, FileStore, InMemoryChecklistStore, InMemoryFileStore};

/// A service wired to in-memory collaborators, with the file store exposed
/// so tests can observe cascade cleanup.
#[must_use]
pub fn service_with_files() -> (ChecklistService, Arc<InMemoryFileStore>) {
    let files = InMemoryFileStore::new().shared();
    let service = ChecklistService::new(
        InMemoryChecklistStore::new().shared(),
        Arc::clone(&files) as Arc<dyn FileStore>,
    );
    (service, files)
}

/// A small but non-trivial checklist draft.
#[must_use]
pub fn onboarding_draft() -> ChecklistDraft {
    ChecklistDraft::new("Onboarding")
        .with_description("New hire documents")
        .with_category(
            CategoryDraft::new("Identity")
                .with_item(ItemDraft::new("Passport scan"))
                .with_item(ItemDraft::new("Certificates").with_multiple_files()),
        )
        .with_category(CategoryDraft::new("Contracts").with_item(ItemDraft::new("Signed offer")))
}
