//! The checklist repository trait.

use packlist_core::{CategoryId, Checklist, ChecklistId, ItemId, ShareToken, UploadId};

use crate::error::StoreResult;

/// Checklist persistence, as the rest of the system consumes it.
///
/// Implementations must keep the share-token uniqueness invariant: no token
/// value ever appears twice across all checklists, in either role. Mutating
/// endpoints address entities by bare IDs, so the trait also resolves a
/// containing checklist from any descendant ID.
#[async_trait::async_trait]
pub trait ChecklistRepository: Send + Sync {
    /// Get a checklist by ID.
    async fn find(&self, id: ChecklistId) -> Option<Checklist>;

    /// Get a checklist by its public link.
    async fn find_by_public_link(&self, token: &ShareToken) -> Option<Checklist>;

    /// Get a checklist by its edit token.
    async fn find_by_edit_token(&self, token: &ShareToken) -> Option<Checklist>;

    /// Resolve the checklist containing a category.
    async fn find_by_category(&self, id: CategoryId) -> Option<Checklist>;

    /// Resolve the checklist containing an item.
    async fn find_by_item(&self, id: ItemId) -> Option<Checklist>;

    /// Resolve the checklist containing an upload record.
    async fn find_by_upload(&self, id: UploadId) -> Option<Checklist>;

    /// List checklists in creation order, with pagination.
    async fn list(&self, skip: usize, limit: usize) -> Vec<Checklist>;

    /// Whether a token is already in use as a public link or edit token.
    async fn token_in_use(&self, token: &ShareToken) -> bool;

    /// Insert a new checklist.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateToken`](crate::StoreError::DuplicateToken)
    /// if either of its tokens is already in use.
    async fn insert(&self, checklist: Checklist) -> StoreResult<()>;

    /// Replace an existing checklist wholesale.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`](crate::StoreError::NotFound) if the
    /// checklist does not exist.
    async fn replace(&self, checklist: Checklist) -> StoreResult<()>;

    /// Remove a checklist, returning it.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`](crate::StoreError::NotFound) if the
    /// checklist does not exist.
    async fn remove(&self, id: ChecklistId) -> StoreResult<Checklist>;
}
