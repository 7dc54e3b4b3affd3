//! In-memory checklist store.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use packlist_core::{CategoryId, Checklist, ChecklistId, ItemId, ShareToken, UploadId};

use crate::error::{StoreError, StoreResult};
use crate::repository::ChecklistRepository;

/// Everything lives behind one lock so the token indexes can never drift
/// from the checklist map.
#[derive(Debug, Default)]
struct StoreInner {
    checklists: HashMap<ChecklistId, Checklist>,
    /// Creation order, for stable listing.
    order: Vec<ChecklistId>,
    by_public_link: HashMap<ShareToken, ChecklistId>,
    by_edit_token: HashMap<ShareToken, ChecklistId>,
}

/// In-memory checklist repository for testing and simple deployments.
#[derive(Debug, Default)]
pub struct InMemoryChecklistStore {
    inner: RwLock<StoreInner>,
}

impl InMemoryChecklistStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap in an Arc for sharing.
    #[must_use]
    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    fn read(&self) -> RwLockReadGuard<'_, StoreInner> {
        self.inner.read().unwrap_or_else(|poisoned| {
            tracing::warn!("checklist store lock poisoned, recovering");
            poisoned.into_inner()
        })
    }

    fn write(&self) -> RwLockWriteGuard<'_, StoreInner> {
        self.inner.write().unwrap_or_else(|poisoned| {
            tracing::warn!("checklist store lock poisoned, recovering");
            poisoned.into_inner()
        })
    }
}

#[async_trait::async_trait]
impl ChecklistRepository for InMemoryChecklistStore {
    async fn find(&self, id: ChecklistId) -> Option<Checklist> {
        self.read().checklists.get(&id).cloned()
    }

    async fn find_by_public_link(&self, token: &ShareToken) -> Option<Checklist> {
        let inner = self.read();
        let id = inner.by_public_link.get(token)?;
        inner.checklists.get(id).cloned()
    }

    async fn find_by_edit_token(&self, token: &ShareToken) -> Option<Checklist> {
        let inner = self.read();
        let id = inner.by_edit_token.get(token)?;
        inner.checklists.get(id).cloned()
    }

    async fn find_by_category(&self, id: CategoryId) -> Option<Checklist> {
        let inner = self.read();
        inner
            .checklists
            .values()
            .find(|c| c.category(id).is_some())
            .cloned()
    }

    async fn find_by_item(&self, id: ItemId) -> Option<Checklist> {
        let inner = self.read();
        inner
            .checklists
            .values()
            .find(|c| c.item(id).is_some())
            .cloned()
    }

    async fn find_by_upload(&self, id: UploadId) -> Option<Checklist> {
        let inner = self.read();
        inner
            .checklists
            .values()
            .find(|c| c.upload(id).is_some())
            .cloned()
    }

    async fn list(&self, skip: usize, limit: usize) -> Vec<Checklist> {
        let inner = self.read();
        inner
            .order
            .iter()
            .filter_map(|id| inner.checklists.get(id))
            .skip(skip)
            .take(limit)
            .cloned()
            .collect()
    }

    async fn token_in_use(&self, token: &ShareToken) -> bool {
        let inner = self.read();
        inner.by_public_link.contains_key(token) || inner.by_edit_token.contains_key(token)
    }

    async fn insert(&self, checklist: Checklist) -> StoreResult<()> {
        let mut inner = self.write();
        let public_taken = inner.by_public_link.contains_key(&checklist.public_link)
            || inner.by_edit_token.contains_key(&checklist.public_link);
        let edit_taken = inner.by_public_link.contains_key(&checklist.edit_token)
            || inner.by_edit_token.contains_key(&checklist.edit_token);
        if public_taken || edit_taken {
            return Err(StoreError::DuplicateToken);
        }

        inner
            .by_public_link
            .insert(checklist.public_link.clone(), checklist.id);
        inner
            .by_edit_token
            .insert(checklist.edit_token.clone(), checklist.id);
        inner.order.push(checklist.id);
        inner.checklists.insert(checklist.id, checklist);
        Ok(())
    }

    async fn replace(&self, checklist: Checklist) -> StoreResult<()> {
        let mut inner = self.write();
        if !inner.checklists.contains_key(&checklist.id) {
            return Err(StoreError::not_found("checklist", checklist.id));
        }
        // Tokens are immutable after creation, so the indexes stay as-is.
        inner.checklists.insert(checklist.id, checklist);
        Ok(())
    }

    async fn remove(&self, id: ChecklistId) -> StoreResult<Checklist> {
        let mut inner = self.write();
        let checklist = inner
            .checklists
            .remove(&id)
            .ok_or_else(|| StoreError::not_found("checklist", id))?;
        inner.by_public_link.remove(&checklist.public_link);
        inner.by_edit_token.remove(&checklist.edit_token);
        inner.order.retain(|existing| *existing != id);
        Ok(checklist)
    }
}
