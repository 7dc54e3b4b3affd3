//! The checklist CRUD service.
//!
//! [`ChecklistService`] is what handlers call once a request has cleared the
//! access gate. It owns the two collaborator handles (checklist repository,
//! file store) and implements the semantics the model alone cannot: unique
//! share-token minting, wholesale child replacement on update, cascade
//! cleanup of stored file bytes, and the upload constraints.

use std::sync::Arc;

use packlist_access::issue_distinct_pair;
use packlist_core::{
    Category, CategoryDraft, CategoryId, CategoryPatch, Checklist, ChecklistDraft, ChecklistId,
    ChecklistPatch, FileUpload, Item, ItemDraft, ItemId, ItemPatch, ShareToken, UploadId,
};

use crate::error::{StoreError, StoreResult};
use crate::files::{FileStore, InMemoryFileStore, MAX_UPLOAD_BYTES, SUGGESTED_EXTENSIONS, upload_key};
use crate::memory::InMemoryChecklistStore;
use crate::repository::ChecklistRepository;

/// The CRUD surface over the persistence collaborators.
#[derive(Clone)]
pub struct ChecklistService {
    repo: Arc<dyn ChecklistRepository>,
    files: Arc<dyn FileStore>,
}

impl ChecklistService {
    /// Create a service over the given collaborators.
    #[must_use]
    pub fn new(repo: Arc<dyn ChecklistRepository>, files: Arc<dyn FileStore>) -> Self {
        Self { repo, files }
    }

    /// Create a fully in-memory service (tests, ephemeral deployments).
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(
            InMemoryChecklistStore::new().shared(),
            InMemoryFileStore::new().shared(),
        )
    }

    /// The repository handle.
    #[must_use]
    pub fn repository(&self) -> &Arc<dyn ChecklistRepository> {
        &self.repo
    }

    // --- Checklist operations ---

    /// Create a checklist (with any nested structure) under fresh tokens.
    ///
    /// Token uniqueness is confirmed against the repository; collisions are
    /// retried internally and never surface.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository rejects the insert for a reason
    /// other than a token collision.
    pub async fn create(&self, draft: ChecklistDraft) -> StoreResult<Checklist> {
        loop {
            let (public_link, edit_token) = self.mint_unique_pair().await;
            let mut checklist = Checklist::new(
                draft.title.clone(),
                draft.description.clone(),
                public_link,
                edit_token,
            );
            checklist.categories = draft.categories.iter().cloned().map(Category::from).collect();

            match self.repo.insert(checklist.clone()).await {
                Ok(()) => return Ok(checklist),
                Err(StoreError::DuplicateToken) => {
                    // Lost a race between the uniqueness probe and the insert.
                    tracing::warn!("share token collision on insert, reissuing");
                },
                Err(e) => return Err(e),
            }
        }
    }

    /// Get a checklist by ID.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no such checklist exists.
    pub async fn get(&self, id: ChecklistId) -> StoreResult<Checklist> {
        self.repo
            .find(id)
            .await
            .ok_or_else(|| StoreError::not_found("checklist", id))
    }

    /// Get a checklist by its public link.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the token resolves nothing.
    pub async fn get_by_public_link(&self, token: &ShareToken) -> StoreResult<Checklist> {
        self.repo
            .find_by_public_link(token)
            .await
            .ok_or_else(|| StoreError::not_found("checklist", token))
    }

    /// Get a checklist by its edit token.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the token resolves nothing.
    pub async fn get_by_edit_token(&self, token: &ShareToken) -> StoreResult<Checklist> {
        self.repo
            .find_by_edit_token(token)
            .await
            .ok_or_else(|| StoreError::not_found("checklist", token))
    }

    /// List checklists in creation order.
    pub async fn list(&self, skip: usize, limit: usize) -> Vec<Checklist> {
        self.repo.list(skip, limit).await
    }

    /// Check that `token` is the edit token of the targeted checklist.
    ///
    /// The access classifier only enforces token *presence*; handlers call
    /// this to uphold the ownership half of the contract.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::EditTokenMismatch`] on a wrong token, or
    /// [`StoreError::NotFound`] if the checklist does not exist.
    pub async fn verify_edit_token(&self, id: ChecklistId, token: &ShareToken) -> StoreResult<()> {
        let checklist = self.get(id).await?;
        if checklist.edit_token == *token {
            Ok(())
        } else {
            Err(StoreError::EditTokenMismatch)
        }
    }

    /// Update a checklist's title/description, optionally replacing its
    /// category tree wholesale.
    ///
    /// A `categories: Some(_)` patch cascade-deletes the existing structure,
    /// including every stored file underneath it.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the checklist does not exist.
    pub async fn update(&self, id: ChecklistId, patch: ChecklistPatch) -> StoreResult<Checklist> {
        let mut checklist = self.get(id).await?;
        checklist.title = patch.title;
        if let Some(description) = patch.description {
            checklist.description = Some(description);
        }
        if let Some(category_drafts) = patch.categories {
            let orphaned = Self::upload_keys(&checklist);
            checklist.categories = category_drafts.into_iter().map(Category::from).collect();
            self.remove_stored_bytes(orphaned).await;
        }
        self.repo.replace(checklist.clone()).await?;
        Ok(checklist)
    }

    /// Delete a checklist, cascading to every descendant record and all
    /// stored file bytes.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the checklist does not exist.
    pub async fn delete(&self, id: ChecklistId) -> StoreResult<()> {
        let removed = self.repo.remove(id).await?;
        self.remove_stored_bytes(Self::upload_keys(&removed)).await;
        Ok(())
    }

    /// Clone a checklist: deep-copy its structure under fresh IDs and fresh
    /// unique tokens. File uploads are never copied, and the clone never
    /// inherits the source's identity.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the source does not exist.
    pub async fn clone_checklist(
        &self,
        id: ChecklistId,
        new_title: Option<String>,
    ) -> StoreResult<Checklist> {
        let source = self.get(id).await?;
        loop {
            let (public_link, edit_token) = self.mint_unique_pair().await;
            let clone = source.clone_structure(new_title.clone(), public_link, edit_token);
            match self.repo.insert(clone.clone()).await {
                Ok(()) => return Ok(clone),
                Err(StoreError::DuplicateToken) => {
                    tracing::warn!("share token collision on insert, reissuing");
                },
                Err(e) => return Err(e),
            }
        }
    }

    // --- Category operations ---

    /// Add a category (with any nested items) to a checklist.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the checklist does not exist.
    pub async fn add_category(
        &self,
        checklist_id: ChecklistId,
        draft: CategoryDraft,
    ) -> StoreResult<Category> {
        let mut checklist = self.get(checklist_id).await?;
        let category = Category::from(draft);
        checklist.categories.push(category.clone());
        self.repo.replace(checklist).await?;
        Ok(category)
    }

    /// Update a category's name, optionally replacing its items wholesale.
    ///
    /// An `items: Some(_)` patch cascade-deletes the existing items and
    /// their stored files.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no checklist contains the category.
    pub async fn update_category(
        &self,
        id: CategoryId,
        patch: CategoryPatch,
    ) -> StoreResult<Category> {
        let mut checklist = self
            .repo
            .find_by_category(id)
            .await
            .ok_or_else(|| StoreError::not_found("category", id))?;

        let mut orphaned = Vec::new();
        let updated = {
            let category = checklist
                .category_mut(id)
                .ok_or_else(|| StoreError::not_found("category", id))?;
            category.name = patch.name;
            if let Some(item_drafts) = patch.items {
                orphaned = category
                    .items
                    .iter()
                    .flat_map(|item| {
                        item.uploads
                            .iter()
                            .map(move |u| upload_key(item.id, &u.filename))
                    })
                    .collect();
                category.items = item_drafts.into_iter().map(Item::from).collect();
            }
            category.clone()
        };
        self.remove_stored_bytes(orphaned).await;
        self.repo.replace(checklist).await?;
        Ok(updated)
    }

    /// Delete a category, cascading to its items, upload records, and
    /// stored file bytes.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no checklist contains the category.
    pub async fn delete_category(&self, id: CategoryId) -> StoreResult<()> {
        let mut checklist = self
            .repo
            .find_by_category(id)
            .await
            .ok_or_else(|| StoreError::not_found("category", id))?;
        let removed = checklist
            .remove_category(id)
            .ok_or_else(|| StoreError::not_found("category", id))?;
        let orphaned = removed
            .items
            .iter()
            .flat_map(|item| {
                item.uploads
                    .iter()
                    .map(move |u| upload_key(item.id, &u.filename))
            })
            .collect();
        self.remove_stored_bytes(orphaned).await;
        self.repo.replace(checklist).await
    }

    // --- Item operations ---

    /// Add an item to a category.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no checklist contains the category.
    pub async fn add_item(&self, category_id: CategoryId, draft: ItemDraft) -> StoreResult<Item> {
        let mut checklist = self
            .repo
            .find_by_category(category_id)
            .await
            .ok_or_else(|| StoreError::not_found("category", category_id))?;
        let item = Item::from(draft);
        {
            let category = checklist
                .category_mut(category_id)
                .ok_or_else(|| StoreError::not_found("category", category_id))?;
            category.items.push(item.clone());
        }
        self.repo.replace(checklist).await?;
        Ok(item)
    }

    /// Update an item's name and multiple-files flag.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no checklist contains the item.
    pub async fn update_item(&self, id: ItemId, patch: ItemPatch) -> StoreResult<Item> {
        let mut checklist = self
            .repo
            .find_by_item(id)
            .await
            .ok_or_else(|| StoreError::not_found("item", id))?;
        let updated = {
            let item = checklist
                .item_mut(id)
                .ok_or_else(|| StoreError::not_found("item", id))?;
            item.name = patch.name;
            item.allow_multiple_files = patch.allow_multiple_files;
            item.clone()
        };
        self.repo.replace(checklist).await?;
        Ok(updated)
    }

    /// Delete an item, cascading to its upload records and stored bytes.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no checklist contains the item.
    pub async fn delete_item(&self, id: ItemId) -> StoreResult<()> {
        let mut checklist = self
            .repo
            .find_by_item(id)
            .await
            .ok_or_else(|| StoreError::not_found("item", id))?;
        let removed = {
            let category = checklist
                .categories
                .iter_mut()
                .find(|c| c.item(id).is_some())
                .ok_or_else(|| StoreError::not_found("item", id))?;
            category
                .remove_item(id)
                .ok_or_else(|| StoreError::not_found("item", id))?
        };
        let orphaned = removed
            .uploads
            .iter()
            .map(|u| upload_key(removed.id, &u.filename))
            .collect();
        self.remove_stored_bytes(orphaned).await;
        self.repo.replace(checklist).await
    }

    // --- Upload operations ---

    /// Attach a file to an item.
    ///
    /// Enforces the upload constraints: single-file items reject a second
    /// upload (delete the existing one first), only suggested extensions are
    /// accepted, and payloads are capped at [`MAX_UPLOAD_BYTES`].
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no checklist contains the item,
    /// or one of the constraint errors above.
    pub async fn upload_file(
        &self,
        item_id: ItemId,
        filename: &str,
        bytes: &[u8],
        uploader: Option<String>,
    ) -> StoreResult<FileUpload> {
        Self::validate_filename(filename)?;
        if bytes.len() > MAX_UPLOAD_BYTES {
            return Err(StoreError::FileTooLarge {
                size: bytes.len(),
                max_bytes: MAX_UPLOAD_BYTES,
            });
        }

        let mut checklist = self
            .repo
            .find_by_item(item_id)
            .await
            .ok_or_else(|| StoreError::not_found("item", item_id))?;
        let upload = FileUpload::new(filename, uploader);
        {
            let item = checklist
                .item_mut(item_id)
                .ok_or_else(|| StoreError::not_found("item", item_id))?;
            if !item.allow_multiple_files && !item.uploads.is_empty() {
                return Err(StoreError::MultipleUploadsNotAllowed {
                    item_id: item_id.to_string(),
                });
            }
            item.uploads.push(upload.clone());
        }

        self.files.save(&upload_key(item_id, filename), bytes).await?;
        self.repo.replace(checklist).await?;
        Ok(upload)
    }

    /// List an item's upload records.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no checklist contains the item.
    pub async fn list_uploads(&self, item_id: ItemId) -> StoreResult<Vec<FileUpload>> {
        let checklist = self
            .repo
            .find_by_item(item_id)
            .await
            .ok_or_else(|| StoreError::not_found("item", item_id))?;
        let item = checklist
            .item(item_id)
            .ok_or_else(|| StoreError::not_found("item", item_id))?;
        Ok(item.uploads.clone())
    }

    /// Get a single upload record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no checklist contains the upload.
    pub async fn get_upload(&self, id: UploadId) -> StoreResult<FileUpload> {
        let checklist = self
            .repo
            .find_by_upload(id)
            .await
            .ok_or_else(|| StoreError::not_found("upload", id))?;
        let (_, upload) = checklist
            .upload(id)
            .ok_or_else(|| StoreError::not_found("upload", id))?;
        Ok(upload.clone())
    }

    /// Delete an upload record and its stored bytes.
    ///
    /// Byte removal happens first and is best-effort: a storage fault is
    /// logged and the record still goes away, as the original service did.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no checklist contains the upload.
    pub async fn delete_upload(&self, id: UploadId) -> StoreResult<()> {
        let mut checklist = self
            .repo
            .find_by_upload(id)
            .await
            .ok_or_else(|| StoreError::not_found("upload", id))?;
        let (item_id, filename) = {
            let (item, upload) = checklist
                .upload(id)
                .ok_or_else(|| StoreError::not_found("upload", id))?;
            (item.id, upload.filename.clone())
        };

        self.remove_stored_bytes(vec![upload_key(item_id, &filename)]).await;

        let item = checklist
            .item_mut(item_id)
            .ok_or_else(|| StoreError::not_found("item", item_id))?;
        item.remove_upload(id)
            .ok_or_else(|| StoreError::not_found("upload", id))?;
        self.repo.replace(checklist).await
    }

    // --- Internals ---

    /// Issue a token pair unused by any existing checklist, in either role.
    async fn mint_unique_pair(&self) -> (ShareToken, ShareToken) {
        loop {
            let (public_link, edit_token) = issue_distinct_pair();
            if self.repo.token_in_use(&public_link).await
                || self.repo.token_in_use(&edit_token).await
            {
                tracing::warn!("share token collision with existing checklist, reissuing");
                continue;
            }
            return (public_link, edit_token);
        }
    }

    /// Storage keys for every upload in a checklist.
    fn upload_keys(checklist: &Checklist) -> Vec<String> {
        checklist
            .all_uploads()
            .map(|(item_id, upload)| upload_key(item_id, &upload.filename))
            .collect()
    }

    /// Best-effort removal of stored bytes; faults are logged, not returned.
    async fn remove_stored_bytes(&self, keys: Vec<String>) {
        for key in keys {
            if let Err(e) = self.files.remove(&key).await {
                tracing::warn!("failed to remove stored file {key}: {e}");
            }
        }
    }

    fn validate_filename(filename: &str) -> StoreResult<()> {
        if filename.is_empty()
            || filename.contains('/')
            || filename.contains('\\')
            || filename == ".."
        {
            return Err(StoreError::InvalidFilename {
                filename: filename.to_string(),
            });
        }
        let extension = filename
            .rfind('.')
            .map(|i| filename[i..].to_ascii_lowercase())
            .unwrap_or_default();
        if !SUGGESTED_EXTENSIONS.contains(&extension.as_str()) {
            return Err(StoreError::UnsupportedFileType {
                extension,
                suggested: SUGGESTED_EXTENSIONS.join(", "),
            });
        }
        Ok(())
    }
}
