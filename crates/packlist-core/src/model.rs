//! The checklist entity model.
//!
//! Ownership is modeled by value: a [`Checklist`] owns its categories, a
//! [`Category`] owns its items, an [`Item`] owns its upload records. Dropping
//! a parent therefore drops every descendant, the in-memory equivalent of
//! cascade-delete. Stored file *bytes* live outside this model and are cleaned
//! up by the persistence layer when records are removed.
//!
//! Child collections are ordered: insertion order is display order.

use serde::{Deserialize, Serialize};

use crate::draft::{CategoryDraft, ItemDraft};
use crate::types::{CategoryId, ChecklistId, ItemId, ShareToken, Timestamp, UploadId};

/// A single uploaded file attached to an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileUpload {
    /// Unique upload identifier.
    pub id: UploadId,
    /// Original filename as supplied by the uploader.
    pub filename: String,
    /// When the file was uploaded.
    pub uploaded_at: Timestamp,
    /// Optional free-text label for who uploaded the file.
    pub uploader: Option<String>,
}

impl FileUpload {
    /// Create a new upload record stamped with the current time.
    #[must_use]
    pub fn new(filename: impl Into<String>, uploader: Option<String>) -> Self {
        Self {
            id: UploadId::new(),
            filename: filename.into(),
            uploaded_at: Timestamp::now(),
            uploader,
        }
    }
}

/// A checklist item. Accepts file uploads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Unique item identifier.
    pub id: ItemId,
    /// Item name.
    pub name: String,
    /// Whether more than one file may be attached to this item.
    pub allow_multiple_files: bool,
    /// Uploads attached to this item.
    pub uploads: Vec<FileUpload>,
}

impl Item {
    /// Create a new item with no uploads.
    #[must_use]
    pub fn new(name: impl Into<String>, allow_multiple_files: bool) -> Self {
        Self {
            id: ItemId::new(),
            name: name.into(),
            allow_multiple_files,
            uploads: Vec::new(),
        }
    }

    /// Look up an upload record by ID.
    #[must_use]
    pub fn upload(&self, id: UploadId) -> Option<&FileUpload> {
        self.uploads.iter().find(|u| u.id == id)
    }

    /// Remove an upload record, returning it if present.
    pub fn remove_upload(&mut self, id: UploadId) -> Option<FileUpload> {
        let index = self.uploads.iter().position(|u| u.id == id)?;
        Some(self.uploads.remove(index))
    }

    /// Copy this item's structure (name, flags) without its uploads.
    #[must_use]
    pub fn clone_structure(&self) -> Self {
        Self::new(self.name.clone(), self.allow_multiple_files)
    }
}

impl From<ItemDraft> for Item {
    fn from(draft: ItemDraft) -> Self {
        Self::new(draft.name, draft.allow_multiple_files)
    }
}

/// A named group of items inside a checklist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Unique category identifier.
    pub id: CategoryId,
    /// Category name.
    pub name: String,
    /// Items in this category, in display order.
    pub items: Vec<Item>,
}

impl Category {
    /// Create a new empty category.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: CategoryId::new(),
            name: name.into(),
            items: Vec::new(),
        }
    }

    /// Look up an item by ID.
    #[must_use]
    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Mutable lookup of an item by ID.
    pub fn item_mut(&mut self, id: ItemId) -> Option<&mut Item> {
        self.items.iter_mut().find(|i| i.id == id)
    }

    /// Remove an item (and, by ownership, its upload records).
    pub fn remove_item(&mut self, id: ItemId) -> Option<Item> {
        let index = self.items.iter().position(|i| i.id == id)?;
        Some(self.items.remove(index))
    }

    /// Copy this category's structure without any uploads.
    #[must_use]
    pub fn clone_structure(&self) -> Self {
        let mut copy = Self::new(self.name.clone());
        copy.items = self.items.iter().map(Item::clone_structure).collect();
        copy
    }
}

impl From<CategoryDraft> for Category {
    fn from(draft: CategoryDraft) -> Self {
        let mut category = Self::new(draft.name);
        category.items = draft.items.into_iter().map(Item::from).collect();
        category
    }
}

/// A checklist: the root entity, shared via its two tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checklist {
    /// Unique checklist identifier.
    pub id: ChecklistId,
    /// Checklist title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Token granting view + upload access.
    pub public_link: ShareToken,
    /// Token granting full structural control. Never equal to `public_link`.
    pub edit_token: ShareToken,
    /// When the checklist was created.
    pub created_at: Timestamp,
    /// Categories in display order.
    pub categories: Vec<Category>,
}

impl Checklist {
    /// Create a new empty checklist with the given tokens.
    ///
    /// Callers mint the tokens; uniqueness against existing checklists is the
    /// persistence layer's contract.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        description: Option<String>,
        public_link: ShareToken,
        edit_token: ShareToken,
    ) -> Self {
        Self {
            id: ChecklistId::new(),
            title: title.into(),
            description,
            public_link,
            edit_token,
            created_at: Timestamp::now(),
            categories: Vec::new(),
        }
    }

    /// Look up a category by ID.
    #[must_use]
    pub fn category(&self, id: CategoryId) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Mutable lookup of a category by ID.
    pub fn category_mut(&mut self, id: CategoryId) -> Option<&mut Category> {
        self.categories.iter_mut().find(|c| c.id == id)
    }

    /// Remove a category (cascading to its items and upload records).
    pub fn remove_category(&mut self, id: CategoryId) -> Option<Category> {
        let index = self.categories.iter().position(|c| c.id == id)?;
        Some(self.categories.remove(index))
    }

    /// Look up an item anywhere in the checklist.
    #[must_use]
    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.categories.iter().find_map(|c| c.item(id))
    }

    /// Mutable lookup of an item anywhere in the checklist.
    pub fn item_mut(&mut self, id: ItemId) -> Option<&mut Item> {
        self.categories.iter_mut().find_map(|c| c.item_mut(id))
    }

    /// Find the item owning the given upload, together with the record.
    #[must_use]
    pub fn upload(&self, id: UploadId) -> Option<(&Item, &FileUpload)> {
        self.categories
            .iter()
            .flat_map(|c| c.items.iter())
            .find_map(|item| item.upload(id).map(|u| (item, u)))
    }

    /// Iterate every upload record in the checklist with its owning item ID.
    ///
    /// Used by the persistence layer to clean up stored file bytes when a
    /// subtree is deleted.
    pub fn all_uploads(&self) -> impl Iterator<Item = (ItemId, &FileUpload)> {
        self.categories
            .iter()
            .flat_map(|c| c.items.iter())
            .flat_map(|item| item.uploads.iter().map(move |u| (item.id, u)))
    }

    /// Deep-copy the checklist structure under a new identity.
    ///
    /// Categories and items are copied (names, flags) with fresh IDs; file
    /// uploads are never copied. The clone gets the supplied tokens; it
    /// never inherits the source's identity. Without an explicit title the
    /// clone is named `Copy of {title}`.
    #[must_use]
    pub fn clone_structure(
        &self,
        new_title: Option<String>,
        public_link: ShareToken,
        edit_token: ShareToken,
    ) -> Self {
        let title = new_title.unwrap_or_else(|| format!("Copy of {}", self.title));
        let mut clone = Self::new(title, self.description.clone(), public_link, edit_token);
        clone.categories = self.categories.iter().map(Category::clone_structure).collect();
        clone
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_checklist() -> Checklist {
        let mut checklist = Checklist::new(
            "Onboarding",
            Some("New hire documents".to_string()),
            ShareToken::new("pub-token"),
            ShareToken::new("edit-token"),
        );
        let mut category = Category::new("Identity");
        let mut item = Item::new("Passport scan", false);
        item.uploads.push(FileUpload::new("passport.pdf", Some("alice".to_string())));
        category.items.push(item);
        category.items.push(Item::new("Visa", true));
        checklist.categories.push(category);
        checklist.categories.push(Category::new("Contracts"));
        checklist
    }

    #[test]
    fn test_lookup_by_id() {
        let checklist = sample_checklist();
        let category_id = checklist.categories[0].id;
        let item_id = checklist.categories[0].items[0].id;

        assert_eq!(checklist.category(category_id).unwrap().name, "Identity");
        assert_eq!(checklist.item(item_id).unwrap().name, "Passport scan");
        assert!(checklist.item(ItemId::new()).is_none());
    }

    #[test]
    fn test_upload_lookup() {
        let checklist = sample_checklist();
        let upload_id = checklist.categories[0].items[0].uploads[0].id;

        let (item, upload) = checklist.upload(upload_id).unwrap();
        assert_eq!(item.name, "Passport scan");
        assert_eq!(upload.filename, "passport.pdf");
    }

    #[test]
    fn test_remove_category_cascades() {
        let mut checklist = sample_checklist();
        let category_id = checklist.categories[0].id;

        let removed = checklist.remove_category(category_id).unwrap();
        assert_eq!(removed.items.len(), 2);
        assert!(checklist.category(category_id).is_none());
        assert_eq!(checklist.all_uploads().count(), 0);
    }

    #[test]
    fn test_all_uploads_spans_categories() {
        let mut checklist = sample_checklist();
        let visa_id = checklist.categories[0].items[1].id;
        checklist
            .item_mut(visa_id)
            .unwrap()
            .uploads
            .push(FileUpload::new("visa.pdf", None));

        let uploads: Vec<_> = checklist.all_uploads().collect();
        assert_eq!(uploads.len(), 2);
    }

    #[test]
    fn test_clone_structure_drops_uploads_and_renames() {
        let source = sample_checklist();
        let clone = source.clone_structure(
            None,
            ShareToken::new("new-pub"),
            ShareToken::new("new-edit"),
        );

        assert_eq!(clone.title, "Copy of Onboarding");
        assert_eq!(clone.description, source.description);
        assert_eq!(clone.categories.len(), 2);
        assert_eq!(clone.categories[0].items.len(), 2);
        assert_eq!(clone.all_uploads().count(), 0);

        // Fresh identity throughout
        assert_ne!(clone.id, source.id);
        assert_ne!(clone.categories[0].id, source.categories[0].id);
        assert_ne!(clone.categories[0].items[0].id, source.categories[0].items[0].id);
        assert_ne!(clone.public_link, source.public_link);
        assert_ne!(clone.edit_token, source.edit_token);
    }

    #[test]
    fn test_clone_structure_explicit_title() {
        let source = sample_checklist();
        let clone = source.clone_structure(
            Some("Q3 onboarding".to_string()),
            ShareToken::new("p"),
            ShareToken::new("e"),
        );
        assert_eq!(clone.title, "Q3 onboarding");
    }
}
