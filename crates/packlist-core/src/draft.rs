//! Draft and patch payloads for checklist CRUD.
//!
//! Drafts describe entities to be created (nested, like the create payloads
//! handlers receive); patches describe updates. A patch whose child collection
//! is `Some(_)` replaces the existing children wholesale; the replaced
//! subtree and its uploads are cascade-deleted by the service layer.

use serde::{Deserialize, Serialize};

/// Payload for creating an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDraft {
    /// Item name.
    pub name: String,
    /// Whether more than one file may be attached.
    #[serde(default)]
    pub allow_multiple_files: bool,
}

impl ItemDraft {
    /// Create an item draft.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            allow_multiple_files: false,
        }
    }

    /// Allow multiple file uploads on this item.
    #[must_use]
    pub fn with_multiple_files(mut self) -> Self {
        self.allow_multiple_files = true;
        self
    }
}

/// Payload for creating a category, optionally with nested items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDraft {
    /// Category name.
    pub name: String,
    /// Items to create inside the category.
    #[serde(default)]
    pub items: Vec<ItemDraft>,
}

impl CategoryDraft {
    /// Create an empty category draft.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            items: Vec::new(),
        }
    }

    /// Add an item to the draft.
    #[must_use]
    pub fn with_item(mut self, item: ItemDraft) -> Self {
        self.items.push(item);
        self
    }
}

/// Payload for creating a checklist, optionally with nested structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistDraft {
    /// Checklist title.
    pub title: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// Categories to create inside the checklist.
    #[serde(default)]
    pub categories: Vec<CategoryDraft>,
}

impl ChecklistDraft {
    /// Create an empty checklist draft.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            categories: Vec::new(),
        }
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Add a category to the draft.
    #[must_use]
    pub fn with_category(mut self, category: CategoryDraft) -> Self {
        self.categories.push(category);
        self
    }
}

/// Update payload for an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemPatch {
    /// New item name.
    pub name: String,
    /// New multiple-files flag.
    #[serde(default)]
    pub allow_multiple_files: bool,
}

/// Update payload for a category.
///
/// `items: Some(_)` replaces the category's items wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryPatch {
    /// New category name.
    pub name: String,
    /// Replacement items, if the item list is being rewritten.
    #[serde(default)]
    pub items: Option<Vec<ItemDraft>>,
}

/// Update payload for a checklist.
///
/// `categories: Some(_)` replaces the checklist's categories wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistPatch {
    /// New checklist title.
    pub title: String,
    /// New description; `None` leaves the existing description unchanged.
    #[serde(default)]
    pub description: Option<String>,
    /// Replacement categories, if the structure is being rewritten.
    #[serde(default)]
    pub categories: Option<Vec<CategoryDraft>>,
}
