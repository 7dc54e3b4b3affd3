//! Route classification.
//!
//! A [`RouteClass`] captures the authorization-relevant shape of a route as
//! an explicit value instead of inline substring checks buried in middleware.
//! Routers that know their route templates can classify once at registration
//! time (placeholders like `{public_link}` don't affect the result) and hand
//! the class to [`AccessRequest`](crate::AccessRequest); otherwise the class
//! is computed per request from the raw path.
//!
//! Matching semantics are deliberately those of the original service: a path
//! is public-scoped iff it contains `checklists/public/`, edit-scoped iff it
//! contains `checklists/edit/`, targets uploads iff it contains `uploads`,
//! and is a clone operation iff it contains `clone`.

use serde::{Deserialize, Serialize};

/// Path fragment marking public-link scoped routes.
const PUBLIC_FRAGMENT: &str = "checklists/public/";

/// Path fragment marking edit-token scoped routes.
const EDIT_FRAGMENT: &str = "checklists/edit/";

/// How a route addresses its checklist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteScope {
    /// Resolved via the checklist's public link.
    Public,
    /// Resolved via the checklist's edit token.
    Edit,
    /// Addressed directly by entity ID (or a collection endpoint).
    Direct,
}

impl std::fmt::Display for RouteScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Public => write!(f, "public"),
            Self::Edit => write!(f, "edit"),
            Self::Direct => write!(f, "direct"),
        }
    }
}

/// The authorization-relevant shape of a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RouteClass {
    scope: RouteScope,
    targets_uploads: bool,
    is_clone: bool,
    is_checklist_collection: bool,
}

impl RouteClass {
    /// Classify a path (or a route template) into its route class.
    #[must_use]
    pub fn classify(path: &str) -> Self {
        let scope = if path.contains(PUBLIC_FRAGMENT) {
            RouteScope::Public
        } else if path.contains(EDIT_FRAGMENT) {
            RouteScope::Edit
        } else {
            RouteScope::Direct
        };

        Self {
            scope,
            targets_uploads: path.contains("uploads"),
            is_clone: path.contains("clone"),
            is_checklist_collection: path.trim_end_matches('/') == "/checklists",
        }
    }

    /// How the route addresses its checklist.
    #[must_use]
    pub fn scope(&self) -> RouteScope {
        self.scope
    }

    /// Whether the route targets a file-upload endpoint.
    #[must_use]
    pub fn targets_uploads(&self) -> bool {
        self.targets_uploads
    }

    /// Whether the route is a checklist clone operation.
    #[must_use]
    pub fn is_clone(&self) -> bool {
        self.is_clone
    }

    /// Whether the route is the top-level checklist collection.
    #[must_use]
    pub fn is_checklist_collection(&self) -> bool {
        self.is_checklist_collection
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_scope_at_any_depth() {
        for path in [
            "/checklists/public/abc123",
            "/checklists/public/abc123/categories",
            "/checklists/public/abc123/items/5/uploads/",
        ] {
            assert_eq!(RouteClass::classify(path).scope(), RouteScope::Public, "{path}");
        }
    }

    #[test]
    fn test_edit_scope() {
        let class = RouteClass::classify("/checklists/edit/xyz789");
        assert_eq!(class.scope(), RouteScope::Edit);
        assert!(!class.targets_uploads());
    }

    #[test]
    fn test_direct_scope_for_id_routes() {
        for path in ["/categories/5", "/items/7", "/uploads/3", "/checklists/42"] {
            assert_eq!(RouteClass::classify(path).scope(), RouteScope::Direct, "{path}");
        }
    }

    #[test]
    fn test_upload_detection() {
        assert!(RouteClass::classify("/items/5/uploads/").targets_uploads());
        assert!(RouteClass::classify("/uploads/3").targets_uploads());
        assert!(!RouteClass::classify("/items/5").targets_uploads());
    }

    #[test]
    fn test_clone_detection() {
        assert!(RouteClass::classify("/checklists/42/clone").is_clone());
        assert!(!RouteClass::classify("/checklists/42").is_clone());
    }

    #[test]
    fn test_checklist_collection() {
        assert!(RouteClass::classify("/checklists/").is_checklist_collection());
        assert!(RouteClass::classify("/checklists").is_checklist_collection());
        assert!(!RouteClass::classify("/checklists/42").is_checklist_collection());
    }

    #[test]
    fn test_template_and_path_classify_alike() {
        let template = RouteClass::classify("/checklists/public/{public_link}/categories");
        let path = RouteClass::classify("/checklists/public/abc123/categories");
        assert_eq!(template, path);
    }
}
