//! Document identity and kind contracts.
//!
//! Documents are the host platform's content items. Wardyn never stores or
//! renders them; it only needs a stable identity (`DocumentId`) and a kind
//! (`DocumentKind`) to decide whether a document is subject to gating.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a document, assigned by the host platform.
///
/// Ids are opaque strings. Wardyn imposes no format on them and compares
/// them verbatim.
///
/// # Examples
///
/// ```
/// use wardyn_core::DocumentId;
///
/// let id = DocumentId::new("press-release-2041");
/// assert_eq!(id.as_str(), "press-release-2041");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DocumentId(String);

impl DocumentId {
    /// Creates a document id from a string.
    pub fn new<S: Into<String>>(id: S) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for DocumentId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for DocumentId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Kind of a document, as named by the host platform.
///
/// Kinds are opaque strings compared verbatim (case-sensitive). Only kinds
/// listed in the gate configuration's governed set are ever evaluated; all
/// other kinds pass through enforcement ungated.
///
/// # Examples
///
/// ```
/// use wardyn_core::DocumentKind;
///
/// assert_eq!(DocumentKind::post().as_str(), "post");
/// assert_eq!(DocumentKind::new("recipe").as_str(), "recipe");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DocumentKind(String);

impl DocumentKind {
    /// Creates a document kind from a string.
    pub fn new<S: Into<String>>(kind: S) -> Self {
        Self(kind.into())
    }

    /// The built-in "post" kind.
    pub fn post() -> Self {
        Self("post".to_string())
    }

    /// The built-in "page" kind.
    pub fn page() -> Self {
        Self("page".to_string())
    }

    /// Returns the kind as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for DocumentKind {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for DocumentKind {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A document as seen by the gate: identity plus kind.
///
/// This is the whole document source contract. Wardyn never reads titles,
/// bodies, or any other field of the host's content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Host-assigned identifier.
    pub id: DocumentId,
    /// Host-assigned kind.
    pub kind: DocumentKind,
}

impl Document {
    /// Creates a document handle from an id and a kind.
    pub fn new(id: impl Into<DocumentId>, kind: impl Into<DocumentKind>) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_id_roundtrip() {
        let id = DocumentId::new("doc-17");
        assert_eq!(id.as_str(), "doc-17");
        assert_eq!(id.to_string(), "doc-17");
        assert_eq!(DocumentId::from("doc-17"), id);
    }

    #[test]
    fn test_document_kind_builtins() {
        assert_eq!(DocumentKind::post(), DocumentKind::new("post"));
        assert_eq!(DocumentKind::page(), DocumentKind::new("page"));
        assert_ne!(DocumentKind::post(), DocumentKind::page());
    }

    #[test]
    fn test_document_kind_case_sensitive() {
        assert_ne!(DocumentKind::new("Post"), DocumentKind::post());
    }

    #[test]
    fn test_document_new() {
        let doc = Document::new("doc-1", DocumentKind::page());
        assert_eq!(doc.id.as_str(), "doc-1");
        assert_eq!(doc.kind, DocumentKind::page());
    }

    #[test]
    fn test_document_serialization() {
        let doc = Document::new("doc-1", "post");
        let json = serde_json::to_string(&doc).unwrap();
        assert_eq!(json, r#"{"id":"doc-1","kind":"post"}"#);

        let restored: Document = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, doc);
    }
}
