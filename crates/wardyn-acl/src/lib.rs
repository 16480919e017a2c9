//! Role-based access restriction for host-managed documents.
//!
//! Wardyn decides one question: may this viewer see this document? Hosts
//! mark individual documents as restricted, optionally to a set of their
//! own roles, and route every read path through the gate. Everything else
//! (users, sessions, roles, storage) stays owned by the host and reaches
//! Wardyn through two adapter traits.
//!
//! # Features
//!
//! - `store-sqlite`: SQLite-backed [`PolicyStore`] for embedded deployments
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      wardyn-acl                             │
//! ├─────────────────────────────────────────────────────────────┤
//! │  AccessGate (enforcement facade)                            │
//! │  ├── check_view    → ViewOutcome::{Found, NotFound}         │
//! │  ├── filter_listing → order-preserving subset               │
//! │  ├── allows        → response filtering answer              │
//! │  └── save_policy / role_options → editing surface           │
//! ├─────────────────────────────────────────────────────────────┤
//! │  decide() (fixed-order decision engine)                     │
//! │  validate_roles() (normalize + registry membership)         │
//! │  AccessPolicy / AllowedRoles / PolicyDraft                  │
//! ├─────────────────────────────────────────────────────────────┤
//! │  PolicyStore trait  ── MemoryStore, SqliteStore             │
//! │  RoleRegistry trait ── StaticRoles                          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use wardyn_acl::{AccessGate, GateConfig, MemoryStore, PolicyDraft, StaticRoles, Viewer};
//! use wardyn_core::{Document, DocumentId};
//!
//! let gate = AccessGate::new(
//!     Arc::new(MemoryStore::new()),
//!     Arc::new(StaticRoles::new(roles_from_host_config())),
//!     GateConfig::default(),
//! );
//!
//! // Editing surface: restrict a document to editors.
//! let draft = PolicyDraft {
//!     restrict_access: true,
//!     allowed_roles: vec!["editor".to_string()],
//! };
//! gate.save_policy(&DocumentId::new("doc-42"), draft).await?;
//!
//! // Read path: a denied view is indistinguishable from a missing page.
//! let outcome = gate.check_view(&document, &Viewer::anonymous()).await;
//! if outcome.is_not_found() {
//!     return render_not_found();
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

// Core modules (always available)
pub mod enforce;
pub mod engine;
pub mod error;
pub mod gate;
pub mod policy;
pub mod registry;
pub mod store;
pub mod validate;
pub mod viewer;

mod proptests;

// Feature-gated SQLite store
#[cfg(feature = "store-sqlite")]
pub mod sqlite_store;

// Re-exports
pub use enforce::{filter_listing, gate_view, ViewOutcome};
pub use engine::{decide, Verdict};
pub use error::{Error, Result};
pub use gate::AccessGate;
pub use policy::{AccessPolicy, AllowedRoles, PolicyDraft};
pub use registry::{RoleCatalog, RoleOption, RoleRegistry, StaticRoles};
pub use store::{MemoryStore, PolicyStore};
pub use validate::validate_roles;
pub use viewer::Viewer;

#[cfg(feature = "store-sqlite")]
pub use sqlite_store::SqliteStore;

// Commonly used core types, re-exported for convenience
pub use wardyn_core::{Document, DocumentId, DocumentKind, RoleId};

/// Configuration for the enforcement points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateConfig {
    /// Document kinds subject to evaluation. Everything else passes
    /// through every enforcement point untouched.
    #[serde(default = "default_governed_kinds")]
    pub governed_kinds: BTreeSet<DocumentKind>,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            governed_kinds: default_governed_kinds(),
        }
    }
}

impl GateConfig {
    /// Whether documents of `kind` are subject to evaluation.
    pub fn governs(&self, kind: &DocumentKind) -> bool {
        self.governed_kinds.contains(kind)
    }
}

fn default_governed_kinds() -> BTreeSet<DocumentKind> {
    BTreeSet::from([DocumentKind::post(), DocumentKind::page()])
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_governed_kinds() {
        let config = GateConfig::default();
        assert!(config.governs(&DocumentKind::post()));
        assert!(config.governs(&DocumentKind::page()));
        assert!(!config.governs(&DocumentKind::new("attachment")));
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: GateConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, GateConfig::default());

        let config: GateConfig =
            serde_json::from_str(r#"{"governed_kinds": ["post", "recipe"]}"#).unwrap();
        assert!(config.governs(&DocumentKind::new("recipe")));
        assert!(!config.governs(&DocumentKind::page()));
    }
}
