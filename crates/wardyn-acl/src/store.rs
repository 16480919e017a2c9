//! Policy store adapter: where per-document policy attributes live.
//!
//! The store deals in whole policies, but the contract underneath is two
//! key-value attributes per document. Adapters own the mapping between the
//! two; the [`MemoryStore`] here shows the canonical shape.

use std::collections::BTreeMap;
use std::sync::PoisonError;
use std::sync::RwLock;

use async_trait::async_trait;
use serde_json::Value;
use wardyn_core::DocumentId;

use crate::error::Result;
use crate::policy::AccessPolicy;

// =============================================================================
// PolicyStore
// =============================================================================

/// Adapter trait for reading and writing per-document policies.
///
/// `load` never distinguishes "no policy stored" from "unrestricted": both
/// come back as the default policy. Adapters report outages as errors and
/// leave the fail-closed reaction to the enforcement points.
#[async_trait]
pub trait PolicyStore: Send + Sync {
    /// Loads the policy for a document, defaulting when nothing is stored.
    async fn load(&self, document_id: &DocumentId) -> Result<AccessPolicy>;

    /// Persists the policy for a document, replacing any previous one.
    async fn save(&self, document_id: &DocumentId, policy: &AccessPolicy) -> Result<()>;
}

// =============================================================================
// MemoryStore
// =============================================================================

/// An in-memory policy store keyed by document id.
///
/// Holds raw attribute maps rather than typed policies, mirroring how host
/// storage works. Saving touches only the two policy attributes, so other
/// attributes a test may have planted survive.
#[derive(Debug, Default)]
pub struct MemoryStore {
    attributes: RwLock<BTreeMap<DocumentId, BTreeMap<String, Value>>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Plants a raw attribute on a document, bypassing the policy codec.
    ///
    /// This is how tests (and host shims) model pre-existing or corrupt
    /// storage: whatever shape goes in here is what `load` will decode.
    pub fn set_attribute(&self, document_id: &DocumentId, attribute: &str, value: Value) {
        self.attributes
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(document_id.clone())
            .or_default()
            .insert(attribute.to_string(), value);
    }

    /// Drops every attribute stored for a document.
    ///
    /// Policies share the document's lifecycle: hosts call this when the
    /// document itself is deleted.
    pub fn remove_document(&self, document_id: &DocumentId) {
        self.attributes
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(document_id);
    }
}

#[async_trait]
impl PolicyStore for MemoryStore {
    async fn load(&self, document_id: &DocumentId) -> Result<AccessPolicy> {
        let attributes = self.attributes.read().unwrap_or_else(PoisonError::into_inner);
        Ok(attributes
            .get(document_id)
            .map(AccessPolicy::from_attributes)
            .unwrap_or_default())
    }

    async fn save(&self, document_id: &DocumentId, policy: &AccessPolicy) -> Result<()> {
        let mut attributes = self.attributes.write().unwrap_or_else(PoisonError::into_inner);
        attributes
            .entry(document_id.clone())
            .or_default()
            .extend(policy.to_attributes());
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
