//! Role registry adapter: the host's authoritative role table.
//!
//! Wardyn never defines roles of its own. The host platform owns the role
//! table, and the [`RoleRegistry`] trait is the seam through which Wardyn
//! reads it. Catalogs are snapshots: evaluation fetches a fresh one each
//! time so that deleted roles stop granting access immediately.

use std::collections::BTreeMap;
use std::sync::PoisonError;
use std::sync::RwLock;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use wardyn_core::RoleId;

use crate::error::Result;

// =============================================================================
// RoleCatalog
// =============================================================================

/// A point-in-time snapshot of the host's role table.
///
/// Maps each role id to its human-readable label. Membership queries drive
/// validation; labels only surface in editing UIs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleCatalog(BTreeMap<RoleId, String>);

impl RoleCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a role with its display label. Replaces any existing
    /// label for the same id.
    pub fn insert(&mut self, role: RoleId, label: impl Into<String>) {
        self.0.insert(role, label.into());
    }

    /// Whether the catalog contains the given role.
    pub fn contains(&self, role: &RoleId) -> bool {
        self.0.contains_key(role)
    }

    /// The display label for a role, if registered.
    pub fn label(&self, role: &RoleId) -> Option<&str> {
        self.0.get(role).map(String::as_str)
    }

    /// Iterates over registered role ids in lexicographic order.
    pub fn ids(&self) -> impl Iterator<Item = &RoleId> {
        self.0.keys()
    }

    /// Number of registered roles.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the catalog has no roles at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Renders the catalog as selectable options for an editing surface.
    pub fn options(&self) -> Vec<RoleOption> {
        self.0
            .iter()
            .map(|(role, label)| RoleOption {
                id: role.clone(),
                label: label.clone(),
            })
            .collect()
    }
}

impl FromIterator<(RoleId, String)> for RoleCatalog {
    fn from_iter<T: IntoIterator<Item = (RoleId, String)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// One selectable role in an editing surface: id plus display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleOption {
    /// Canonical role id, used as the submission value.
    pub id: RoleId,
    /// Human-readable label, used as the display text.
    pub label: String,
}

// =============================================================================
// RoleRegistry
// =============================================================================

/// Adapter trait for reading the host's role table.
///
/// Implementations wrap whatever the host platform exposes: a config file,
/// a database table, an identity-provider API. A failed read must surface
/// as an error; callers decide how to fail closed.
#[async_trait]
pub trait RoleRegistry: Send + Sync {
    /// Fetches a fresh snapshot of the role table.
    async fn list_roles(&self) -> Result<RoleCatalog>;
}

// =============================================================================
// StaticRoles
// =============================================================================

/// An in-memory registry backed by a fixed catalog.
///
/// Useful for hosts with a config-defined role table, and for tests. The
/// catalog can be swapped at runtime to model registry churn.
#[derive(Debug, Default)]
pub struct StaticRoles {
    catalog: RwLock<RoleCatalog>,
}

impl StaticRoles {
    /// Creates a registry serving the given catalog.
    pub fn new(catalog: RoleCatalog) -> Self {
        Self {
            catalog: RwLock::new(catalog),
        }
    }

    /// Replaces the served catalog.
    pub fn set_catalog(&self, catalog: RoleCatalog) {
        *self
            .catalog
            .write()
            .unwrap_or_else(PoisonError::into_inner) = catalog;
    }
}

#[async_trait]
impl RoleRegistry for StaticRoles {
    async fn list_roles(&self) -> Result<RoleCatalog> {
        Ok(self
            .catalog
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }
}

// =============================================================================
// Tests
// =============================================================================
