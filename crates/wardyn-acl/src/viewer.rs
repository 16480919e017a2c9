//! The viewer: who is asking to see a document.
//!
//! Wardyn does not authenticate anyone. The host resolves its session or
//! token into a [`Viewer`], and everything downstream treats that as
//! ground truth.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use wardyn_core::RoleId;

/// The requesting principal, as resolved by the host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewer {
    /// Whether the host authenticated this request at all.
    #[serde(default)]
    pub authenticated: bool,
    /// Roles the host has granted this viewer. Meaningless unless
    /// `authenticated` is set.
    #[serde(default)]
    pub roles: BTreeSet<RoleId>,
    /// Whether the host granted the manage-level capability that bypasses
    /// every restriction. Derived from capability, not from role names.
    #[serde(default)]
    pub admin_bypass: bool,
}

impl Viewer {
    /// An unauthenticated visitor.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// A signed-in viewer carrying the given roles.
    pub fn member<I>(roles: I) -> Self
    where
        I: IntoIterator<Item = RoleId>,
    {
        Self {
            authenticated: true,
            roles: roles.into_iter().collect(),
            admin_bypass: false,
        }
    }

    /// Sets the manage-capability bypass flag.
    pub fn with_admin_bypass(mut self, bypass: bool) -> Self {
        self.admin_bypass = bypass;
        self
    }

    /// Whether this viewer holds the given role.
    pub fn has_role(&self, role: &RoleId) -> bool {
        self.roles.contains(role)
    }
}

// =============================================================================
// Tests
// =============================================================================
