//! The access decision engine.
//!
//! [`decide`] is the single chokepoint: every enforcement point resolves
//! its answer here, so a document can never be hidden from a listing yet
//! reachable by direct view, or vice versa. The checks run in a fixed
//! order and the first one that fires wins.

use serde::{Deserialize, Serialize};

use crate::policy::{AccessPolicy, AllowedRoles};
use crate::registry::RoleCatalog;
use crate::validate::validate_roles;
use crate::viewer::Viewer;

/// The outcome of an access decision.
///
/// There are exactly two: a viewer may see a document or they may not.
/// No "partial" access exists anywhere in Wardyn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// The viewer may see the document.
    Allow,
    /// The viewer may not see the document, nor learn that it exists.
    Deny,
}

impl Verdict {
    /// Whether this verdict grants access.
    pub fn is_allow(self) -> bool {
        matches!(self, Verdict::Allow)
    }

    /// Whether this verdict withholds access.
    pub fn is_deny(self) -> bool {
        matches!(self, Verdict::Deny)
    }
}

/// Decides whether `viewer` may see a document governed by `policy`.
///
/// The checks run in order; each either settles the answer or falls
/// through to the next:
///
/// 1. Restriction disengaged: allow.
/// 2. Manage-capability bypass: allow.
/// 3. Not authenticated: deny.
/// 4. Empty role list: allow. Restriction without roles means "any
///    signed-in viewer".
/// 5. Malformed role list: deny.
/// 6. Validate the stored list against the catalog.
/// 7. Nothing survived validation: deny. A list whose every entry has gone
///    stale is misconfiguration, not the step-4 "no roles configured"
///    case, and misconfiguration locks the document down.
/// 8. Allow exactly when the viewer holds at least one surviving role.
///
/// The function is pure: same inputs, same verdict. All I/O (loading the
/// policy, snapshotting the catalog) happens before this point.
pub fn decide(policy: &AccessPolicy, viewer: &Viewer, catalog: &RoleCatalog) -> Verdict {
    if !policy.restrict_access {
        return Verdict::Allow;
    }

    if viewer.admin_bypass {
        log::debug!("allow: manage-capability bypass");
        return Verdict::Allow;
    }

    if !viewer.authenticated {
        log::debug!("deny: viewer is not authenticated");
        return Verdict::Deny;
    }

    match &policy.allowed_roles {
        AllowedRoles::List(candidates) if candidates.is_empty() => {
            log::debug!("allow: restricted to any authenticated viewer");
            return Verdict::Allow;
        }
        AllowedRoles::Malformed => {
            log::debug!("deny: stored role list is malformed");
            return Verdict::Deny;
        }
        AllowedRoles::List(_) => {}
    }

    let valid = validate_roles(&policy.allowed_roles, catalog);
    if valid.is_empty() {
        log::debug!("deny: no stored role survived validation");
        return Verdict::Deny;
    }

    if viewer.roles.iter().any(|role| valid.contains(role)) {
        Verdict::Allow
    } else {
        log::debug!("deny: viewer holds none of the allowed roles");
        Verdict::Deny
    }
}

// =============================================================================
// Tests
// =============================================================================
