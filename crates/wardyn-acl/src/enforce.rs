//! Enforcement primitives: the direct-view gate and the listing filter.
//!
//! These are the pure halves of the two read-path enforcement points.
//! They take prefetched policies and a catalog snapshot; [`AccessGate`]
//! (in [`crate::gate`]) wires the same logic to live adapters.
//!
//! [`AccessGate`]: crate::gate::AccessGate

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use wardyn_core::{Document, DocumentId};

use crate::engine::{decide, Verdict};
use crate::policy::AccessPolicy;
use crate::registry::RoleCatalog;
use crate::viewer::Viewer;
use crate::GateConfig;

/// What a direct document view may render.
///
/// A denied view is indistinguishable from a view of a document that was
/// never there: `NotFound` carries nothing, so no fragment of the
/// document can leak into an error page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ViewOutcome {
    /// The document may be rendered.
    Found(Document),
    /// Render the host's genuine not-found page, with nothing else.
    NotFound,
}

impl ViewOutcome {
    /// Whether the view may proceed.
    pub fn is_found(&self) -> bool {
        matches!(self, ViewOutcome::Found(_))
    }

    /// Whether the view must render not-found.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ViewOutcome::NotFound)
    }

    /// The viewable document, if any.
    pub fn document(&self) -> Option<&Document> {
        match self {
            ViewOutcome::Found(document) => Some(document),
            ViewOutcome::NotFound => None,
        }
    }
}

/// Gates a direct view of one document.
///
/// Ungoverned kinds pass through without evaluation. Governed kinds
/// resolve through [`decide`], and a deny comes back as [`ViewOutcome::NotFound`]
/// rather than any "forbidden" signal: restricted documents must not be
/// discoverable by probing.
pub fn gate_view(
    document: &Document,
    policy: &AccessPolicy,
    viewer: &Viewer,
    catalog: &RoleCatalog,
    config: &GateConfig,
) -> ViewOutcome {
    if !config.governs(&document.kind) {
        return ViewOutcome::Found(document.clone());
    }
    match decide(policy, viewer, catalog) {
        Verdict::Allow => ViewOutcome::Found(document.clone()),
        Verdict::Deny => ViewOutcome::NotFound,
    }
}

/// Filters a listing down to the documents `viewer` may see.
///
/// Documents keep their incoming order and are returned untouched; the
/// only thing this function does is drop entries. Documents missing from
/// `policies` evaluate under the default (unrestricted) policy, matching
/// how stores read absent attributes.
pub fn filter_listing(
    documents: Vec<Document>,
    policies: &BTreeMap<DocumentId, AccessPolicy>,
    viewer: &Viewer,
    catalog: &RoleCatalog,
    config: &GateConfig,
) -> Vec<Document> {
    let default = AccessPolicy::default();
    documents
        .into_iter()
        .filter(|document| {
            if !config.governs(&document.kind) {
                return true;
            }
            let policy = policies.get(&document.id).unwrap_or(&default);
            decide(policy, viewer, catalog).is_allow()
        })
        .collect()
}

// =============================================================================
// Tests
// =============================================================================
