//! The access gate: enforcement wired to live adapters.
//!
//! [`AccessGate`] owns the two adapter seams (policy store, role registry)
//! and exposes the operations hosts call from their request paths. All
//! fail-closed behavior on adapter outages lives here, so the pure
//! engine and enforcement code never see an error type.

use std::sync::Arc;

use wardyn_core::{Document, DocumentId};

use crate::enforce::{gate_view, ViewOutcome};
use crate::engine::decide;
use crate::error::Result;
use crate::policy::{AccessPolicy, PolicyDraft};
use crate::registry::{RoleCatalog, RoleOption, RoleRegistry};
use crate::store::PolicyStore;
use crate::viewer::Viewer;
use crate::GateConfig;

/// Whether deciding `policy` can reach role validation.
///
/// Only an engaged restriction with a well-formed, non-empty role list
/// gets that far; everything else (including a malformed list, which
/// denies before validation) settles without consulting the catalog and
/// never needs a registry fetch.
fn needs_registry(policy: &AccessPolicy) -> bool {
    policy.restrict_access && policy.allowed_roles.has_candidates()
}

/// The enforcement facade over a policy store and a role registry.
///
/// Cloning is cheap; clones share the same adapters.
#[derive(Clone)]
pub struct AccessGate {
    store: Arc<dyn PolicyStore>,
    registry: Arc<dyn RoleRegistry>,
    config: GateConfig,
}

impl AccessGate {
    /// Builds a gate over the given adapters.
    pub fn new(
        store: Arc<dyn PolicyStore>,
        registry: Arc<dyn RoleRegistry>,
        config: GateConfig,
    ) -> Self {
        Self {
            store,
            registry,
            config,
        }
    }

    /// The gate's enforcement configuration.
    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    /// Snapshots the role catalog, treating an outage as an empty table.
    ///
    /// An empty table keeps every decision lawful: checks that never
    /// touch roles are unaffected, and role-restricted documents deny
    /// because nothing survives validation. Default-allow never happens.
    async fn catalog_snapshot(&self) -> RoleCatalog {
        match self.registry.list_roles().await {
            Ok(catalog) => catalog,
            Err(err) => {
                log::warn!("role registry unavailable, role-restricted documents will deny: {err}");
                RoleCatalog::new()
            }
        }
    }

    /// Gates a direct view of `document` for `viewer`.
    ///
    /// A store outage denies: the document reads as not found until the
    /// store comes back.
    pub async fn check_view(&self, document: &Document, viewer: &Viewer) -> ViewOutcome {
        if !self.config.governs(&document.kind) {
            return ViewOutcome::Found(document.clone());
        }
        let policy = match self.store.load(&document.id).await {
            Ok(policy) => policy,
            Err(err) => {
                log::warn!("policy store unavailable, treating {} as not found: {err}", document.id);
                return ViewOutcome::NotFound;
            }
        };
        let catalog = if needs_registry(&policy) {
            self.catalog_snapshot().await
        } else {
            RoleCatalog::new()
        };
        gate_view(document, &policy, viewer, &catalog, &self.config)
    }

    /// Whether `viewer` may see `document` at all.
    ///
    /// This is the answer response filters act on: a deny means the
    /// document's representation must be withheld wholesale.
    pub async fn allows(&self, document: &Document, viewer: &Viewer) -> bool {
        self.check_view(document, viewer).await.is_found()
    }

    /// Filters a listing down to the documents `viewer` may see.
    ///
    /// Order is preserved and survivors are returned untouched. Items
    /// whose policy cannot be loaded drop out; the rest of the listing
    /// is unaffected. The catalog snapshot is taken at most once per
    /// pass, when the first policy that can reach role validation
    /// appears, so every item validates against the same role table.
    pub async fn filter_listing(&self, documents: Vec<Document>, viewer: &Viewer) -> Vec<Document> {
        let mut catalog: Option<RoleCatalog> = None;
        let empty = RoleCatalog::new();

        let mut kept = Vec::with_capacity(documents.len());
        for document in documents {
            if !self.config.governs(&document.kind) {
                kept.push(document);
                continue;
            }
            let policy = match self.store.load(&document.id).await {
                Ok(policy) => policy,
                Err(err) => {
                    log::warn!(
                        "policy store unavailable, dropping {} from listing: {err}",
                        document.id
                    );
                    continue;
                }
            };
            let snapshot = if needs_registry(&policy) {
                if catalog.is_none() {
                    catalog = Some(self.catalog_snapshot().await);
                }
                catalog.as_ref().unwrap_or(&empty)
            } else {
                &empty
            };
            if decide(&policy, viewer, snapshot).is_allow() {
                kept.push(document);
            }
        }
        kept
    }

    /// Normalizes and persists an editor-submitted draft.
    ///
    /// Authorization to edit is the host's business and must be settled
    /// before calling this. Returns the normalized policy as stored, so
    /// editing surfaces can echo back what actually took effect.
    pub async fn save_policy(
        &self,
        document_id: &DocumentId,
        draft: PolicyDraft,
    ) -> Result<AccessPolicy> {
        let policy = draft.into_policy();
        self.store.save(document_id, &policy).await?;
        Ok(policy)
    }

    /// The selectable roles for an editing surface.
    ///
    /// Unlike evaluation, an outage here is surfaced: an editor shown an
    /// empty role picker would conclude the roles are gone.
    pub async fn role_options(&self) -> Result<Vec<RoleOption>> {
        Ok(self.registry.list_roles().await?.options())
    }
}

// =============================================================================
// Tests
// =============================================================================
