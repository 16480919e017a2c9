//! SQLite-backed policy store, enabled by the `store-sqlite` feature.
//!
//! Persists the attribute contract directly: one row per (document,
//! attribute) pair, with the value stored as JSON text. Hosts that already
//! have a document database will usually write their own [`PolicyStore`]
//! adapter instead; this one suits embedded and single-node deployments.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde_json::Value;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use wardyn_core::DocumentId;

use crate::error::{Error, Result};
use crate::policy::AccessPolicy;
use crate::store::PolicyStore;

const SCHEMA: &str = "\
CREATE TABLE IF NOT EXISTS wardyn_attributes (
    document_id TEXT NOT NULL,
    attribute   TEXT NOT NULL,
    value       TEXT NOT NULL,
    PRIMARY KEY (document_id, attribute)
)";

const UPSERT: &str = "\
INSERT INTO wardyn_attributes (document_id, attribute, value)
VALUES (?1, ?2, ?3)
ON CONFLICT (document_id, attribute) DO UPDATE SET value = excluded.value";

const SELECT_ATTRIBUTES: &str =
    "SELECT attribute, value FROM wardyn_attributes WHERE document_id = ?1";

const DELETE_DOCUMENT: &str = "DELETE FROM wardyn_attributes WHERE document_id = ?1";

/// A [`PolicyStore`] over a SQLite database.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Connects to the database at `url` and ensures the schema exists.
    ///
    /// In-memory databases (`sqlite::memory:`) get a single-connection
    /// pool, since every new connection would otherwise see its own empty
    /// database.
    pub async fn connect(url: &str) -> Result<Self> {
        let max_connections = if url.contains(":memory:") { 1 } else { 4 };
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await
            .map_err(|err| Error::store_unavailable(err.to_string()))?;
        Self::with_pool(pool).await
    }

    /// Wraps an existing pool and ensures the schema exists.
    pub async fn with_pool(pool: SqlitePool) -> Result<Self> {
        sqlx::query(SCHEMA)
            .execute(&pool)
            .await
            .map_err(|err| Error::store_unavailable(err.to_string()))?;
        Ok(Self { pool })
    }

    /// Drops every attribute row stored for a document.
    pub async fn remove_document(&self, document_id: &DocumentId) -> Result<()> {
        sqlx::query(DELETE_DOCUMENT)
            .bind(document_id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|err| Error::store_unavailable(err.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl PolicyStore for SqliteStore {
    async fn load(&self, document_id: &DocumentId) -> Result<AccessPolicy> {
        let rows: Vec<(String, String)> = sqlx::query_as(SELECT_ATTRIBUTES)
            .bind(document_id.as_str())
            .fetch_all(&self.pool)
            .await
            .map_err(|err| Error::store_unavailable(err.to_string()))?;

        let mut attributes = BTreeMap::new();
        for (attribute, raw) in rows {
            // Undecodable text is kept as a raw string so the policy
            // codec's corrupt-data rules apply instead of a silent default.
            let value = serde_json::from_str(&raw)
                .unwrap_or_else(|_| Value::String(raw.clone()));
            attributes.insert(attribute, value);
        }
        Ok(AccessPolicy::from_attributes(&attributes))
    }

    async fn save(&self, document_id: &DocumentId, policy: &AccessPolicy) -> Result<()> {
        for (attribute, value) in policy.to_attributes() {
            sqlx::query(UPSERT)
                .bind(document_id.as_str())
                .bind(&attribute)
                .bind(value.to_string())
                .execute(&self.pool)
                .await
                .map_err(|err| Error::store_unavailable(err.to_string()))?;
        }
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::{AllowedRoles, ALLOWED_ROLES_ATTR, RESTRICT_ACCESS_ATTR};

    async fn temp_store() -> (tempfile::TempDir, SqliteStore) {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}?mode=rwc", dir.path().join("wardyn.db").display());
        let store = SqliteStore::connect(&url).await.unwrap();
        (dir, store)
    }

    #[tokio::test]
    async fn test_load_defaults_when_nothing_stored() {
        let (_dir, store) = temp_store().await;
        let policy = store.load(&DocumentId::new("missing")).await.unwrap();
        assert_eq!(policy, AccessPolicy::unrestricted());
    }

    #[tokio::test]
    async fn test_save_then_load_round_trips() {
        let (_dir, store) = temp_store().await;
        let id = DocumentId::new("doc-1");
        let policy = AccessPolicy::restricted_to(["editor", "subscriber"]);

        store.save(&id, &policy).await.unwrap();
        assert_eq!(store.load(&id).await.unwrap(), policy);
    }

    #[tokio::test]
    async fn test_save_upserts_in_place() {
        let (_dir, store) = temp_store().await;
        let id = DocumentId::new("doc-1");

        store.save(&id, &AccessPolicy::restricted_to(["editor"])).await.unwrap();
        store.save(&id, &AccessPolicy::unrestricted()).await.unwrap();

        assert_eq!(store.load(&id).await.unwrap(), AccessPolicy::unrestricted());
    }

    #[tokio::test]
    async fn test_garbage_rows_decode_fail_closed() {
        let (_dir, store) = temp_store().await;
        let id = DocumentId::new("doc-1");

        // Plant rows that are not valid JSON at all.
        for (attribute, raw) in [(RESTRICT_ACCESS_ATTR, "yes please"), (ALLOWED_ROLES_ATTR, "editor")] {
            sqlx::query(UPSERT)
                .bind(id.as_str())
                .bind(attribute)
                .bind(raw)
                .execute(&store.pool)
                .await
                .unwrap();
        }

        let policy = store.load(&id).await.unwrap();
        assert!(policy.restrict_access);
        assert_eq!(policy.allowed_roles, AllowedRoles::Malformed);
    }

    #[tokio::test]
    async fn test_remove_document_forgets_policy() {
        let (_dir, store) = temp_store().await;
        let id = DocumentId::new("doc-1");
        store.save(&id, &AccessPolicy::any_authenticated()).await.unwrap();

        store.remove_document(&id).await.unwrap();
        assert_eq!(store.load(&id).await.unwrap(), AccessPolicy::unrestricted());
    }

    #[tokio::test]
    async fn test_in_memory_url_works() {
        let store = SqliteStore::connect("sqlite::memory:").await.unwrap();
        let id = DocumentId::new("doc-1");
        store.save(&id, &AccessPolicy::restricted_to(["editor"])).await.unwrap();
        assert_eq!(
            store.load(&id).await.unwrap(),
            AccessPolicy::restricted_to(["editor"])
        );
    }
}
