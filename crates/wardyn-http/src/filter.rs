//! Response filtering for API surfaces.
//!
//! API routes build their document responses first and gate them last, so
//! a serializer added later in the stack cannot reintroduce a leak. The
//! filter swaps the whole response: no field-level redaction exists,
//! because a partially visible document is still a disclosure.

use axum::response::Response;
use wardyn_acl::{AccessGate, Viewer};
use wardyn_core::Document;

use crate::response::not_found_response;

/// Replaces `response` with a not-found if `viewer` may not see `document`.
///
/// The built response passes through untouched on allow. On deny it is
/// dropped wholesale, including headers a handler may have set, and the
/// uniform not-found takes its place.
pub async fn filter_document_response(
    gate: &AccessGate,
    document: &Document,
    viewer: &Viewer,
    response: Response,
) -> Response {
    if gate.allows(document, viewer).await {
        response
    } else {
        log::debug!("withholding response for {}", document.id);
        not_found_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::to_bytes;
    use axum::response::IntoResponse;
    use http::{header, StatusCode};
    use wardyn_acl::{AccessPolicy, GateConfig, MemoryStore, PolicyStore, RoleCatalog, StaticRoles};
    use wardyn_core::RoleId;

    async fn gate_with_policy(policy: AccessPolicy) -> (Document, AccessGate) {
        let document = Document::new("doc-1", "post");
        let store = Arc::new(MemoryStore::new());
        store.save(&document.id, &policy).await.unwrap();

        let catalog: RoleCatalog = [("editor", "Editor")]
            .into_iter()
            .map(|(id, label)| (RoleId::parse(id).unwrap(), label.to_string()))
            .collect();
        let gate = AccessGate::new(
            store,
            Arc::new(StaticRoles::new(catalog)),
            GateConfig::default(),
        );
        (document, gate)
    }

    fn document_response() -> Response {
        (
            StatusCode::OK,
            [(header::ETAG, "\"v7\"")],
            "the secret quarterly numbers",
        )
            .into_response()
    }

    #[tokio::test]
    async fn test_allowed_response_passes_untouched() {
        let (document, gate) = gate_with_policy(AccessPolicy::unrestricted()).await;

        let filtered = filter_document_response(
            &gate,
            &document,
            &Viewer::anonymous(),
            document_response(),
        )
        .await;

        assert_eq!(filtered.status(), StatusCode::OK);
        assert_eq!(filtered.headers().get(header::ETAG).unwrap(), "\"v7\"");
    }

    #[tokio::test]
    async fn test_denied_response_is_replaced_wholesale() {
        let (document, gate) =
            gate_with_policy(AccessPolicy::restricted_to(["editor"])).await;

        let filtered = filter_document_response(
            &gate,
            &document,
            &Viewer::anonymous(),
            document_response(),
        )
        .await;

        assert_eq!(filtered.status(), StatusCode::NOT_FOUND);
        // Handler-set headers must not survive the swap.
        assert!(filtered.headers().get(header::ETAG).is_none());

        let bytes = to_bytes(filtered.into_body(), usize::MAX).await.unwrap();
        let body = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(!body.contains("secret"));
    }

    #[tokio::test]
    async fn test_denied_member_sees_same_not_found() {
        let (document, gate) =
            gate_with_policy(AccessPolicy::restricted_to(["editor"])).await;
        let subscriber = Viewer::member([RoleId::parse("subscriber").unwrap()]);

        let filtered = filter_document_response(
            &gate,
            &document,
            &subscriber,
            document_response(),
        )
        .await;

        assert_eq!(filtered.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_store_outage_withholds_response() {
        struct DownStore;

        #[async_trait::async_trait]
        impl PolicyStore for DownStore {
            async fn load(
                &self,
                _document_id: &wardyn_core::DocumentId,
            ) -> wardyn_acl::Result<AccessPolicy> {
                Err(wardyn_acl::Error::store_unavailable("connection refused"))
            }

            async fn save(
                &self,
                _document_id: &wardyn_core::DocumentId,
                _policy: &AccessPolicy,
            ) -> wardyn_acl::Result<()> {
                Err(wardyn_acl::Error::store_unavailable("connection refused"))
            }
        }

        let document = Document::new("doc-1", "post");
        let gate = AccessGate::new(
            Arc::new(DownStore),
            Arc::new(StaticRoles::default()),
            GateConfig::default(),
        );

        let filtered = filter_document_response(
            &gate,
            &document,
            &Viewer::anonymous(),
            document_response(),
        )
        .await;
        assert_eq!(filtered.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_allowed_member_receives_body() {
        let (document, gate) =
            gate_with_policy(AccessPolicy::restricted_to(["editor"])).await;
        let editor = Viewer::member([RoleId::parse("editor").unwrap()]);

        let filtered = filter_document_response(
            &gate,
            &document,
            &editor,
            document_response(),
        )
        .await;
        let bytes = to_bytes(filtered.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"the secret quarterly numbers");
    }
}
