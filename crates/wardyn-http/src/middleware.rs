//! Tower middleware for the direct-view enforcement point.
//!
//! `GateLayer` and `GateService` wrap any inner service with the access
//! check. Host middleware earlier in the stack resolves the request into
//! a [`Document`] and a [`Viewer`] and stores both in request extensions;
//! this layer reads them back and either forwards the request or answers
//! with the uniform not-found.

use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use axum::body::Body;
use axum::response::IntoResponse;
use http::Request;
use tower::{Layer, Service};
use wardyn_acl::{AccessGate, Viewer};
use wardyn_core::Document;

use crate::response::not_found_response;

/// Tower `Layer` that wraps services with the direct-view gate.
#[derive(Clone)]
pub struct GateLayer {
    gate: AccessGate,
}

impl GateLayer {
    /// Create a new gate layer over the given access gate.
    pub fn new(gate: AccessGate) -> Self {
        Self { gate }
    }
}

impl<S> Layer<S> for GateLayer {
    type Service = GateService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        GateService {
            inner,
            gate: self.gate.clone(),
        }
    }
}

/// Tower `Service` that gates document views before forwarding requests.
///
/// Requests without a [`Document`] extension pass through: routes that
/// resolve no document (archives, search pages, the not-found page
/// itself) have nothing to gate. A missing [`Viewer`] extension is an
/// anonymous viewer, never an allow.
#[derive(Clone)]
pub struct GateService<S> {
    inner: S,
    gate: AccessGate,
}

impl<S> Service<Request<Body>> for GateService<S>
where
    S: Service<Request<Body>, Error = Infallible> + Clone + Send + 'static,
    S::Response: IntoResponse,
    S::Future: Send,
{
    type Response = axum::response::Response;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        let gate = self.gate.clone();

        Box::pin(async move {
            let Some(document) = req.extensions().get::<Document>().cloned() else {
                let resp = inner
                    .call(req)
                    .await
                    .unwrap_or_else(|infallible| match infallible {});
                return Ok(resp.into_response());
            };

            let viewer = req
                .extensions()
                .get::<Viewer>()
                .cloned()
                .unwrap_or_else(Viewer::anonymous);

            let outcome = gate.check_view(&document, &viewer).await;
            if outcome.is_not_found() {
                return Ok(not_found_response());
            }

            let resp = inner
                .call(req)
                .await
                .unwrap_or_else(|infallible| match infallible {});
            Ok(resp.into_response())
        })
    }
}
