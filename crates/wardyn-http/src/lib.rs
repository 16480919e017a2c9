//! HTTP enforcement surfaces for Wardyn.
//!
//! Provides:
//! - [`GateLayer`] / [`GateService`] — Tower middleware for the direct-view gate
//! - [`filter_document_response`] — response filtering for API surfaces
//! - [`not_found_response`] — the uniform denial response
//!
//! The host resolves requests into [`wardyn_core::Document`] and
//! [`wardyn_acl::Viewer`] values and places them in request extensions;
//! everything here consumes those.

mod filter;
mod middleware;
mod response;

pub use filter::filter_document_response;
pub use middleware::{GateLayer, GateService};
pub use response::not_found_response;
