//! Wardyn document access gate — umbrella crate.
//!
//! This crate re-exports all Wardyn components for convenience.
//! Use feature flags to enable specific functionality.

#![doc = include_str!("../README.md")]

pub use wardyn_acl as acl;
pub use wardyn_core as core;

#[cfg(feature = "http")]
pub use wardyn_http as http;
