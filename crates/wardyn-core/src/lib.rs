//! Wardyn Core — shared contracts for the Wardyn access gate.
//!
//! This crate provides the foundational types used across all Wardyn crates.
//! It has no internal Wardyn dependencies (dependency level 0).
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`document`]: Document identity and kind contracts
//! - [`role`]: Role identifiers and the sanitized-key format

#![doc = include_str!("../README.md")]

pub mod document;
pub mod error;
pub mod role;

// Re-export key types at crate root for convenience
pub use document::{Document, DocumentId, DocumentKind};
pub use error::{Error, Result};
pub use role::RoleId;
