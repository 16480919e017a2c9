//! Role identifiers and the sanitized-key format.
//!
//! Role ids are opaque keys drawn from a conservative charset: lowercase
//! ASCII alphanumerics plus `-` and `_`. Whether a key names a real role is
//! decided elsewhere, against the host's role registry, at evaluation time.
//! This module only guarantees the *shape* of a key.
//!
//! Two entry points:
//!
//! - [`RoleId::parse`] — strict; the input must already be canonical.
//! - [`RoleId::normalize`] — folds case and trims edges, then applies the
//!   strict rules. Anything else about the candidate is grounds for
//!   rejection, never for repair: deleting characters could silently turn
//!   one key into a *different* valid key.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A role identifier in canonical sanitized-key form.
///
/// # Examples
///
/// ```
/// use wardyn_core::RoleId;
///
/// let id = RoleId::parse("editor").unwrap();
/// assert_eq!(id.as_str(), "editor");
///
/// // Case folds, edges trim:
/// assert_eq!(RoleId::normalize("  Editor ").unwrap(), RoleId::parse("editor").unwrap());
///
/// // Out-of-charset characters reject the whole candidate:
/// assert!(RoleId::normalize("dr0p;table").is_err());
/// assert!(RoleId::parse("").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RoleId(String);

impl RoleId {
    /// Parses a key that must already be in canonical form.
    ///
    /// Accepts non-empty strings of `[a-z0-9_-]`; rejects everything else.
    pub fn parse(key: &str) -> Result<Self> {
        if is_canonical_key(key) {
            Ok(Self(key.to_string()))
        } else {
            Err(Error::InvalidRoleKey {
                candidate: key.to_string(),
            })
        }
    }

    /// Normalizes a candidate into canonical form, or rejects it.
    ///
    /// Trims surrounding ASCII whitespace, lowercases ASCII letters, and
    /// then applies the [`parse`](Self::parse) rules to the result. No
    /// other repair is attempted: dropping or mapping arbitrary characters
    /// could collide two distinct valid keys.
    pub fn normalize(candidate: &str) -> Result<Self> {
        let folded = candidate.trim().to_ascii_lowercase();
        Self::parse(&folded).map_err(|_| Error::InvalidRoleKey {
            candidate: candidate.to_string(),
        })
    }

    /// Returns the role id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the role id, returning the underlying string.
    pub fn into_string(self) -> String {
        self.0
    }
}

/// Checks membership in the canonical charset: non-empty `[a-z0-9_-]`.
fn is_canonical_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .bytes()
            .all(|b| matches!(b, b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_'))
}

impl fmt::Display for RoleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RoleId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for RoleId {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for RoleId {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
