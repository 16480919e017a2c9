//! Access policy: the per-document restriction flag and allowed-role list.
//!
//! Policies live in host storage as two key-value attributes attached to a
//! document. Stored values arrive as loosely-typed JSON, so decoding never
//! fails: every shape maps to a policy, and shapes that cannot be trusted
//! map to the *more restrictive* reading.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use wardyn_core::RoleId;

/// Storage attribute holding the restriction flag.
pub const RESTRICT_ACCESS_ATTR: &str = "wardyn_restrict_access";

/// Storage attribute holding the allowed-role list.
pub const ALLOWED_ROLES_ATTR: &str = "wardyn_allowed_roles";

// =============================================================================
// AllowedRoles
// =============================================================================

/// The stored allowed-role list, as found in host storage.
///
/// Stored data is not trusted to be well-formed. A list that decodes
/// cleanly is carried as [`AllowedRoles::List`]; anything else is carried
/// as [`AllowedRoles::Malformed`], which the decision engine denies
/// outright. Entries of a `List` are *candidate* role keys: they are not
/// validated against the registry until evaluation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowedRoles {
    /// A cleanly decoded list of candidate role keys.
    List(Vec<String>),
    /// The stored value was not an array of strings.
    Malformed,
}

impl Default for AllowedRoles {
    /// Absent storage decodes as an empty list, not as malformed data.
    fn default() -> Self {
        AllowedRoles::List(Vec::new())
    }
}

impl AllowedRoles {
    /// Decode a stored attribute value.
    ///
    /// Absent or null values mean the policy was never configured and
    /// decode to the default empty list. An array decodes element-wise,
    /// and a single non-string element poisons the whole list.
    pub fn from_value(value: Option<&Value>) -> Self {
        match value {
            None | Some(Value::Null) => AllowedRoles::default(),
            Some(Value::Array(items)) => {
                let mut keys = Vec::with_capacity(items.len());
                for item in items {
                    match item {
                        Value::String(key) => keys.push(key.clone()),
                        _ => return AllowedRoles::Malformed,
                    }
                }
                AllowedRoles::List(keys)
            }
            Some(_) => AllowedRoles::Malformed,
        }
    }

    /// Encode for storage.
    ///
    /// `Malformed` never round-trips: writing it back produces an empty
    /// array so that corrupt data does not outlive the next save.
    pub fn to_value(&self) -> Value {
        match self {
            AllowedRoles::List(keys) => {
                Value::Array(keys.iter().map(|key| Value::String(key.clone())).collect())
            }
            AllowedRoles::Malformed => Value::Array(Vec::new()),
        }
    }

    /// Whether this is a cleanly decoded, empty list.
    pub fn is_empty_list(&self) -> bool {
        matches!(self, AllowedRoles::List(keys) if keys.is_empty())
    }

    /// Whether this is a cleanly decoded list with at least one candidate.
    ///
    /// Not the negation of [`AllowedRoles::is_empty_list`]: `Malformed`
    /// answers false to both.
    pub fn has_candidates(&self) -> bool {
        matches!(self, AllowedRoles::List(keys) if !keys.is_empty())
    }
}

// =============================================================================
// AccessPolicy
// =============================================================================

/// The complete access policy for one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessPolicy {
    /// Whether restriction is engaged at all. `false` short-circuits
    /// evaluation to allow.
    pub restrict_access: bool,
    /// Candidate role keys, only consulted when restriction is engaged.
    pub allowed_roles: AllowedRoles,
}

impl AccessPolicy {
    /// A policy that leaves the document visible to everyone.
    pub fn unrestricted() -> Self {
        Self::default()
    }

    /// A policy restricting the document to any authenticated viewer.
    pub fn any_authenticated() -> Self {
        Self {
            restrict_access: true,
            allowed_roles: AllowedRoles::List(Vec::new()),
        }
    }

    /// A policy restricting the document to viewers holding one of the
    /// given role keys. Keys are stored verbatim; validation happens at
    /// evaluation time.
    pub fn restricted_to<I, S>(roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            restrict_access: true,
            allowed_roles: AllowedRoles::List(roles.into_iter().map(Into::into).collect()),
        }
    }

    /// Decode a policy from a document's attribute map.
    ///
    /// The flag decodes leniently: absent or null means unrestricted, a
    /// boolean is taken as stored, and any other stored shape engages
    /// restriction. A corrupt flag must not silently expose a document
    /// someone tried to restrict.
    pub fn from_attributes(attributes: &BTreeMap<String, Value>) -> Self {
        let restrict_access = match attributes.get(RESTRICT_ACCESS_ATTR) {
            None | Some(Value::Null) => false,
            Some(Value::Bool(flag)) => *flag,
            Some(_) => true,
        };
        Self {
            restrict_access,
            allowed_roles: AllowedRoles::from_value(attributes.get(ALLOWED_ROLES_ATTR)),
        }
    }

    /// Encode this policy as storage attributes.
    pub fn to_attributes(&self) -> BTreeMap<String, Value> {
        BTreeMap::from([
            (RESTRICT_ACCESS_ATTR.to_string(), Value::Bool(self.restrict_access)),
            (ALLOWED_ROLES_ATTR.to_string(), self.allowed_roles.to_value()),
        ])
    }
}

// =============================================================================
// PolicyDraft
// =============================================================================

/// An editor-submitted policy, before normalization.
///
/// This is the shape an editing surface posts. Both fields default when
/// omitted, so a bare `{}` submission clears the policy.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PolicyDraft {
    /// Requested restriction flag.
    #[serde(default)]
    pub restrict_access: bool,
    /// Requested role keys, in submission order. May contain duplicates,
    /// mixed case, or garbage; normalization cleans them up.
    #[serde(default)]
    pub allowed_roles: Vec<String>,
}

impl PolicyDraft {
    /// Normalize the draft into a storable policy.
    ///
    /// Each candidate key is normalized; candidates that do not survive
    /// normalization are dropped. Duplicates collapse to their first
    /// occurrence, preserving submission order. The result is always a
    /// well-formed `List` and never `Malformed`.
    pub fn into_policy(self) -> AccessPolicy {
        let mut seen = BTreeSet::new();
        let mut keys = Vec::new();
        for candidate in self.allowed_roles {
            let Ok(role) = RoleId::normalize(&candidate) else {
                log::debug!("dropping role key that failed normalization: {candidate:?}");
                continue;
            };
            if seen.insert(role.clone()) {
                keys.push(role.into_string());
            }
        }
        AccessPolicy {
            restrict_access: self.restrict_access,
            allowed_roles: AllowedRoles::List(keys),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
