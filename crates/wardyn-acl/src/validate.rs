//! Role validation: reducing stored candidates to live, registered roles.

use std::collections::BTreeSet;

use wardyn_core::RoleId;

use crate::policy::AllowedRoles;
use crate::registry::RoleCatalog;

/// Validates stored candidate keys against a registry snapshot.
///
/// Each candidate is normalized, then kept only if the catalog knows it.
/// Candidates that fail normalization and keys the registry has since
/// forgotten both drop out silently; a `Malformed` list validates to
/// nothing. The result is a set, so duplicates collapse and order is
/// lexicographic rather than positional.
///
/// This function cannot fail. Whatever garbage the candidates carry, the
/// answer is the (possibly empty) set of roles that may grant access.
pub fn validate_roles(candidates: &AllowedRoles, catalog: &RoleCatalog) -> BTreeSet<RoleId> {
    let AllowedRoles::List(candidates) = candidates else {
        return BTreeSet::new();
    };
    candidates
        .iter()
        .filter_map(|candidate| RoleId::normalize(candidate).ok())
        .filter(|role| catalog.contains(role))
        .collect()
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn role(key: &str) -> RoleId {
        RoleId::parse(key).unwrap()
    }

    fn catalog(keys: &[&str]) -> RoleCatalog {
        keys.iter()
            .map(|key| (role(key), format!("Label for {key}")))
            .collect()
    }

    fn list(keys: &[&str]) -> AllowedRoles {
        AllowedRoles::List(keys.iter().map(|key| key.to_string()).collect())
    }

    #[test]
    fn test_mixed_candidate_battery() {
        let stored = list(&["Editor", "subscriber", "", "dr0p;table"]);
        let valid = validate_roles(&stored, &catalog(&["editor", "subscriber", "author"]));
        assert_eq!(valid, BTreeSet::from([role("editor"), role("subscriber")]));
    }

    #[test]
    fn test_unregistered_keys_drop_out() {
        let stored = list(&["editor", "ghost-role"]);
        let valid = validate_roles(&stored, &catalog(&["editor"]));
        assert_eq!(valid, BTreeSet::from([role("editor")]));
    }

    #[test]
    fn test_malformed_validates_to_nothing() {
        let valid = validate_roles(&AllowedRoles::Malformed, &catalog(&["editor"]));
        assert!(valid.is_empty());
    }

    #[test]
    fn test_empty_list_validates_to_nothing() {
        let valid = validate_roles(&list(&[]), &catalog(&["editor"]));
        assert!(valid.is_empty());
    }

    #[test]
    fn test_empty_catalog_validates_everything_away() {
        let stored = list(&["editor", "subscriber"]);
        assert!(validate_roles(&stored, &RoleCatalog::new()).is_empty());
    }

    #[test]
    fn test_duplicates_collapse() {
        let stored = list(&["editor", "Editor", " editor "]);
        let valid = validate_roles(&stored, &catalog(&["editor"]));
        assert_eq!(valid.len(), 1);
    }

    #[test]
    fn test_hostile_candidates_never_panic() {
        let stored = list(&[
            "../../etc/passwd",
            "role\u{0}key",
            "ロール",
            "DROP TABLE roles;--",
            "\t\n",
        ]);
        assert!(validate_roles(&stored, &catalog(&["editor"])).is_empty());
    }
}
