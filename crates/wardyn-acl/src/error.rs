//! Error types for wardyn-acl

use thiserror::Error;

/// Result type alias for wardyn-acl operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in wardyn-acl
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from wardyn-core
    #[error("Core error: {0}")]
    Core(#[from] wardyn_core::Error),

    /// The role registry could not produce its role table.
    ///
    /// Evaluation treats this as an empty registry, which denies every
    /// role-restricted document. Default-allow is never an option here.
    #[error("role registry unavailable: {reason}")]
    RegistryUnavailable {
        /// Adapter-supplied description of the outage.
        reason: String,
    },

    /// The policy store could not be read or written.
    ///
    /// Enforcement points fail closed when they see this: direct views
    /// report not-found, listings drop the affected item.
    #[error("policy store unavailable: {reason}")]
    StoreUnavailable {
        /// Adapter-supplied description of the outage.
        reason: String,
    },
}

impl Error {
    /// Build a [`Error::RegistryUnavailable`] from any printable reason.
    pub fn registry_unavailable(reason: impl Into<String>) -> Self {
        Self::RegistryUnavailable {
            reason: reason.into(),
        }
    }

    /// Build a [`Error::StoreUnavailable`] from any printable reason.
    pub fn store_unavailable(reason: impl Into<String>) -> Self {
        Self::StoreUnavailable {
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::store_unavailable("connection refused");
        assert_eq!(err.to_string(), "policy store unavailable: connection refused");

        let err = Error::registry_unavailable("timed out");
        assert_eq!(err.to_string(), "role registry unavailable: timed out");
    }

    #[test]
    fn test_core_error_conversion() {
        let core_err = wardyn_core::RoleId::parse("Not Valid").unwrap_err();
        let err: Error = core_err.into();
        assert!(matches!(err, Error::Core(_)));
        assert!(err.to_string().starts_with("Core error:"));
    }
}
