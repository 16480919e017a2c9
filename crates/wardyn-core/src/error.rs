//! Error types for wardyn-core

use thiserror::Error;

/// Result type alias for wardyn-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in wardyn-core
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// A role key candidate was rejected by sanitization.
    ///
    /// Candidates are rejected rather than repaired: stripping characters
    /// could silently turn one key into a *different* valid key.
    #[error("invalid role key: {candidate:?}")]
    InvalidRoleKey {
        /// The candidate as submitted, before any folding.
        candidate: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_role_key_display() {
        let e = Error::InvalidRoleKey {
            candidate: "dr0p;table".to_string(),
        };
        assert_eq!(e.to_string(), "invalid role key: \"dr0p;table\"");
    }
}
