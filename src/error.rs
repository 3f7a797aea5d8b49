//! Error types for subnet planning.
//!
//! Validation errors abort a run before any tree is built. Per-requirement
//! conditions (unsizable, no match) are carried as result rows instead, see
//! [`crate::processing::MatchOutcome`].

use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, VlsmError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VlsmError {
    /// Malformed `A.B.C.D/N` input.
    #[error("Invalid address input '{input}': {reason}")]
    InvalidAddressInput { input: String, reason: String },

    /// Prefix length outside 0..=32.
    #[error("Invalid network prefix length /{prefix}")]
    InvalidNetwork { prefix: u8 },

    /// No subnet within a /1 can hold this many hosts.
    #[error("No subnet can accommodate {hosts} hosts")]
    UnsizableRequirement { hosts: u64 },

    /// Subdivision tree would exceed the configured node limit.
    #[error("Subnet tree would need {nodes} nodes, limit is {limit}")]
    TreeTooLarge { nodes: u64, limit: u64 },

    /// Bad configuration value.
    #[error("Invalid value '{value}' for {key}")]
    InvalidConfig { key: String, value: String },
}

impl VlsmError {
    pub(crate) fn invalid_input(input: &str, reason: impl Into<String>) -> Self {
        VlsmError::InvalidAddressInput {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let e = VlsmError::invalid_input("10.0.0.1", "missing '/'");
        assert_eq!(
            e.to_string(),
            "Invalid address input '10.0.0.1': missing '/'"
        );
        let e = VlsmError::TreeTooLarge {
            nodes: 8388606,
            limit: 1048576,
        };
        assert_eq!(
            e.to_string(),
            "Subnet tree would need 8388606 nodes, limit is 1048576"
        );
    }
}
