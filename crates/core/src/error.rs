//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic request/business failures. All of
/// these are terminal from the service's perspective: the caller must
/// change the request to succeed. Infrastructure concerns belong elsewhere.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. malformed or out-of-range input).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The referenced account does not exist.
    #[error("account not found")]
    NotFound,

    /// An account with the given id already exists.
    #[error("account already exists")]
    AlreadyExists,

    /// A business-rule precondition failed (e.g. insufficient funds).
    #[error("failed precondition: {0}")]
    FailedPrecondition(String),
}

impl DomainError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn failed_precondition(msg: impl Into<String>) -> Self {
        Self::FailedPrecondition(msg.into())
    }
}
