//! Domain-level error types.

use thiserror::Error;

/// Domain errors - the failure kinds a procedure can report.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation failed for {field}: {}", .messages.join(", "))]
    Validation {
        field: &'static str,
        messages: Vec<String>,
    },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Unauthorized access")]
    Unauthorized,

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Constraint violation: {0}")]
    Constraint(String),
}

impl From<RepoError> for DomainError {
    fn from(err: RepoError) -> Self {
        tracing::error!(error = %err, "Post store failure");
        DomainError::Internal(err.to_string())
    }
}

impl From<crate::ports::IdentityError> for DomainError {
    fn from(err: crate::ports::IdentityError) -> Self {
        tracing::error!(error = %err, "User directory failure");
        DomainError::Internal(err.to_string())
    }
}

impl From<crate::ports::RateLimitError> for DomainError {
    fn from(err: crate::ports::RateLimitError) -> Self {
        tracing::error!(error = %err, "Rate limiter failure");
        DomainError::Internal(err.to_string())
    }
}
