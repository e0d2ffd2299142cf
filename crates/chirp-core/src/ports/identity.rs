//! User directory port.

use async_trait::async_trait;

use crate::domain::DirectoryUser;

/// Largest id batch a single directory lookup may carry.
pub const MAX_DIRECTORY_BATCH: usize = 100;

/// Read access to the identity provider's user directory.
#[async_trait]
pub trait IdentityLookup: Send + Sync {
    /// Fetch the users whose ids are in `ids`, at most `limit` of them.
    /// Unknown ids are simply absent from the result.
    async fn users_by_ids(
        &self,
        ids: &[String],
        limit: usize,
    ) -> Result<Vec<DirectoryUser>, IdentityError>;

    /// Fetch the users whose username equals one of `usernames`.
    async fn users_by_usernames(
        &self,
        usernames: &[String],
    ) -> Result<Vec<DirectoryUser>, IdentityError>;
}

/// Directory errors.
#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error("Directory request failed: {0}")]
    Request(String),

    #[error("Directory returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed directory response: {0}")]
    Decode(String),
}
