//! In-memory user directory for development and tests.

use std::path::Path;

use async_trait::async_trait;
use tokio::sync::RwLock;

use chirp_core::domain::DirectoryUser;
use chirp_core::ports::{IdentityError, IdentityLookup};

/// Directory held in process memory.
#[derive(Default)]
pub struct InMemoryDirectory {
    users: RwLock<Vec<DirectoryUser>>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users(users: Vec<DirectoryUser>) -> Self {
        Self {
            users: RwLock::new(users),
        }
    }

    /// Load users from a JSON array of directory records.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, IdentityError> {
        let raw = std::fs::read_to_string(path.as_ref())
            .map_err(|e| IdentityError::Request(e.to_string()))?;
        let users: Vec<DirectoryUser> =
            serde_json::from_str(&raw).map_err(|e| IdentityError::Decode(e.to_string()))?;
        tracing::info!(count = users.len(), "Seeded in-memory directory");
        Ok(Self::with_users(users))
    }

    /// Add or replace a user.
    pub async fn upsert(&self, user: DirectoryUser) {
        let mut users = self.users.write().await;
        users.retain(|u| u.id != user.id);
        users.push(user);
    }
}

#[async_trait]
impl IdentityLookup for InMemoryDirectory {
    async fn users_by_ids(
        &self,
        ids: &[String],
        limit: usize,
    ) -> Result<Vec<DirectoryUser>, IdentityError> {
        let users = self.users.read().await;
        Ok(users
            .iter()
            .filter(|u| ids.contains(&u.id))
            .take(limit)
            .cloned()
            .collect())
    }

    async fn users_by_usernames(
        &self,
        usernames: &[String],
    ) -> Result<Vec<DirectoryUser>, IdentityError> {
        let users = self.users.read().await;
        Ok(users
            .iter()
            .filter(|u| u.username.as_ref().is_some_and(|n| usernames.contains(n)))
            .cloned()
            .collect())
    }
}
