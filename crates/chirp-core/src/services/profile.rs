//! Profile procedures.

use std::sync::Arc;

use crate::domain::AuthorView;
use crate::error::DomainError;
use crate::ports::IdentityLookup;

/// Looks up public profiles in the user directory.
#[derive(Clone)]
pub struct ProfileService {
    identity: Arc<dyn IdentityLookup>,
}

impl ProfileService {
    pub fn new(identity: Arc<dyn IdentityLookup>) -> Self {
        Self { identity }
    }

    pub async fn get_user_by_username(&self, username: &str) -> Result<AuthorView, DomainError> {
        self.identity
            .users_by_usernames(&[username.to_string()])
            .await?
            .into_iter()
            .next()
            .map(AuthorView::from)
            .ok_or_else(|| DomainError::NotFound("User not found".to_string()))
    }
}
