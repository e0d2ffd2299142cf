use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user record as held by the external identity provider.
///
/// Carries more than clients may see; convert to [`AuthorView`] before it
/// leaves the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryUser {
    pub id: String,
    pub username: Option<String>,
    pub image_url: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub primary_email_address_id: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl DirectoryUser {
    pub fn new(id: impl Into<String>, username: Option<&str>, image_url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            username: username.map(str::to_owned),
            image_url: image_url.into(),
            first_name: None,
            last_name: None,
            primary_email_address_id: None,
            created_at: None,
        }
    }
}

/// Client-safe projection of a directory user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorView {
    pub id: String,
    pub username: Option<String>,
    pub image_url: String,
}

impl From<DirectoryUser> for AuthorView {
    fn from(user: DirectoryUser) -> Self {
        Self {
            id: user.id,
            username: user.username,
            image_url: user.image_url,
        }
    }
}

impl From<&DirectoryUser> for AuthorView {
    fn from(user: &DirectoryUser) -> Self {
        Self {
            id: user.id.clone(),
            username: user.username.clone(),
            image_url: user.image_url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_author_view_drops_private_fields() {
        let mut user = DirectoryUser::new("user_1", Some("alice"), "https://img.example/a.png");
        user.first_name = Some("Alice".to_string());
        user.primary_email_address_id = Some("idn_1".to_string());

        let view = AuthorView::from(&user);
        let json = serde_json::to_value(&view).unwrap();
        let keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();

        assert_eq!(view.id, "user_1");
        assert_eq!(view.username.as_deref(), Some("alice"));
        assert_eq!(keys.len(), 3);
    }
}
