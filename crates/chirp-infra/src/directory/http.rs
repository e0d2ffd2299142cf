//! HTTP client for a Clerk-compatible Backend API user directory.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use chirp_core::domain::DirectoryUser;
use chirp_core::ports::{IdentityError, IdentityLookup, MAX_DIRECTORY_BATCH};

/// Directory API configuration.
#[derive(Debug, Clone)]
pub struct HttpDirectoryConfig {
    /// Base URL of the Backend API (e.g., https://api.clerk.com)
    pub base_url: String,
    /// Secret key sent as a bearer token
    pub secret_key: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl HttpDirectoryConfig {
    /// Load from `IDENTITY_*`. `None` when no secret key is set.
    pub fn from_env() -> Option<Self> {
        let secret_key = std::env::var("IDENTITY_SECRET_KEY").ok()?;
        Some(Self {
            base_url: std::env::var("IDENTITY_API_URL")
                .unwrap_or_else(|_| "https://api.clerk.com".to_string()),
            secret_key,
            timeout: Duration::from_secs(
                std::env::var("IDENTITY_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(10),
            ),
        })
    }
}

/// User object as the Backend API returns it.
#[derive(Debug, Deserialize)]
struct ApiUser {
    id: String,
    username: Option<String>,
    image_url: String,
    first_name: Option<String>,
    last_name: Option<String>,
    primary_email_address_id: Option<String>,
    /// Milliseconds since the Unix epoch.
    created_at: Option<i64>,
}

impl From<ApiUser> for DirectoryUser {
    fn from(user: ApiUser) -> Self {
        Self {
            id: user.id,
            username: user.username,
            image_url: user.image_url,
            first_name: user.first_name,
            last_name: user.last_name,
            primary_email_address_id: user.primary_email_address_id,
            created_at: user.created_at.and_then(DateTime::<Utc>::from_timestamp_millis),
        }
    }
}

/// Reads users from the identity provider over HTTPS.
pub struct HttpDirectory {
    client: reqwest::Client,
    config: HttpDirectoryConfig,
}

impl HttpDirectory {
    pub fn new(config: HttpDirectoryConfig) -> Result<Self, IdentityError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| IdentityError::Request(e.to_string()))?;

        tracing::info!(base_url = %config.base_url, "User directory client configured");

        Ok(Self { client, config })
    }

    /// Confirm the directory answers with our credentials.
    pub async fn probe(&self) -> Result<(), IdentityError> {
        self.list_users(vec![("limit", "1".to_string())]).await?;
        tracing::info!("User directory reachable");
        Ok(())
    }

    async fn list_users(
        &self,
        params: Vec<(&'static str, String)>,
    ) -> Result<Vec<DirectoryUser>, IdentityError> {
        let url = format!("{}/v1/users", self.config.base_url.trim_end_matches('/'));

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.config.secret_key)
            .query(&params)
            .send()
            .await
            .map_err(|e| IdentityError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(IdentityError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let users: Vec<ApiUser> = response
            .json()
            .await
            .map_err(|e| IdentityError::Decode(e.to_string()))?;

        Ok(users.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl IdentityLookup for HttpDirectory {
    async fn users_by_ids(
        &self,
        ids: &[String],
        limit: usize,
    ) -> Result<Vec<DirectoryUser>, IdentityError> {
        // An unfiltered listing would return the whole directory
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let limit = limit.clamp(1, MAX_DIRECTORY_BATCH);
        let mut params: Vec<(&'static str, String)> =
            ids.iter().map(|id| ("user_id", id.clone())).collect();
        params.push(("limit", limit.to_string()));

        tracing::debug!(ids = ids.len(), limit, "Fetching users by id");
        self.list_users(params).await
    }

    async fn users_by_usernames(
        &self,
        usernames: &[String],
    ) -> Result<Vec<DirectoryUser>, IdentityError> {
        if usernames.is_empty() {
            return Ok(Vec::new());
        }

        let params = usernames
            .iter()
            .map(|name| ("username", name.clone()))
            .collect();

        self.list_users(params).await
    }
}
