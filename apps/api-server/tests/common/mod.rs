//! Shared fixtures for the server integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::json;
use uuid::Uuid;

use api_server::config::SiteConfig;
use api_server::state::AppState;
use chirp_core::domain::{DirectoryUser, Post};
use chirp_core::ports::BaseRepository;
use chirp_infra::{
    InMemoryDirectory, InMemoryPostRepository, InMemoryRateLimiter, JwtConfig,
    JwtSessionVerifier, RateLimitConfig, SessionKey,
};

pub const SECRET: &str = "integration-test-secret";

pub struct Fixture {
    pub state: AppState,
    pub posts: Arc<InMemoryPostRepository>,
}

pub fn user(id: &str, username: &str) -> DirectoryUser {
    DirectoryUser::new(id, Some(username), format!("https://img.test/{id}.png"))
}

/// State backed by in-memory adapters, with `alice` and `bob` in the directory.
pub fn fixture() -> Fixture {
    let posts = Arc::new(InMemoryPostRepository::new());
    let directory = InMemoryDirectory::with_users(vec![
        user("user_alice", "alice"),
        user("user_bob", "bob"),
    ]);
    let verifier = JwtSessionVerifier::new(JwtConfig {
        key: SessionKey::Secret(SECRET.to_string()),
        issuer: None,
        leeway_secs: 0,
    })
    .unwrap();

    let state = AppState::from_parts(
        posts.clone(),
        Arc::new(directory),
        Arc::new(InMemoryRateLimiter::new(RateLimitConfig::default())),
        Arc::new(verifier),
        SiteConfig {
            sign_in_url: "https://accounts.test/sign-in".to_string(),
        },
    );

    Fixture { state, posts }
}

pub fn token_for(user_id: &str) -> String {
    let claims = json!({
        "sub": user_id,
        "sid": "sess_test",
        "exp": Utc::now().timestamp() + 3600,
    });
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap()
}

pub fn expired_token_for(user_id: &str) -> String {
    let claims = json!({ "sub": user_id, "exp": Utc::now().timestamp() - 3600 });
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap()
}

pub async fn seed_post(
    repo: &InMemoryPostRepository,
    author_id: &str,
    content: &str,
    created_at: DateTime<Utc>,
) -> Post {
    let post = Post {
        id: Uuid::new_v4(),
        author_id: author_id.to_string(),
        content: content.to_string(),
        created_at,
    };
    repo.save(post).await.unwrap()
}
