//! Hand-rolled port fakes for service tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{DirectoryUser, Post};
use crate::error::RepoError;
use crate::ports::{
    BaseRepository, IdentityError, IdentityLookup, PostOrder, PostQuery, PostRepository,
    RateLimitError, RateLimitResult, RateLimiter,
};

pub struct FakeDirectory {
    users: Vec<DirectoryUser>,
    id_calls: Mutex<Vec<Vec<String>>>,
}

impl FakeDirectory {
    pub fn with_users(ids: &[&str]) -> Self {
        let users = ids
            .iter()
            .map(|id| {
                let username = id.trim_start_matches("user_");
                DirectoryUser::new(*id, Some(username), format!("https://img.test/{}.png", id))
            })
            .collect();
        Self {
            users,
            id_calls: Mutex::new(Vec::new()),
        }
    }

    pub fn id_calls(&self) -> Vec<Vec<String>> {
        self.id_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl IdentityLookup for FakeDirectory {
    async fn users_by_ids(
        &self,
        ids: &[String],
        limit: usize,
    ) -> Result<Vec<DirectoryUser>, IdentityError> {
        self.id_calls.lock().unwrap().push(ids.to_vec());
        Ok(self
            .users
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
        Ok(self
            .users
            .iter()
            .filter(|u| {
                u.username
                    .as_ref()
                    .is_some_and(|name| usernames.contains(name))
            })
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct FakePosts {
    rows: Mutex<Vec<Post>>,
}

impl FakePosts {
    pub fn with_rows(rows: Vec<Post>) -> Self {
        Self {
            rows: Mutex::new(rows),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for FakePosts {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        Ok(self.rows.lock().unwrap().iter().find(|p| p.id == id).cloned())
    }

    async fn save(&self, entity: Post) -> Result<Post, RepoError> {
        self.rows.lock().unwrap().push(entity.clone());
        Ok(entity)
    }
}

#[async_trait]
impl PostRepository for FakePosts {
    async fn list(&self, query: PostQuery) -> Result<Vec<Post>, RepoError> {
        let mut rows: Vec<Post> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|p| query.author_id.as_ref().is_none_or(|a| &p.author_id == a))
            .cloned()
            .collect();
        rows.sort_by_key(|p| p.created_at);
        if query.order == PostOrder::CreatedAtDesc {
            rows.reverse();
        }
        if let Some(limit) = query.limit {
            rows.truncate(limit as usize);
        }
        Ok(rows)
    }
}

/// Counts permits per key; fails every call when `broken`.
pub struct FakeLimiter {
    max: u32,
    broken: bool,
    counts: Mutex<HashMap<String, u32>>,
}

impl FakeLimiter {
    pub fn new(max: u32) -> Self {
        Self {
            max,
            broken: false,
            counts: Mutex::new(HashMap::new()),
        }
    }

    pub fn broken() -> Self {
        Self {
            broken: true,
            ..Self::new(0)
        }
    }

    pub fn used(&self, key: &str) -> u32 {
        self.counts.lock().unwrap().get(key).copied().unwrap_or(0)
    }
}

#[async_trait]
impl RateLimiter for FakeLimiter {
    async fn check(&self, key: &str) -> Result<RateLimitResult, RateLimitError> {
        if self.broken {
            return Err(RateLimitError::Backend("connection refused".to_string()));
        }
        let mut counts = self.counts.lock().unwrap();
        let used = counts.entry(key.to_string()).or_insert(0);
        let success = *used < self.max;
        if success {
            *used += 1;
        }
        Ok(RateLimitResult {
            success,
            remaining: self.max.saturating_sub(*used),
            reset_after: Duration::from_secs(60),
        })
    }
}
