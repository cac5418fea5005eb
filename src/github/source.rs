use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Event, GitHubUser, Repository};

/// Where the analyzer gets a user's profile, repositories and events from.
#[async_trait]
pub trait ProfileSource: Send + Sync {
    async fn fetch_user(&self, username: &str) -> Result<GitHubUser>;

    /// Every repository of the user, most recently updated first.
    async fn fetch_repos(&self, username: &str) -> Result<Vec<Repository>>;

    async fn fetch_events(&self, username: &str) -> Result<Vec<Event>>;
}
