use crate::analysis::analytics::generate_analytics;
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::github::{GitHubClient, ProfileSource};
use crate::models::ProfileAnalysis;

pub struct AnalysisPipeline {
    config: ClientConfig,
}

impl AnalysisPipeline {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    /// Runs one analysis on a fresh [`GitHubClient`]. The client, and with it
    /// the connection pool, is dropped before this returns, whether the
    /// analysis succeeded or not.
    pub async fn analyze_user(&self, username: &str) -> Result<ProfileAnalysis> {
        let github = GitHubClient::new(&self.config)?;
        run_analysis(&github, username).await
    }
}

/// Analyzes `username` against api.github.com, authenticated only if a token is given.
pub async fn analyze_profile(username: &str, token: Option<&str>) -> Result<ProfileAnalysis> {
    let config = ClientConfig::default().with_token(token);
    AnalysisPipeline::new(config).analyze_user(username).await
}

/// Fetches user, repositories and events in that order, then reduces them.
/// The first failure is returned as-is and nothing after it is fetched.
pub async fn run_analysis<S>(source: &S, username: &str) -> Result<ProfileAnalysis>
where
    S: ProfileSource + ?Sized,
{
    let username = username.trim();
    if username.is_empty() {
        return Err(Error::InvalidInput("username is required".to_string()));
    }

    // Step 1: Fetch user profile
    tracing::info!("Fetching GitHub profile for: {}", username);
    let user = source.fetch_user(username).await?;

    // Step 2: Fetch all repositories
    let repos = source.fetch_repos(username).await?;
    tracing::info!("Found {} repositories", repos.len());

    // Step 3: Fetch all public events
    let events = source.fetch_events(username).await?;
    tracing::info!("Found {} public events", events.len());

    // Step 4: Reduce
    let analytics = generate_analytics(&repos, &events);
    tracing::info!(
        "Analysis complete: {} stars, {} forks, {} commits",
        analytics.total_stars,
        analytics.total_forks,
        analytics.total_commits
    );

    Ok(ProfileAnalysis { user, analytics })
}
