use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReport {
    pub total_stars: u64,
    pub total_forks: u64,
    pub total_commits: u64,
    pub language_data: Vec<LanguageShare>,
    pub commit_data: Vec<MonthlyCommits>,
    pub repo_size_data: Vec<RepoSize>,
    pub recent_activity: Vec<ActivityEntry>,
    pub top_repos: Vec<TopRepo>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageShare {
    pub name: String,
    /// Number of repositories declaring this language.
    #[serde(rename = "value")]
    pub count: u64,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyCommits {
    /// `YYYY-MM`
    pub month: String,
    #[serde(rename = "commits")]
    pub commit_count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoSize {
    pub name: String,
    pub stars: u64,
    pub forks: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEntry {
    #[serde(rename = "type")]
    pub event_type: Option<String>,
    #[serde(rename = "repo")]
    pub repo_name: Option<String>,
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopRepo {
    pub name: String,
    pub stars: u64,
    pub url: String,
}
