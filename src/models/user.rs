use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::analytics::AnalyticsReport;
use super::de::null_as_default;

/// The `/users/{username}` resource, kept exactly as GitHub sent it.
///
/// Nothing in it is required; the accessors fall back to `None` or zero when
/// a field is missing, null or of an unexpected type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GitHubUser {
    fields: Map<String, Value>,
}

impl GitHubUser {
    pub fn login(&self) -> Option<&str> {
        self.str_field("login")
    }

    pub fn name(&self) -> Option<&str> {
        self.str_field("name")
    }

    pub fn bio(&self) -> Option<&str> {
        self.str_field("bio")
    }

    pub fn html_url(&self) -> Option<&str> {
        self.str_field("html_url")
    }

    pub fn public_repos(&self) -> u64 {
        self.count_field("public_repos")
    }

    pub fn followers(&self) -> u64 {
        self.count_field("followers")
    }

    pub fn following(&self) -> u64 {
        self.count_field("following")
    }

    /// Account creation time, if present and RFC 3339.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.str_field("created_at")
            .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
            .map(|t| t.with_timezone(&Utc))
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    fn count_field(&self, key: &str) -> u64 {
        self.fields.get(key).and_then(Value::as_u64).unwrap_or(0)
    }
}

/// One entry of `/users/{username}/repos`. `name` and `html_url` are the only
/// required fields; counters default to zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repository {
    pub name: String,
    pub html_url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub stargazers_count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub forks_count: u64,
    #[serde(default)]
    pub language: Option<String>,
}

impl Repository {
    /// Language as reported upstream, ignoring empty strings.
    pub fn declared_language(&self) -> Option<&str> {
        self.language.as_deref().filter(|l| !l.is_empty())
    }
}

/// Result of a full profile analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileAnalysis {
    pub user: GitHubUser,
    pub analytics: AnalyticsReport,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_repository_defaults() {
        let repo: Repository = serde_json::from_value(json!({
            "name": "r",
            "html_url": "https://github.com/o/r",
            "stargazers_count": null,
            "language": ""
        }))
        .unwrap();
        assert_eq!(repo.stargazers_count, 0);
        assert_eq!(repo.forks_count, 0);
        assert_eq!(repo.declared_language(), None);
    }

    #[test]
    fn test_repository_requires_url() {
        let result: std::result::Result<Repository, _> =
            serde_json::from_value(json!({ "name": "r" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_user_passes_through_unchanged() {
        let raw = json!({
            "login": "octocat",
            "type": "User",
            "name": null,
            "hireable": null,
            "plan": { "name": "free" }
        });
        let user: GitHubUser = serde_json::from_value(raw.clone()).unwrap();

        assert_eq!(serde_json::to_value(&user).unwrap(), raw);
        assert_eq!(user.login(), Some("octocat"));
        assert_eq!(user.name(), None);
        assert_eq!(user.followers(), 0);
    }

    #[test]
    fn test_user_without_login_is_accepted() {
        let user: GitHubUser = serde_json::from_value(json!({ "id": 1 })).unwrap();
        assert_eq!(user.login(), None);
        assert_eq!(user.get("id"), Some(&json!(1)));
    }

    #[test]
    fn test_user_created_at_is_lenient() {
        let user: GitHubUser = serde_json::from_value(json!({
            "login": "octocat",
            "created_at": "yesterday",
            "followers": "many"
        }))
        .unwrap();
        assert_eq!(user.created_at(), None);
        assert_eq!(user.followers(), 0);
        assert_eq!(
            serde_json::to_value(&user).unwrap()["created_at"],
            json!("yesterday")
        );

        let user: GitHubUser = serde_json::from_value(json!({
            "created_at": "2011-01-25T18:44:36Z",
            "public_repos": 8
        }))
        .unwrap();
        assert_eq!(
            user.created_at().map(|t| t.timestamp()),
            Some(1_295_981_076)
        );
        assert_eq!(user.public_repos(), 8);
    }

    #[test]
    fn test_user_must_be_an_object() {
        let result: std::result::Result<GitHubUser, _> = serde_json::from_value(json!([1, 2]));
        assert!(result.is_err());
    }
}
