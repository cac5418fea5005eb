use crate::error::{Error, Result};
use std::env;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct Config {
    pub github_token: Option<String>,
    pub api_url: String,
    pub timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let github_token = lookup("GITHUB_TOKEN")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        let api_url = lookup("GITHUB_API_URL")
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        if !api_url.starts_with("http://") && !api_url.starts_with("https://") {
            return Err(Error::Config(format!(
                "GITHUB_API_URL must be an http(s) URL, got '{}'",
                api_url
            )));
        }

        let timeout_secs = lookup("GITHUB_TIMEOUT_SECS")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Ok(Self {
            github_token,
            api_url,
            timeout_secs,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            github_token: None,
            api_url: DEFAULT_API_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Settings consumed by [`crate::github::GitHubClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub token: Option<String>,
    pub base_url: String,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn with_token(mut self, token: Option<&str>) -> Self {
        self.token = token
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string);
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for ClientConfig {
    fn from(config: &Config) -> Self {
        Self {
            token: config.github_token.clone(),
            base_url: config.api_url.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.github_token, None);
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_reads_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("GITHUB_TOKEN", "ghp_abc"),
            ("GITHUB_API_URL", "http://localhost:8080/"),
            ("GITHUB_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();
        assert_eq!(config.github_token.as_deref(), Some("ghp_abc"));
        assert_eq!(config.api_url, "http://localhost:8080");
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn test_blank_token_is_absent() {
        let config = Config::from_lookup(lookup_from(&[("GITHUB_TOKEN", "  ")])).unwrap();
        assert!(config.github_token.is_none());
    }

    #[test]
    fn test_bad_timeout_falls_back() {
        let config =
            Config::from_lookup(lookup_from(&[("GITHUB_TIMEOUT_SECS", "soon")])).unwrap();
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_rejects_non_http_url() {
        let err = Config::from_lookup(lookup_from(&[("GITHUB_API_URL", "ftp://x")])).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_client_config_token_override() {
        let config = Config::from_lookup(lookup_from(&[("GITHUB_TOKEN", "env")])).unwrap();
        let client = ClientConfig::from(&config);
        assert_eq!(client.token.as_deref(), Some("env"));
        assert_eq!(client.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));

        let client = client.with_token(Some("cli"));
        assert_eq!(client.token.as_deref(), Some("cli"));

        let client = client.with_token(None);
        assert!(client.token.is_none());
    }
}
