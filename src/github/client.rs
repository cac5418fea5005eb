use async_trait::async_trait;
use reqwest::{header, Client, Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::github::paginator::Paginator;
use crate::github::source::ProfileSource;
use crate::models::{Event, GitHubUser, Repository};

/// Owns the connection pool for one analysis. Dropping the client releases it.
pub struct GitHubClient {
    client: Client,
    base_url: String,
}

impl GitHubClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        if let Some(token) = config.token.as_deref() {
            let mut value = header::HeaderValue::from_str(&format!("Bearer {}", token))?;
            value.set_sensitive(true);
            headers.insert(header::AUTHORIZATION, value);
        }
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            header::HeaderValue::from_static("2022-11-28"),
        );
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static(concat!("gitanalytics/", env!("CARGO_PKG_VERSION"))),
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub async fn get_user(&self, username: &str) -> Result<GitHubUser> {
        let url = self.user_url(username, "");
        tracing::info!("Fetching user: {}", username);

        let response = self.client.get(&url).send().await?;
        decode_response(response, &url).await
    }

    pub async fn get_user_repos(&self, username: &str) -> Result<Vec<Repository>> {
        let url = self.user_url(username, "/repos");
        tracing::info!("Fetching repositories for: {}", username);
        Paginator::new(&self.client)
            .fetch_all(&url, &[("sort", "updated")])
            .await
    }

    pub async fn get_user_events(&self, username: &str) -> Result<Vec<Event>> {
        let url = self.user_url(username, "/events");
        tracing::info!("Fetching public events for: {}", username);
        Paginator::new(&self.client).fetch_all(&url, &[]).await
    }

    /// `{base}/users/{username}{suffix}` with the username escaped as a single
    /// path segment.
    fn user_url(&self, username: &str, suffix: &str) -> String {
        format!(
            "{}/users/{}{}",
            self.base_url,
            urlencoding::encode(username),
            suffix
        )
    }
}

#[async_trait]
impl ProfileSource for GitHubClient {
    async fn fetch_user(&self, username: &str) -> Result<GitHubUser> {
        self.get_user(username).await
    }

    async fn fetch_repos(&self, username: &str) -> Result<Vec<Repository>> {
        self.get_user_repos(username).await
    }

    async fn fetch_events(&self, username: &str) -> Result<Vec<Event>> {
        self.get_user_events(username).await
    }
}

/// Maps status codes onto [`Error`] and parses the JSON body.
pub(crate) async fn decode_response<T: DeserializeOwned>(response: Response, url: &str) -> Result<T> {
    let status = response.status();

    if status == StatusCode::FORBIDDEN {
        tracing::warn!("GitHub returned 403 for {}", url);
        return Err(Error::AuthOrRateLimited);
    }

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(Error::GitHubApi(format!(
            "Request to {} failed: {} - {}",
            url, status, body
        )));
    }

    let body = response.text().await?;
    serde_json::from_str(&body)
        .map_err(|e| Error::MalformedResponse(format!("{}: {}", url, e)))
}
