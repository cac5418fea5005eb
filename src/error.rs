use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// GitHub answers 403 both for exhausted rate limits and rejected tokens.
    #[error("GitHub rate limit exceeded or token rejected (HTTP 403)")]
    AuthOrRateLimited,

    #[error("GitHub API error: {0}")]
    GitHubApi(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn is_upstream(&self) -> bool {
        matches!(self, Error::GitHubApi(_) | Error::Network(_))
    }
}
