//! Async client for the GitHub repository search endpoint.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::StatusCode;
use serde::Deserialize;

use crate::search::SearchRequest;
use crate::types::RepositoryRecord;

pub const DEFAULT_API_URL: &str = "https://api.github.com";

#[derive(Debug, thiserror::Error)]
pub enum GithubError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("GitHub rate limit exceeded; add a token to raise the limit")]
    RateLimited {
        /// Unix time at which the limit resets, from `x-ratelimit-reset`.
        reset_at: Option<i64>,
    },
    #[error("GitHub returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid token: {0}")]
    InvalidToken(#[from] reqwest::header::InvalidHeaderValue),
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<RepositoryRecord>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

#[derive(Debug, Clone)]
pub struct GithubClient {
    http: reqwest::Client,
    base_url: String,
}

impl GithubClient {
    /// Builds a client against `base_url` (normally [`DEFAULT_API_URL`]).
    ///
    /// The token, when present, is sent as a bearer token on every request.
    pub fn new(base_url: &str, token: Option<&str>) -> Result<Self, GithubError> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static("githubba"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        if let Some(token) = token.map(str::trim).filter(|t| !t.is_empty()) {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}"))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }
        let http = reqwest::Client::builder().default_headers(headers).build()?;
        Ok(Self { http, base_url: base_url.trim_end_matches('/').to_owned() })
    }

    /// Runs one search and returns its items in API order.
    pub async fn search(&self, request: &SearchRequest) -> Result<Vec<RepositoryRecord>, GithubError> {
        let url = format!("{}/search/repositories", self.base_url);
        tracing::debug!(query = %request.criteria.to_query(), page = request.page, "searching repositories");

        let response = self.http.get(&url).query(&request.query_pairs()).send().await?;
        let status = response.status();
        if status.is_success() {
            let body = response.bytes().await?;
            let parsed: SearchResponse = serde_json::from_slice(&body)?;
            return Ok(parsed.items);
        }

        let remaining = header_i64(response.headers(), "x-ratelimit-remaining");
        let reset_at = header_i64(response.headers(), "x-ratelimit-reset");
        let rate_limited = matches!(status, StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS)
            && remaining == Some(0);
        if rate_limited {
            tracing::warn!(?reset_at, "search rate limited");
            return Err(GithubError::RateLimited { reset_at });
        }

        let body = response.bytes().await.unwrap_or_default();
        let message = serde_json::from_slice::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.message)
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown error").to_owned());
        Err(GithubError::Status { status: status.as_u16(), message })
    }
}

fn header_i64(headers: &HeaderMap, name: &str) -> Option<i64> {
    headers.get(name)?.to_str().ok()?.trim().parse().ok()
}
