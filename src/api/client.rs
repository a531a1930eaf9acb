//! GitHub REST API client.
//!
//! Read-only access to the three endpoints the blog needs: the issue
//! listing, a single issue and an issue's comments. Failures are returned as
//! typed [`ApiError`]s; turning them into user-facing notices is the
//! gateway's job.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client, Response, StatusCode};
use tracing::{debug, instrument, warn};

use super::auth::Token;
use super::error::{ApiError, Result};
use super::gateway::IssueSource;
use super::types::{Comment, Issue, IssueQuery, RepoRef};

/// Default GitHub API base URL.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// GitHub REST API version header value.
const API_VERSION: &str = "2022-11-28";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// The GitHub API client.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    /// The HTTP client.
    client: Client,
    /// API base URL without a trailing slash.
    base_url: String,
    /// Optional token; requests are anonymous without one.
    token: Option<Token>,
}

impl GitHubClient {
    /// Create a client for the given API base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: &str, token: Option<Token>) -> Result<Self> {
        let client = Self::build_http_client()?;
        Ok(Self {
            client,
            base_url: normalize_base_url(base_url),
            token,
        })
    }

    /// Build the HTTP client with GitHub's recommended default headers.
    fn build_http_client() -> Result<Client> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            header::HeaderValue::from_static(API_VERSION),
        );

        Client::builder()
            .user_agent(concat!("issue-blogger/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(ApiError::Network)
    }

    /// List one page of issues, newest first.
    ///
    /// Calls `GET /repos/{owner}/{repo}/issues`.
    #[instrument(skip(self), fields(repo = %query.repo, page = query.page))]
    pub async fn list_issues(&self, query: &IssueQuery) -> Result<Vec<Issue>> {
        let url = format!("{}/issues?{}", self.repo_url(&query.repo), query.query_string());
        let issues: Vec<Issue> = self.get(&url).await?;
        debug!("Fetched {} issues", issues.len());
        Ok(issues)
    }

    /// Get a single issue by number.
    ///
    /// Calls `GET /repos/{owner}/{repo}/issues/{number}`.
    #[instrument(skip(self))]
    pub async fn get_issue(&self, repo: &RepoRef, number: u64) -> Result<Issue> {
        let url = format!("{}/issues/{}", self.repo_url(repo), number);
        self.get(&url).await.map_err(|e| {
            if e.is_not_found() {
                ApiError::NotFound(format!("Issue {}#{} not found", repo, number))
            } else {
                e
            }
        })
    }

    /// List the comments on an issue in creation order.
    ///
    /// Calls `GET /repos/{owner}/{repo}/issues/{number}/comments`.
    #[instrument(skip(self))]
    pub async fn list_comments(&self, repo: &RepoRef, number: u64) -> Result<Vec<Comment>> {
        let url = format!("{}/issues/{}/comments", self.repo_url(repo), number);
        let comments: Vec<Comment> = self.get(&url).await?;
        debug!("Fetched {} comments", comments.len());
        Ok(comments)
    }

    /// `{base}/repos/{owner}/{repo}` with both segments percent-encoded, so
    /// user input can never change which endpoint is called.
    fn repo_url(&self, repo: &RepoRef) -> String {
        format!(
            "{}/repos/{}/{}",
            self.base_url,
            urlencoding::encode(&repo.owner),
            urlencoding::encode(&repo.repo)
        )
    }

    /// Perform a GET request. Failures are not retried.
    async fn get<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        let mut request = self.client.get(url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token.value());
        }

        let response = request.send().await?;
        self.handle_response(response).await
    }

    /// Handle the HTTP response, checking for errors and parsing JSON.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: Response,
    ) -> Result<T> {
        let status = response.status();
        let url = response.url().to_string();

        if status.is_success() {
            response
                .json::<T>()
                .await
                .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse response: {}", e)))
        } else {
            let error_body = response.text().await.unwrap_or_default();
            debug!("Error response body: {}", error_body);

            Err(Self::error_from_response(status, &url, &error_body))
        }
    }

    /// Create an appropriate error from an HTTP response.
    ///
    /// GitHub error bodies look like `{"message": "...", "documentation_url": "..."}`.
    fn error_from_response(status: StatusCode, url: &str, body: &str) -> ApiError {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|json| json.get("message")?.as_str().map(str::to_string))
            .filter(|m| !m.is_empty());

        match message {
            Some(message) => ApiError::from_status(status, &message),
            None => ApiError::from_status(status, url),
        }
    }
}

#[async_trait]
impl IssueSource for GitHubClient {
    async fn list_issues(&self, query: &IssueQuery) -> Result<Vec<Issue>> {
        GitHubClient::list_issues(self, query).await
    }

    async fn get_issue(&self, repo: &RepoRef, number: u64) -> Result<Issue> {
        GitHubClient::get_issue(self, repo, number).await
    }

    async fn list_comments(&self, repo: &RepoRef, number: u64) -> Result<Vec<Comment>> {
        GitHubClient::list_comments(self, repo, number).await
    }
}

/// Normalize the base URL by removing trailing slashes.
fn normalize_base_url(url: &str) -> String {
    let url = url.trim().trim_end_matches('/');

    if !url.starts_with("https://") && !url.contains("localhost") && !url.contains("127.0.0.1") {
        warn!("API URL does not use HTTPS: {}", url);
    }

    url.to_string()
}
