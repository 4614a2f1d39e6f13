//! Read-only access to the GitHub issues api
//!
//! Every call is a single GET with a fixed timeout. Failures are classified and returned, never
//! retried.
//!
//! A client is cheap to clone.
use std::{sync::Arc, time::Duration};

use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret as _, SecretString};
use serde::Deserialize as _;
use serde_json::Value;
use url::Url;

use crate::{
    error::{Result, SummarizerError},
    formatter,
};

use super::{
    models::{Comment, Issue},
    reference::IssueRef,
};

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// GitHub caps pages at 100 items. Only the first page of comments is fetched, longer
/// discussions are truncated.
pub const COMMENTS_PER_PAGE: u32 = 100;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct GithubClient {
    http: reqwest::Client,
    api_base: Arc<String>,
}

impl GithubClient {
    pub fn new(api_base: impl Into<String>, token: Option<&SecretString>) -> Result<Self> {
        Self::with_timeout(api_base, token, REQUEST_TIMEOUT)
    }

    /// Like [`GithubClient::new`], with a custom timeout per request
    pub fn with_timeout(
        api_base: impl Into<String>,
        token: Option<&SecretString>,
        timeout: Duration,
    ) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );

        if let Some(token) = token {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
                .map_err(|_| {
                    SummarizerError::Configuration(
                        "GITHUB_TOKEN contains characters that are not allowed in a header"
                            .to_string(),
                    )
                })?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()
            .map_err(SummarizerError::from_reqwest)?;

        Ok(Self {
            http,
            api_base: Arc::new(api_base.into()),
        })
    }

    /// Builds a client, authenticating with `GITHUB_TOKEN` if it is set
    ///
    /// Anonymous access works fine for public repositories, but is heavily rate limited.
    pub fn from_env(api_base: impl Into<String>) -> Result<Self> {
        let token = std::env::var("GITHUB_TOKEN")
            .ok()
            .filter(|token| !token.trim().is_empty())
            .map(SecretString::from);

        Self::new(api_base, token.as_ref())
    }

    /// Fetches the raw issue payload
    #[tracing::instrument(skip(self), fields(issue = %issue), err)]
    pub async fn fetch_issue(&self, issue: &IssueRef) -> Result<Value> {
        self.get_json(&issue.api_url(&self.api_base)).await
    }

    /// Fetches the first page of comments for a raw issue payload
    ///
    /// The url is taken verbatim from the `comments_url` of the issue.
    #[tracing::instrument(skip_all, err)]
    pub async fn fetch_comments(&self, issue: &Value) -> Result<Value> {
        let comments_url = issue
            .get("comments_url")
            .and_then(Value::as_str)
            .ok_or_else(|| SummarizerError::payload("GitHub", "issue has no `comments_url`"))?;

        let mut url = Url::parse(comments_url).map_err(|err| {
            SummarizerError::payload("GitHub", format!("invalid comments url {comments_url}: {err}"))
        })?;
        url.query_pairs_mut()
            .append_pair("per_page", &COMMENTS_PER_PAGE.to_string());

        self.get_json(url.as_str()).await
    }

    /// Fetches a GitHub issue and its comments
    #[tracing::instrument(skip(self), fields(issue = %issue), err)]
    pub async fn fetch_issue_with_comments(
        &self,
        issue: &IssueRef,
    ) -> Result<GithubIssueWithComments> {
        let raw_issue = self.fetch_issue(issue).await?;
        let raw_comments = self.fetch_comments(&raw_issue).await?;

        GithubIssueWithComments::from_raw(raw_issue, raw_comments)
    }

    async fn get_json(&self, url: &str) -> Result<Value> {
        tracing::debug!(url, "Requesting GitHub api");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(SummarizerError::from_reqwest)?;

        response.json::<Value>().await.map_err(|err| {
            if err.is_decode() {
                SummarizerError::payload("GitHub", format!("invalid json from {url}: {err}"))
            } else {
                SummarizerError::from_reqwest(err)
            }
        })
    }
}

/// A GitHub issue and its comments, both as received and parsed
#[derive(Debug, Clone)]
pub struct GithubIssueWithComments {
    pub raw_issue: Value,
    pub raw_comments: Value,
    pub issue: Issue,
    pub comments: Vec<Comment>,
}

impl GithubIssueWithComments {
    pub fn from_raw(raw_issue: Value, raw_comments: Value) -> Result<Self> {
        let issue = Issue::deserialize(&raw_issue)
            .map_err(|err| SummarizerError::payload("GitHub", format!("invalid issue: {err}")))?;
        let comments = Vec::<Comment>::deserialize(&raw_comments).map_err(|err| {
            SummarizerError::payload("GitHub", format!("invalid comments: {err}"))
        })?;

        Ok(Self {
            raw_issue,
            raw_comments,
            issue,
            comments,
        })
    }

    /// The issue as text for the LLM
    #[must_use]
    pub fn formatted_issue(&self) -> String {
        formatter::format_issue(&self.issue)
    }

    /// The comments as text for the LLM, empty if there are none
    #[must_use]
    pub fn formatted_comments(&self) -> String {
        formatter::format_comments(&self.comments)
    }

    /// The complete user input sent to the LLM
    #[must_use]
    pub fn user_input(&self) -> String {
        format!("{}\n{}", self.formatted_issue(), self.formatted_comments())
    }

    /// Link to the issue on github.com, if GitHub sent one
    #[must_use]
    pub fn html_url(&self) -> Option<&str> {
        self.issue.html_url.as_deref()
    }
}
