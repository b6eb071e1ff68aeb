use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use log::debug;
use reqwest::header::{CONTENT_TYPE, HeaderMap, USER_AGENT};
use reqwest::{Client, Response};
use tokio_util::sync::CancellationToken;

use crate::config::Credentials;
use crate::error::FetchError;
use crate::schema::RawApiResponse;

pub const DEFAULT_ENDPOINT: &str = "https://api.github.com/graphql";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const RATE_LIMIT_REMAINING: &str = "x-ratelimit-remaining";
const RATE_LIMIT_RESET: &str = "x-ratelimit-reset";
const AGENT: &str = "stats-card";

/// Something that can make one attempt at fetching a user's raw statistics.
///
/// Implementations perform at most one round trip per call and never retry.
pub trait StatsSource {
    fn fetch(
        &self,
        credentials: &Credentials,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Result<RawApiResponse, FetchError>> + Send;
}

#[derive(Clone)]
pub struct GithubClient {
    endpoint: Arc<String>,
    // `Client` is reference-counted internally; clones share one pool.
    http: Client,
}

impl GithubClient {
    /// Create a GraphQL client for `endpoint`; each call is bounded by `timeout`.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(FetchError::Transport)?;
        Ok(Self {
            endpoint: Arc::new(endpoint.into()),
            http,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// One POST to the endpoint, classified into a `RawApiResponse` or a `FetchError`.
    async fn graphql(&self, token: &str, query: &str) -> Result<RawApiResponse, FetchError> {
        let resp = self
            .http
            .post(self.endpoint.as_str())
            .bearer_auth(token)
            .header(USER_AGENT, AGENT)
            .header(CONTENT_TYPE, "application/json")
            .json(&serde_json::json!({ "query": query }))
            .send()
            .await
            .map_err(FetchError::Transport)?;

        classify(resp).await
    }
}

impl StatsSource for GithubClient {
    async fn fetch(
        &self,
        credentials: &Credentials,
        cancel: &CancellationToken,
    ) -> Result<RawApiResponse, FetchError> {
        let query = stats_query(credentials.username());
        debug!(
            "POST {} for user {}",
            self.endpoint,
            credentials.username()
        );

        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(FetchError::Cancelled),
            result = self.graphql(credentials.token(), &query) => result,
        }
    }
}

/// GraphQL text for the single stats query.
///
/// The login is embedded as a JSON string literal, which is also a valid
/// GraphQL string literal, so quotes in it cannot break out of the argument.
pub fn stats_query(username: &str) -> String {
    let login = serde_json::Value::from(username).to_string();
    format!(
        r#"{{
    user(login: {login}) {{
        contributionsCollection {{
            totalCommitContributions
            totalIssueContributions
            totalPullRequestContributions
            contributionCalendar {{
                totalContributions
            }}
        }}
        repositoriesContributedTo(first: 1, contributionTypes: [COMMIT, ISSUE, PULL_REQUEST]) {{
            totalCount
        }}
        repositories(first: 100, ownerAffiliations: OWNER) {{
            nodes {{
                stargazerCount
            }}
        }}
    }}
}}"#
    )
}

async fn classify(resp: Response) -> Result<RawApiResponse, FetchError> {
    let status = resp.status();
    let headers = resp.headers().clone();

    // Read the body even for non-2xx so the error carries it.
    let body = resp.text().await.map_err(FetchError::Transport)?;

    if let Some(reset_time) = rate_limit_exhausted(&headers) {
        return Err(FetchError::RateLimited { reset_time });
    }

    if !status.is_success() {
        return Err(FetchError::HttpStatus {
            code: status.as_u16(),
            body,
        });
    }

    parse_body(&body)
}

/// `Some(reset)` when the remaining-quota header reads zero.
fn rate_limit_exhausted(headers: &HeaderMap) -> Option<String> {
    let remaining = headers.get(RATE_LIMIT_REMAINING)?.to_str().ok()?;
    if remaining.trim().parse::<u64>().ok()? != 0 {
        return None;
    }

    let reset = headers
        .get(RATE_LIMIT_RESET)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    Some(reset)
}

/// Decode a 2xx body and reject GraphQL-level failures.
fn parse_body(body: &str) -> Result<RawApiResponse, FetchError> {
    let raw: RawApiResponse =
        serde_json::from_str(body).map_err(|e| FetchError::Schema(e.to_string()))?;

    let messages = raw.error_messages();
    if !messages.is_empty() {
        return Err(FetchError::GraphQl {
            messages,
            kinds: raw.error_kinds(),
        });
    }

    if raw.user().is_none() {
        return Err(FetchError::Schema(
            "response carried no user record".to_string(),
        ));
    }

    Ok(raw)
}
