use std::time::Duration;

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Outcome of a single failed API call.
///
/// The retry loop treats every variant except `Cancelled` as retryable,
/// including ones that cannot succeed on their own such as HTTP 401.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("network error sending GraphQL request: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("GitHub API returned HTTP {code}: {body}")]
    HttpStatus { code: u16, body: String },

    #[error("rate limit exceeded, resets at: {reset_time}")]
    RateLimited { reset_time: String },

    #[error("GraphQL reported errors: {}", graphql_summary(.messages, .kinds))]
    GraphQl {
        messages: Vec<String>,
        /// `type` values the API attached, if any.
        kinds: Vec<String>,
    },

    #[error("unexpected response body: {0}")]
    Schema(String),

    #[error("request cancelled")]
    Cancelled,
}

fn graphql_summary(messages: &[String], kinds: &[String]) -> String {
    let joined = messages.join("; ");
    if kinds.is_empty() {
        joined
    } else {
        format!("{joined} ({})", kinds.join(", "))
    }
}

impl FetchError {
    /// True for responses that will keep failing until the token changes.
    pub fn is_authorization_failure(&self) -> bool {
        matches!(self, FetchError::HttpStatus { code: 401 | 403, .. })
    }

    /// The rate-limit reset header read as a Unix timestamp, if it is one.
    pub fn reset_at(&self) -> Option<DateTime<Utc>> {
        match self {
            FetchError::RateLimited { reset_time } => reset_time
                .trim()
                .parse::<i64>()
                .ok()
                .and_then(|secs| DateTime::from_timestamp(secs, 0)),
            _ => None,
        }
    }
}

/// Terminal outcome of the retry loop.
#[derive(Debug, Error)]
pub enum RetryError {
    #[error("failed after {attempts} attempt(s) in {elapsed:?}, retry budget exhausted: {last_cause}")]
    BudgetExhausted {
        attempts: u32,
        elapsed: Duration,
        #[source]
        last_cause: FetchError,
    },

    #[error("cancelled after {attempts} attempt(s)")]
    Cancelled { attempts: u32 },
}

impl RetryError {
    pub fn last_cause(&self) -> Option<&FetchError> {
        match self {
            RetryError::BudgetExhausted { last_cause, .. } => Some(last_cause),
            RetryError::Cancelled { .. } => None,
        }
    }
}
