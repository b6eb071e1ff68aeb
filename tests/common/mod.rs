//! In-process stand-in for the GitHub GraphQL endpoint.
//!
//! Serves a script of canned responses in order, then repeats the fallback,
//! and records every request it receives.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Router;
use axum::extract::State;
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use tokio::net::TcpListener;

pub const SUCCESS_BODY: &str = r#"{
    "data": {
        "user": {
            "contributionsCollection": {
                "totalCommitContributions": 100,
                "totalIssueContributions": 20,
                "totalPullRequestContributions": 30,
                "contributionCalendar": { "totalContributions": 200 }
            },
            "repositoriesContributedTo": { "totalCount": 15 },
            "repositories": {
                "nodes": [
                    {"stargazerCount": 10},
                    {"stargazerCount": 5}
                ]
            }
        }
    }
}"#;

#[derive(Clone, Debug)]
pub struct Canned {
    pub status: u16,
    pub headers: Vec<(&'static str, String)>,
    pub body: String,
    pub delay: Duration,
}

impl Canned {
    pub fn ok() -> Self {
        Self::status(200, SUCCESS_BODY)
    }

    pub fn status(status: u16, body: &str) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.to_string(),
            delay: Duration::ZERO,
        }
    }

    pub fn header(mut self, name: &'static str, value: &str) -> Self {
        self.headers.push((name, value.to_string()));
        self
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[derive(Clone, Debug)]
pub struct Recorded {
    pub authorization: Option<String>,
    pub user_agent: Option<String>,
    pub body: serde_json::Value,
}

#[derive(Default)]
struct Inner {
    script: VecDeque<Canned>,
    fallback: Option<Canned>,
    requests: Vec<Recorded>,
}

#[derive(Clone, Default)]
pub struct MockGithub {
    inner: Arc<Mutex<Inner>>,
}

impl MockGithub {
    pub fn new(script: Vec<Canned>) -> Self {
        let mock = Self::default();
        mock.inner.lock().unwrap().script = script.into();
        mock
    }

    /// Served once the script is used up.
    pub fn with_fallback(self, canned: Canned) -> Self {
        self.inner.lock().unwrap().fallback = Some(canned);
        self
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.inner.lock().unwrap().requests.clone()
    }

    /// Bind an ephemeral port and return the endpoint URL.
    pub async fn spawn(&self) -> String {
        let app = Router::new()
            .route("/graphql", post(graphql))
            .with_state(self.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{addr}/graphql")
    }
}

async fn graphql(State(mock): State<MockGithub>, headers: HeaderMap, body: String) -> Response {
    let canned = {
        let mut inner = mock.inner.lock().unwrap();
        inner.requests.push(Recorded {
            authorization: header_str(&headers, header::AUTHORIZATION),
            user_agent: header_str(&headers, header::USER_AGENT),
            body: serde_json::from_str(&body).unwrap_or(serde_json::Value::Null),
        });
        let next = inner.script.pop_front();
        next.or_else(|| inner.fallback.clone())
            .expect("mock endpoint ran out of responses")
    };

    if !canned.delay.is_zero() {
        tokio::time::sleep(canned.delay).await;
    }

    let status = StatusCode::from_u16(canned.status).unwrap();
    let mut resp = (status, canned.body).into_response();
    resp.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    for (name, value) in canned.headers {
        resp.headers_mut()
            .insert(name, HeaderValue::from_str(&value).unwrap());
    }
    resp
}

fn header_str(headers: &HeaderMap, name: header::HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// An address nothing is listening on.
pub fn closed_endpoint() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/graphql")
}
