//! Typed mirror of the GraphQL response body.
//!
//! Only the fields the stats query asks for are modelled. Every count is a
//! named field with a fixed type, so a renamed or missing key fails decoding
//! instead of silently reading as zero.

use serde::Deserialize;

/// Response envelope: `{"data": {"user": {...}}, "errors": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawApiResponse {
    #[serde(default)]
    pub data: Option<ResponseData>,
    #[serde(default)]
    pub errors: Option<Vec<GraphQlErrorEntry>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ResponseData {
    #[serde(default)]
    pub user: Option<UserStats>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub contributions_collection: ContributionsCollection,
    pub repositories_contributed_to: CountObj,
    pub repositories: RepositoryConnection,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionsCollection {
    pub total_commit_contributions: u64,
    pub total_issue_contributions: u64,
    pub total_pull_request_contributions: u64,
    pub contribution_calendar: ContributionCalendar,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionCalendar {
    pub total_contributions: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountObj {
    pub total_count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RepositoryConnection {
    #[serde(default)]
    pub nodes: Vec<RepositoryNode>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryNode {
    pub stargazer_count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GraphQlErrorEntry {
    pub message: String,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

impl RawApiResponse {
    pub fn user(&self) -> Option<&UserStats> {
        self.data.as_ref().and_then(|d| d.user.as_ref())
    }

    /// Messages of the top-level `errors` list, verbatim; empty when absent or `[]`.
    pub fn error_messages(&self) -> Vec<String> {
        self.errors
            .iter()
            .flatten()
            .map(|e| e.message.clone())
            .collect()
    }

    /// Distinct `type` values of the error list, in first-seen order.
    pub fn error_kinds(&self) -> Vec<String> {
        let mut kinds: Vec<String> = Vec::new();
        for kind in self.errors.iter().flatten().filter_map(|e| e.kind.as_ref()) {
            if !kinds.contains(kind) {
                kinds.push(kind.clone());
            }
        }
        kinds
    }
}
