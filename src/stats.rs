use crate::schema::RawApiResponse;

/// Normalized snapshot of one user's statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsCard {
    pub total_stars: u64,
    pub total_commits: u64,
    pub total_prs: u64,
    pub total_issues: u64,
    pub contributed_to: u64,
    pub total_contributions: u64,
}

/// Reduce a raw payload to a `StatsCard`.
///
/// Stars are summed over the repository nodes the query returned (at most
/// 100), so users with more repositories are undercounted. A payload without
/// a user record reduces to all zeros; the client never hands one out.
pub fn reduce(raw: &RawApiResponse) -> StatsCard {
    let Some(user) = raw.user() else {
        return StatsCard::default();
    };

    let total_stars = user
        .repositories
        .nodes
        .iter()
        .fold(0u64, |acc, n| acc.saturating_add(n.stargazer_count));

    let cc = &user.contributions_collection;
    StatsCard {
        total_stars,
        total_commits: cc.total_commit_contributions,
        total_prs: cc.total_pull_request_contributions,
        total_issues: cc.total_issue_contributions,
        contributed_to: user.repositories_contributed_to.total_count,
        total_contributions: cc.contribution_calendar.total_contributions,
    }
}
