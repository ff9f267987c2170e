//! PR discovery
//!
//! Turns the command line scope into a search query and converts the search
//! results into domain PRs.

use crate::domain_models::Pr;
use gh_client::{GitHubClient, SearchQuery};
use log::{info, warn};

/// Where and what to search
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scope {
    pub owner: Option<String>,
    pub repos: Vec<String>,
    pub label: Option<String>,
    pub author: Option<String>,
    pub review_requested: bool,
    pub include_archived: bool,
    pub limit: usize,
}

impl Scope {
    /// Fill in defaults: configured repos when nothing was given,
    /// otherwise the authenticated user's repositories.
    pub fn resolve(mut self, configured_repos: &[String]) -> Self {
        self.repos = clean_repos(&self.repos);
        if self.repos.is_empty() && self.owner.is_none() {
            self.repos = clean_repos(configured_repos);
        }
        if self.repos.is_empty() && self.owner.is_none() {
            self.owner = Some("@me".to_string());
        }
        self
    }

    pub fn to_query(&self) -> SearchQuery {
        SearchQuery {
            owner: self.owner.clone(),
            repos: self.repos.clone(),
            label: self.label.clone(),
            author: self.author.clone(),
            review_requested: self.review_requested,
            include_archived: self.include_archived,
            limit: self.limit,
        }
    }
}

/// Split comma separated entries, trim and drop empties
pub fn clean_repos(repos: &[String]) -> Vec<String> {
    repos
        .iter()
        .flat_map(|entry| entry.split(','))
        .map(str::trim)
        .filter(|repo| !repo.is_empty())
        .map(str::to_string)
        .collect()
}

/// Map a bot name to its author login
pub fn bot_author(bot: &str) -> Option<String> {
    match bot.to_lowercase().as_str() {
        "dependabot" => Some("dependabot[bot]".to_string()),
        "renovate" => Some("renovate[bot]".to_string()),
        _ => None,
    }
}

/// Search open PRs in scope
///
/// Transport errors are returned as-is, the caller aborts on them.
pub async fn discover(client: &dyn GitHubClient, scope: &Scope) -> anyhow::Result<Vec<Pr>> {
    let query = scope.to_query();
    let summaries = client.search_pull_requests(&query).await?;

    let prs: Vec<Pr> = summaries
        .into_iter()
        .filter_map(|summary| {
            let number = summary.number;
            Pr::from_summary(summary)
                .map_err(|e| warn!("Skipping #{}: {}", number, e))
                .ok()
        })
        .collect();

    info!("Discovered {} PRs", prs.len());
    Ok(prs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockClient;
    use gh_client::PullRequestSummary;

    #[test]
    fn test_clean_repos() {
        let repos = vec!["a/b, c/d".to_string(), " ".to_string(), "e/f".to_string()];
        assert_eq!(clean_repos(&repos), vec!["a/b", "c/d", "e/f"]);
    }

    #[test]
    fn test_scope_defaults_to_me() {
        let scope = Scope::default().resolve(&[]);
        assert_eq!(scope.owner.as_deref(), Some("@me"));
        assert!(scope.repos.is_empty());
    }

    #[test]
    fn test_scope_uses_configured_repos() {
        let scope = Scope::default().resolve(&["x/y".to_string()]);
        assert_eq!(scope.repos, vec!["x/y"]);
        assert!(scope.owner.is_none());
    }

    #[test]
    fn test_scope_explicit_owner_wins() {
        let scope = Scope {
            owner: Some("acme".to_string()),
            ..Default::default()
        }
        .resolve(&["x/y".to_string()]);
        assert_eq!(scope.owner.as_deref(), Some("acme"));
        assert!(scope.repos.is_empty());
    }

    #[test]
    fn test_bot_author() {
        assert_eq!(bot_author("Renovate").as_deref(), Some("renovate[bot]"));
        assert_eq!(bot_author("dependabot").as_deref(), Some("dependabot[bot]"));
        assert_eq!(bot_author("greenkeeper"), None);
    }

    #[tokio::test]
    async fn test_discover_converts_results() {
        let mock = MockClient::new().with_search_results(vec![
            PullRequestSummary {
                repository: "a/b".to_string(),
                number: 1,
                title: "Bump x from 1.0 to 1.1".to_string(),
                author: "dependabot[bot]".to_string(),
                html_url: "https://github.com/a/b/pull/1".to_string(),
            },
            PullRequestSummary {
                repository: "broken".to_string(),
                number: 2,
                title: "Bump y from 1.0 to 1.1".to_string(),
                author: "dependabot[bot]".to_string(),
                html_url: "https://github.com/broken/pull/2".to_string(),
            },
        ]);
        let scope = Scope {
            limit: 10,
            ..Default::default()
        };

        let prs = discover(&mock, &scope).await.unwrap();
        assert_eq!(prs.len(), 1);
        assert_eq!(prs[0].repo.to_string(), "a/b");
    }

    #[tokio::test]
    async fn test_discover_propagates_transport_errors() {
        let mock = MockClient::new().fail_search();
        assert!(discover(&mock, &Scope::default()).await.is_err());
    }
}
