//! Pull request model

use super::Repository;
use gh_client::{CiVerdict, PullRequestSummary};
use serde::{Deserialize, Serialize};

/// A dependency update pull request
///
/// Created by discovery with repository, number, title, author and url.
/// `head_sha` and `ci` are filled by enrichment and refreshed by merge gating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pr {
    pub repo: Repository,
    pub number: u64,
    pub title: String,
    pub author: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head_sha: Option<String>,
    #[serde(default)]
    pub ci: CiVerdict,
}

impl Pr {
    #[cfg(test)]
    pub fn new(repo: Repository, number: u64, title: impl Into<String>) -> Self {
        let url = format!("https://github.com/{}/pull/{}", repo, number);
        Self {
            repo,
            number,
            title: title.into(),
            author: String::new(),
            url,
            head_sha: None,
            ci: CiVerdict::Unknown,
        }
    }

    /// Convert a search result, failing on a malformed repository name
    pub fn from_summary(summary: PullRequestSummary) -> Result<Self, String> {
        Ok(Self {
            repo: summary.repository.parse()?,
            number: summary.number,
            title: summary.title,
            author: summary.author,
            url: summary.html_url,
            head_sha: None,
            ci: CiVerdict::Unknown,
        })
    }

    /// Case-insensitive match on title, repository or number
    pub fn matches_query(&self, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        let query = query.to_lowercase();
        self.title.to_lowercase().contains(&query)
            || self.repo.to_string().to_lowercase().contains(&query)
            || self.number.to_string().contains(&query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_query() {
        let pr = Pr::new(Repository::new("acme", "Widgets"), 1234, "Bump Serde from 1.0 to 1.1");

        assert!(pr.matches_query(""));
        assert!(pr.matches_query("serde"));
        assert!(pr.matches_query("SERDE"));
        assert!(pr.matches_query("acme/widgets"));
        assert!(pr.matches_query("23"));
        assert!(!pr.matches_query("tokio"));
    }

    #[test]
    fn test_from_summary() {
        let pr = Pr::from_summary(PullRequestSummary {
            repository: "a/b".to_string(),
            number: 3,
            title: "t".to_string(),
            author: "dependabot[bot]".to_string(),
            html_url: "https://github.com/a/b/pull/3".to_string(),
        })
        .unwrap();

        assert_eq!(pr.repo, Repository::new("a", "b"));
        assert_eq!(pr.ci, CiVerdict::Unknown);
        assert!(pr.head_sha.is_none());
    }
}
