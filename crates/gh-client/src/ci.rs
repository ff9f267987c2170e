//! CI verdict derivation
//!
//! Collapses the two CI signal sources GitHub offers for a commit, check
//! suites (Checks API) and status contexts (Status API), into one
//! [`CiVerdict`].

use crate::client::GitHubClient;
use crate::types::{CheckConclusion, CheckState, CheckSuite, CheckSuiteStatus, CiVerdict, StatusContext};
use log::{debug, warn};

/// Derive the verdict for a commit from its check suites and status contexts.
///
/// Queued suites are ignored. The first suite that is neither queued nor
/// completed makes the verdict pending and stops the suite scan. Completed
/// suites pass with a `success`, `neutral` or `skipped` conclusion.
/// Any non-success status context fails the verdict, a pending one also
/// makes it incomplete.
///
/// A commit without any signal is considered passing.
pub fn derive_verdict(suites: &[CheckSuite], statuses: &[StatusContext]) -> CiVerdict {
    let mut all_completed = true;
    let mut all_success = true;

    for suite in suites {
        match suite.status {
            CheckSuiteStatus::Queued => continue,
            CheckSuiteStatus::Completed => {
                let passed = matches!(
                    suite.conclusion,
                    Some(CheckConclusion::Success | CheckConclusion::Neutral | CheckConclusion::Skipped)
                );
                if !passed {
                    all_success = false;
                }
            }
            _ => {
                all_completed = false;
                break;
            }
        }
    }

    for status in statuses {
        if status.state != CheckState::Success {
            all_success = false;
        }
        if status.state == CheckState::Pending {
            all_completed = false;
        }
    }

    match (all_completed, all_success) {
        (false, _) => CiVerdict::Pending,
        (true, true) => CiVerdict::Success,
        (true, false) => CiVerdict::Failure,
    }
}

/// Fetch both CI signal sources for a commit and derive the verdict.
///
/// Both sources are fetched concurrently. If only one of them fails it is
/// treated as empty; an error is returned only if both fail.
pub async fn fetch_verdict<C>(
    client: &C,
    owner: &str,
    repo: &str,
    commit_sha: &str,
) -> anyhow::Result<CiVerdict>
where
    C: GitHubClient + ?Sized,
{
    let (suites, status) = tokio::join!(
        client.fetch_check_suites(owner, repo, commit_sha),
        client.fetch_combined_status(owner, repo, commit_sha),
    );

    let (suites, statuses) = match (suites, status) {
        (Err(suites_err), Err(status_err)) => {
            return Err(anyhow::anyhow!(
                "check suites: {:#}; combined status: {:#}",
                suites_err,
                status_err
            ));
        }
        (suites, status) => {
            let suites = suites.unwrap_or_else(|e| {
                warn!("Check suites unavailable for {}/{}@{}: {:#}", owner, repo, commit_sha, e);
                Vec::new()
            });
            let statuses = status.map(|s| s.statuses).unwrap_or_else(|e| {
                warn!("Combined status unavailable for {}/{}@{}: {:#}", owner, repo, commit_sha, e);
                Vec::new()
            });
            (suites, statuses)
        }
    };

    let verdict = derive_verdict(&suites, &statuses);
    debug!(
        "CI verdict for {}/{}@{}: {} ({} suites, {} statuses)",
        owner,
        repo,
        commit_sha,
        verdict,
        suites.len(),
        statuses.len()
    );
    Ok(verdict)
}
