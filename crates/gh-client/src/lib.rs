//! GitHub API client for dependency pull request review
//!
//! This crate provides a trait-based GitHub API client plus the CI verdict
//! derivation that sits on top of it.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │              GitHubClient trait                  │
//! │  - search_pull_requests()                        │
//! │  - fetch_check_suites() / fetch_combined_status()│
//! │  - create_review() / merge_pull_request()        │
//! └─────────────────────────────────────────────────┘
//!                        │
//!        ┌───────────────┴───────────────┐
//!        ▼                               ▼
//! ┌─────────────────┐         ┌─────────────────────┐
//! │ OctocrabClient  │         │ ci::fetch_verdict   │
//! │ (direct API)    │◄────────│ (any GitHubClient)  │
//! └─────────────────┘         └─────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use gh_client::{ci, GitHubClient};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = gh_client::connect().await?;
//! let sha = client.fetch_head_sha("owner", "repo", 42).await?;
//! let verdict = ci::fetch_verdict(&client, "owner", "repo", &sha).await?;
//! println!("CI: {}", verdict);
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod ci;
pub mod client;
pub mod octocrab_client;
pub mod types;

pub use auth::{connect, TokenResolver, TokenSource};
pub use client::GitHubClient;
pub use octocrab_client::OctocrabClient;
pub use types::{
    CheckConclusion, CheckState, CheckSuite, CheckSuiteStatus, CiVerdict, CombinedStatus,
    MergeMethod, MergeResult, PullRequestSummary, ReviewEvent, SearchQuery, StatusContext,
};
