//! Publish request and pull request types.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Everything the publisher needs to turn a working copy into a pull request.
///
/// Constructed by the coordinator once feedback is approved (or the
/// iteration budget is exhausted under the publish-on-exhaustion policy).
#[derive(Debug, Clone)]
pub struct PublishRequest {
    /// HTTPS clone URL of the repository.
    pub repo_url: String,
    /// `owner/name` slug for the hosted-API call.
    pub repo_slug: String,
    /// Directory the repository is (or will be) cloned into.
    pub work_dir: PathBuf,
    /// Branch carrying the generated docs; embeds a generation timestamp.
    pub branch_name: String,
    pub commit_message: String,
    pub pr_title: String,
    pub pr_description: String,
    /// Integration branch the pull request targets.
    pub target_branch: String,
}

impl PublishRequest {
    /// Branch name with a UTC generation timestamp so concurrent runs
    /// never collide.
    pub fn timestamped_branch(now: chrono::DateTime<chrono::Utc>) -> String {
        format!("docs/update-{}", now.format("%Y%m%d-%H%M%S"))
    }

    /// Derive the `owner/name` slug from an HTTPS GitHub URL.
    pub fn slug_from_url(repo_url: &str) -> Option<String> {
        let trimmed = repo_url
            .trim_end_matches('/')
            .trim_end_matches(".git");
        let after_host = trimmed.split_once("github.com/")?.1;
        let mut parts = after_host.splitn(2, '/');
        let owner = parts.next()?;
        let name = parts.next()?;
        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return None;
        }
        Some(format!("{owner}/{name}"))
    }
}

/// Public identity of an opened pull request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PullRequestInfo {
    /// Browser URL of the pull request.
    pub url: String,
    /// Numeric identifier within the repository.
    pub number: u64,
    /// `open` or `closed` as reported by the API.
    pub state: String,
}
