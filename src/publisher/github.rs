//! GitHub pull request API client.

use serde::Deserialize;

use crate::models::{PublishRequest, PullRequestInfo};
use crate::security::SecretStore;

use super::PublishError;

/// Fields of interest from the GitHub `POST /repos/{slug}/pulls` response.
#[derive(Deserialize)]
struct PullResponse {
    html_url: String,
    number: u64,
    state: String,
}

/// Open a pull request for a pushed branch.
///
/// Error bodies pass through the secret store before surfacing since the
/// API occasionally echoes request details back.
pub async fn open_pull_request(
    api_base: &str,
    token: &str,
    request: &PublishRequest,
    secrets: &SecretStore,
) -> Result<PullRequestInfo, PublishError> {
    let url = format!(
        "{}/repos/{}/pulls",
        api_base.trim_end_matches('/'),
        request.repo_slug
    );

    let payload = serde_json::json!({
        "title": request.pr_title,
        "body": request.pr_description,
        "head": request.branch_name,
        "base": request.target_branch,
    });

    let client = reqwest::Client::new();
    let response = client
        .post(&url)
        .header("Authorization", format!("token {token}"))
        .header("Accept", "application/vnd.github+json")
        .header("User-Agent", crate::constants::APP_NAME)
        .json(&payload)
        .send()
        .await
        .map_err(|e| PublishError::ApiError(secrets.redact(&e.to_string())))?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<no body>".to_string());
        return Err(PublishError::ApiError(secrets.redact(&format!(
            "pull request creation failed with HTTP {status}: {body}"
        ))));
    }

    let parsed: PullResponse = response
        .json()
        .await
        .map_err(|e| PublishError::ApiError(secrets.redact(&e.to_string())))?;

    Ok(PullRequestInfo {
        url: parsed.html_url,
        number: parsed.number,
        state: parsed.state,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pull_response_deserializes() {
        let body = r#"{
            "html_url": "https://github.com/o/r/pull/7",
            "number": 7,
            "state": "open",
            "title": "Add documentation"
        }"#;
        let parsed: PullResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.html_url, "https://github.com/o/r/pull/7");
        assert_eq!(parsed.number, 7);
        assert_eq!(parsed.state, "open");
    }
}
