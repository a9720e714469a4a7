//! CompletionProvider trait and LLM integration.
//!
//! Provides an abstraction layer over rig-core to decouple the
//! codebase from the specific LLM library.

pub mod rig;

use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use thiserror::Error;

use crate::models::AgentDefinition;

/// Errors from the completion provider.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("LLM API error: {0}")]
    ApiError(String),

    #[error("failed to parse LLM response: {0}")]
    ParseError(String),

    #[error("provider not configured: {0}")]
    NotConfigured(String),
}

/// Trait for LLM-backed text completion.
///
/// Implementations handle client construction and prompting; response
/// parsing is left to the callers since the expected shape differs
/// between the generator and the reviewer.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Prompt the model as `agent` and return the raw response text.
    async fn complete(
        &self,
        agent: &AgentDefinition,
        prompt: &str,
    ) -> Result<String, ProviderError>;
}

/// Prompt a provider, retrying transient API errors with exponential backoff.
pub async fn complete_with_retry(
    provider: &dyn CompletionProvider,
    agent: &AgentDefinition,
    prompt: &str,
) -> Result<String, ProviderError> {
    let mut attempt = 0u32;
    loop {
        match provider.complete(agent, prompt).await {
            Ok(response) => return Ok(response),
            Err(e) if rig::is_retryable(&e) && attempt < rig::MAX_RETRIES => {
                let reason = rig::classify_error(&e).unwrap_or("Transient API error");
                let delay = rig::retry_backoff(attempt);
                eprintln!(
                    "Warning: {reason}, retrying in {}s (attempt {}/{})",
                    delay.as_secs(),
                    attempt + 1,
                    rig::MAX_RETRIES
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

/// Regex for extracting content inside markdown code fences.
///
/// The closing ``` must appear at the start of a line (`\n````) to avoid
/// matching triple-backticks embedded inside JSON string values (markdown
/// documents routinely contain fenced code examples).
static FENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```(?:json)?\s*\n(.*?)\n```").unwrap());

/// Extract candidate JSON strings from an LLM response.
///
/// Returns the trimmed response itself, a brace-delimited slice, plus any
/// content inside markdown code fences (```json ... ``` or ``` ... ```).
/// Callers try the candidates in order against their expected shape.
pub fn extract_json_candidates(text: &str) -> Vec<String> {
    let mut candidates = Vec::new();

    // First candidate: the raw text
    candidates.push(text.to_string());

    // Second: brace extraction, the most robust strategy when the response
    // contains nested code fences inside JSON string values.
    if let (Some(start), Some(end)) = (text.find('{'), text.rfind('}')) {
        if start < end {
            candidates.push(text[start..=end].to_string());
        }
    }

    // Third: extract content from markdown code fences.
    for cap in FENCE_RE.captures_iter(text) {
        if let Some(inner) = cap.get(1) {
            let inner_trimmed = inner.as_str().trim();
            if !inner_trimmed.is_empty() {
                candidates.push(inner_trimmed.to_string());
            }
        }
    }

    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidates_start_with_raw_text() {
        let candidates = extract_json_candidates("plain text");
        assert_eq!(candidates[0], "plain text");
    }

    #[test]
    fn candidates_include_brace_slice() {
        let candidates = extract_json_candidates("prose {\"k\": \"v\"} trailing");
        assert!(candidates.contains(&"{\"k\": \"v\"}".to_string()));
    }

    #[test]
    fn candidates_include_fenced_content() {
        let candidates = extract_json_candidates("```json\n{\"k\": \"v\"}\n```");
        assert!(candidates.contains(&"{\"k\": \"v\"}".to_string()));
    }

    #[test]
    fn fence_closing_must_start_a_line() {
        // A ``` inside a JSON string value must not close the fence.
        let text = "```json\n{\"k\": \"a ``` b\"}\n```";
        let candidates = extract_json_candidates(text);
        assert!(candidates.contains(&"{\"k\": \"a ``` b\"}".to_string()));
    }
}
