//! Documentation reviewer.
//!
//! The structural checks are deterministic and decide approval on their
//! own: a document set is approved exactly when no critical issues are
//! found. An optional LLM pass contributes qualitative suggestions, which
//! are advisory and never block approval.

use indexmap::IndexMap;

use crate::models::{
    AgentDefinition, DocumentationSet, Issue, ReviewFeedback, Suggestion,
};
use crate::providers::{
    complete_with_retry, extract_json_candidates, CompletionProvider, ProviderError,
};
use crate::security::SecretStore;

/// Documents shorter than this earn a "too thin" suggestion.
const MIN_DOC_CHARS: usize = 200;

/// Run the deterministic structural checks over a documentation set.
///
/// Critical issues: a required document is missing, or a document is
/// empty. Everything else (thin content, no headings, no code examples)
/// is a non-blocking suggestion.
pub fn structural_feedback(
    docs: &DocumentationSet,
    required_files: &[String],
) -> ReviewFeedback {
    let mut critical = Vec::new();
    let mut improvements = Vec::new();

    for required in required_files {
        if docs.get(required).is_none() {
            critical.push(Issue {
                description: format!("required document `{required}` is missing"),
                location: Some(required.clone()),
            });
        }
    }

    let mut total_bytes = 0usize;
    let mut files_with_headings = 0usize;
    let mut files_with_examples = 0usize;

    for (path, content) in docs.iter() {
        total_bytes += content.len();

        if content.trim().is_empty() {
            critical.push(Issue {
                description: format!("document `{path}` is empty"),
                location: Some(path.to_string()),
            });
            continue;
        }

        let has_heading = content.lines().any(|l| l.trim_start().starts_with('#'));
        if has_heading {
            files_with_headings += 1;
        } else {
            improvements.push(Suggestion {
                description: "add at least one markdown heading".to_string(),
                location: Some(path.to_string()),
            });
        }

        if content.contains("```") {
            files_with_examples += 1;
        } else {
            improvements.push(Suggestion {
                description: "add a fenced code example".to_string(),
                location: Some(path.to_string()),
            });
        }

        if content.chars().count() < MIN_DOC_CHARS {
            improvements.push(Suggestion {
                description: format!(
                    "document is very short ({} chars); expand it",
                    content.chars().count()
                ),
                location: Some(path.to_string()),
            });
        }
    }

    let mut metrics: IndexMap<String, serde_json::Value> = IndexMap::new();
    metrics.insert("total_files".to_string(), docs.len().into());
    metrics.insert("total_bytes".to_string(), total_bytes.into());
    metrics.insert(
        "files_with_headings".to_string(),
        files_with_headings.into(),
    );
    metrics.insert(
        "files_with_examples".to_string(),
        files_with_examples.into(),
    );

    ReviewFeedback::from_parts(critical, improvements, metrics)
}

/// Reviewer combining structural checks with an optional LLM pass.
pub struct DocumentationReviewer<'a> {
    provider: Option<&'a dyn CompletionProvider>,
    agent: Option<AgentDefinition>,
    secrets: SecretStore,
}

impl<'a> DocumentationReviewer<'a> {
    /// Structural checks only.
    pub fn structural() -> Self {
        Self {
            provider: None,
            agent: None,
            secrets: SecretStore::default(),
        }
    }

    /// Structural checks plus LLM-backed qualitative suggestions.
    ///
    /// Provider errors can echo request details, so anything they carry
    /// passes through `secrets` before reaching the console.
    pub fn with_provider(
        provider: &'a dyn CompletionProvider,
        agent: AgentDefinition,
        secrets: SecretStore,
    ) -> Self {
        Self {
            provider: Some(provider),
            agent: Some(agent),
            secrets,
        }
    }

    /// Review a documentation set against the repository overview.
    ///
    /// The LLM pass is advisory: a provider failure or unparseable
    /// response downgrades to a warning and the structural verdict stands.
    pub async fn review(
        &self,
        docs: &DocumentationSet,
        repo_overview: &str,
        required_files: &[String],
    ) -> ReviewFeedback {
        let mut feedback = structural_feedback(docs, required_files);

        if let (Some(provider), Some(agent)) = (self.provider, &self.agent) {
            let prompt = build_review_prompt(docs, repo_overview);
            match complete_with_retry(provider, agent, &prompt).await {
                Ok(response) => {
                    feedback
                        .improvements
                        .extend(parse_improvements(&response));
                }
                Err(e) => {
                    eprintln!("Warning: {}", qualitative_failure_warning(&e, &self.secrets));
                }
            }
        }

        feedback
    }
}

/// Build the user prompt for the qualitative review pass.
///
/// The response schema is generated from the wire type itself so the
/// prompt and the parser cannot drift apart.
fn build_review_prompt(docs: &DocumentationSet, repo_overview: &str) -> String {
    let mut prompt = String::new();
    prompt.push_str("# Repository\n\n");
    prompt.push_str(repo_overview);
    prompt.push_str("\n# Documentation under review\n\n");
    for (path, content) in docs.iter() {
        prompt.push_str(&format!("## `{path}`\n\n{content}\n\n"));
    }

    let schema = schemars::schema_for!(ImprovementsResponse);
    if let Ok(rendered) = serde_json::to_string_pretty(&schema) {
        prompt.push_str(&format!(
            "# Response format\n\nRespond with a JSON object matching this schema:\n\n\
             ```json\n{rendered}\n```\n"
        ));
    }
    prompt
}

/// Expected shape of the LLM reviewer response.
#[derive(serde::Deserialize, schemars::JsonSchema)]
struct ImprovementsResponse {
    #[serde(default)]
    improvements: Vec<Suggestion>,
}

/// Parse qualitative suggestions out of the LLM response.
///
/// Tolerates fenced or prose-wrapped JSON; anything unparseable yields
/// an empty list rather than an error.
fn parse_improvements(response: &str) -> Vec<Suggestion> {
    for candidate in extract_json_candidates(response.trim()) {
        if let Ok(parsed) = serde_json::from_str::<ImprovementsResponse>(&candidate) {
            return parsed.improvements;
        }
    }
    Vec::new()
}

/// Console warning for a failed qualitative pass, with secrets stripped.
fn qualitative_failure_warning(err: &ProviderError, secrets: &SecretStore) -> String {
    secrets.redact(&format!(
        "qualitative review pass failed, continuing with structural checks only: {err}"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn required() -> Vec<String> {
        vec!["README.md".to_string(), "docs/architecture.md".to_string()]
    }

    fn good_doc() -> String {
        let mut doc = String::from("# Title\n\nSome prose.\n\n```sh\ncargo run\n```\n");
        doc.push_str(&"More detail. ".repeat(30));
        doc
    }

    #[test]
    fn complete_set_is_approved() {
        let docs = DocumentationSet::from_iter([
            ("README.md".to_string(), good_doc()),
            ("docs/architecture.md".to_string(), good_doc()),
        ]);
        let fb = structural_feedback(&docs, &required());
        assert!(fb.is_approved(), "issues: {:?}", fb.critical_issues);
        assert!(fb.improvements.is_empty());
    }

    #[test]
    fn missing_required_file_is_critical() {
        let docs = DocumentationSet::from_iter([("README.md".to_string(), good_doc())]);
        let fb = structural_feedback(&docs, &required());
        assert!(!fb.is_approved());
        assert_eq!(fb.critical_issues.len(), 1);
        assert_eq!(
            fb.critical_issues[0].location.as_deref(),
            Some("docs/architecture.md")
        );
    }

    #[test]
    fn empty_document_is_critical() {
        let docs = DocumentationSet::from_iter([
            ("README.md".to_string(), "   \n".to_string()),
            ("docs/architecture.md".to_string(), good_doc()),
        ]);
        let fb = structural_feedback(&docs, &required());
        assert!(!fb.is_approved());
        assert!(fb.critical_issues[0].description.contains("empty"));
    }

    #[test]
    fn thin_content_is_only_a_suggestion() {
        let docs = DocumentationSet::from_iter([
            ("README.md".to_string(), "# T\n\n```\nx\n```\n".to_string()),
            ("docs/architecture.md".to_string(), good_doc()),
        ]);
        let fb = structural_feedback(&docs, &required());
        assert!(fb.is_approved(), "thin docs must not block approval");
        assert!(fb
            .improvements
            .iter()
            .any(|s| s.description.contains("very short")));
    }

    #[test]
    fn missing_heading_and_examples_are_suggestions() {
        let mut plain = String::from("plain prose without structure. ");
        plain.push_str(&"more words. ".repeat(30));
        let docs = DocumentationSet::from_iter([
            ("README.md".to_string(), plain),
            ("docs/architecture.md".to_string(), good_doc()),
        ]);
        let fb = structural_feedback(&docs, &required());
        assert!(fb.is_approved());
        assert!(fb.improvements.iter().any(|s| s.description.contains("heading")));
        assert!(fb.improvements.iter().any(|s| s.description.contains("code example")));
    }

    #[test]
    fn metrics_are_populated() {
        let docs = DocumentationSet::from_iter([
            ("README.md".to_string(), good_doc()),
            ("docs/architecture.md".to_string(), "no structure at all but long enough that it is not flagged as short, which takes a fair number of words to achieve in a single run-on sentence of filler text about nothing in particular at all really".to_string()),
        ]);
        let fb = structural_feedback(&docs, &required());
        assert_eq!(fb.metrics.get("total_files"), Some(&2.into()));
        assert_eq!(fb.metrics.get("files_with_headings"), Some(&1.into()));
        assert_eq!(fb.metrics.get("files_with_examples"), Some(&1.into()));
    }

    #[test]
    fn empty_set_flags_all_required_files() {
        let docs = DocumentationSet::new();
        let fb = structural_feedback(&docs, &required());
        assert_eq!(fb.critical_issues.len(), 2);
    }

    #[test]
    fn parse_improvements_plain_and_fenced() {
        let plain = r#"{"improvements": [{"description": "tighten the intro", "location": "README.md"}]}"#;
        assert_eq!(parse_improvements(plain).len(), 1);

        let fenced = "```json\n{\"improvements\": []}\n```";
        assert!(parse_improvements(fenced).is_empty());
    }

    #[test]
    fn parse_improvements_garbage_is_empty() {
        assert!(parse_improvements("not json at all").is_empty());
    }

    #[test]
    fn failure_warning_never_leaks_secrets() {
        let secrets = SecretStore::new([Some("sk-hidden-key".to_string())]);
        let err = ProviderError::ApiError(
            "401 Unauthorized for request with key sk-hidden-key".to_string(),
        );
        let warning = qualitative_failure_warning(&err, &secrets);
        assert!(!warning.contains("sk-hidden-key"), "got: {warning}");
        assert!(warning.contains("***"));
    }

    #[test]
    fn review_prompt_embeds_docs_and_schema() {
        let docs = DocumentationSet::from_iter([("README.md".to_string(), good_doc())]);
        let prompt = build_review_prompt(&docs, "a python project");
        assert!(prompt.contains("a python project"));
        assert!(prompt.contains("## `README.md`"));
        assert!(prompt.contains("\"improvements\""));
    }

    #[tokio::test]
    async fn structural_reviewer_without_provider() {
        let docs = DocumentationSet::from_iter([
            ("README.md".to_string(), good_doc()),
            ("docs/architecture.md".to_string(), good_doc()),
        ]);
        let reviewer = DocumentationReviewer::structural();
        let fb = reviewer.review(&docs, "overview", &required()).await;
        assert!(fb.is_approved());
    }
}
