//! Integration tests driving the full pipeline with mock components.
//!
//! Validates the coordinator end-to-end without real API calls or a
//! real remote by mocking both the completion provider and the publisher.

use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;

use docsmith::config::Config;
use docsmith::models::{AgentDefinition, PublishRequest, PullRequestInfo};
use docsmith::pipeline::{Pipeline, PipelineError, RunOptions};
use docsmith::providers::{CompletionProvider, ProviderError};
use docsmith::publisher::{DocPublisher, PublishError};
use docsmith::security::SecretStore;

/// A mock provider with scripted per-call generator responses.
///
/// Generator calls consume the script in order (the last entry repeats
/// once exhausted); reviewer calls always get an empty improvements list.
struct MockProvider {
    generator_responses: Vec<String>,
    generator_calls: Mutex<usize>,
    fail: bool,
}

impl MockProvider {
    fn scripted(responses: Vec<String>) -> Self {
        Self {
            generator_responses: responses,
            generator_calls: Mutex::new(0),
            fail: false,
        }
    }

    fn failing() -> Self {
        Self {
            generator_responses: Vec::new(),
            generator_calls: Mutex::new(0),
            fail: true,
        }
    }

    fn calls(&self) -> usize {
        *self.generator_calls.lock().unwrap()
    }
}

#[async_trait]
impl CompletionProvider for MockProvider {
    async fn complete(
        &self,
        agent: &AgentDefinition,
        _prompt: &str,
    ) -> Result<String, ProviderError> {
        if self.fail {
            return Err(ProviderError::ApiError("401 Unauthorized".to_string()));
        }
        match agent.profile.name.as_str() {
            "generator" => {
                let mut calls = self.generator_calls.lock().unwrap();
                let index = (*calls).min(self.generator_responses.len() - 1);
                *calls += 1;
                Ok(self.generator_responses[index].clone())
            }
            _ => Ok(r#"{"improvements": []}"#.to_string()),
        }
    }
}

/// A mock publisher whose checkout seeds a small source tree.
struct MockPublisher {
    published: Mutex<Vec<PublishRequest>>,
}

impl MockPublisher {
    fn new() -> Self {
        Self {
            published: Mutex::new(Vec::new()),
        }
    }

    fn publish_count(&self) -> usize {
        self.published.lock().unwrap().len()
    }
}

#[async_trait]
impl DocPublisher for MockPublisher {
    async fn checkout(&self, _repo_url: &str, work_dir: &Path) -> Result<(), PublishError> {
        std::fs::create_dir_all(work_dir)
            .map_err(|e| PublishError::CloneFailed(e.to_string()))?;
        std::fs::write(work_dir.join("main.py"), "print('hello')\n")
            .map_err(|e| PublishError::CloneFailed(e.to_string()))?;
        std::fs::write(work_dir.join("requirements.txt"), "requests\n")
            .map_err(|e| PublishError::CloneFailed(e.to_string()))?;
        Ok(())
    }

    async fn publish(&self, request: &PublishRequest) -> Result<PullRequestInfo, PublishError> {
        self.published.lock().unwrap().push(request.clone());
        Ok(PullRequestInfo {
            url: "https://github.com/owner/repo/pull/1".to_string(),
            number: 1,
            state: "open".to_string(),
        })
    }
}

fn good_doc(title: &str) -> String {
    format!(
        "# {title}\n\nA thorough explanation of the project, long enough to read \
         like real documentation rather than a stub.\n\n```sh\npip install -r requirements.txt\n\
         python main.py\n```\n\nFurther notes on usage, configuration, and conventions \
         follow so the document carries real substance.\n"
    )
}

/// JSON response containing every required document.
fn complete_response() -> String {
    serde_json::json!({
        "README.md": good_doc("Project"),
        "CONTRIBUTING.md": good_doc("Contributing"),
        "docs/architecture.md": good_doc("Architecture"),
    })
    .to_string()
}

/// JSON response missing `docs/architecture.md` (a required document).
fn incomplete_response() -> String {
    serde_json::json!({
        "README.md": good_doc("Project"),
        "CONTRIBUTING.md": good_doc("Contributing"),
    })
    .to_string()
}

fn run_options(work_dir: &Path, dry_run: bool) -> RunOptions {
    RunOptions {
        repo_url: "https://github.com/owner/repo".to_string(),
        work_dir: work_dir.to_path_buf(),
        dry_run,
    }
}

#[tokio::test]
async fn approved_first_iteration_publishes() {
    let work = tempfile::tempdir().unwrap();
    let provider = MockProvider::scripted(vec![complete_response()]);
    let publisher = MockPublisher::new();
    let pipeline = Pipeline::new(Config::default(), &provider, &publisher, SecretStore::default());

    let outcome = pipeline
        .run(&run_options(work.path(), false))
        .await
        .unwrap();

    assert_eq!(outcome.iterations, 1);
    assert!(outcome.feedback.is_approved());
    assert_eq!(publisher.publish_count(), 1);
    let pr = outcome.pull_request.unwrap();
    assert_eq!(pr.number, 1);
    assert_eq!(pr.state, "open");
    assert!(outcome.written_files.contains(&"README.md".to_string()));
    assert!(outcome
        .written_files
        .contains(&"docs/architecture.md".to_string()));
}

#[tokio::test]
async fn revision_loop_feeds_feedback_back() {
    let work = tempfile::tempdir().unwrap();
    let provider = MockProvider::scripted(vec![incomplete_response(), complete_response()]);
    let publisher = MockPublisher::new();
    let pipeline = Pipeline::new(Config::default(), &provider, &publisher, SecretStore::default());

    let outcome = pipeline
        .run(&run_options(work.path(), false))
        .await
        .unwrap();

    assert_eq!(outcome.iterations, 2);
    assert_eq!(provider.calls(), 2);
    assert!(outcome.feedback.is_approved());
    assert_eq!(publisher.publish_count(), 1);
}

#[tokio::test]
async fn exhausted_budget_publishes_with_warning_by_default() {
    let work = tempfile::tempdir().unwrap();
    // Never produces the architecture doc, so every review fails.
    let provider = MockProvider::scripted(vec![incomplete_response()]);
    let publisher = MockPublisher::new();
    let config = Config::default();
    assert_eq!(config.pipeline.max_review_iterations, 3);
    let pipeline = Pipeline::new(config, &provider, &publisher, SecretStore::default());

    let outcome = pipeline
        .run(&run_options(work.path(), false))
        .await
        .unwrap();

    assert_eq!(outcome.iterations, 3);
    assert!(!outcome.feedback.is_approved());
    assert!(outcome
        .warnings
        .iter()
        .any(|w| w.contains("budget exhausted")));
    assert_eq!(publisher.publish_count(), 1, "still publishes by default");
}

#[tokio::test]
async fn exhausted_budget_fails_when_policy_disabled() {
    let work = tempfile::tempdir().unwrap();
    let provider = MockProvider::scripted(vec![incomplete_response()]);
    let publisher = MockPublisher::new();
    let mut config = Config::default();
    config.pipeline.publish_on_exhaustion = false;
    let pipeline = Pipeline::new(config, &provider, &publisher, SecretStore::default());

    let result = pipeline.run(&run_options(work.path(), false)).await;

    match result {
        Err(PipelineError::BudgetExhausted { iterations }) => assert_eq!(iterations, 3),
        other => panic!("expected BudgetExhausted, got: {other:?}"),
    }
    assert_eq!(publisher.publish_count(), 0, "must not publish");
}

#[tokio::test]
async fn provider_failure_propagates_without_publishing() {
    let work = tempfile::tempdir().unwrap();
    let provider = MockProvider::failing();
    let publisher = MockPublisher::new();
    let pipeline = Pipeline::new(Config::default(), &provider, &publisher, SecretStore::default());

    let result = pipeline.run(&run_options(work.path(), false)).await;

    assert!(matches!(result, Err(PipelineError::Generate(_))));
    assert_eq!(publisher.publish_count(), 0);
}

#[tokio::test]
async fn dry_run_writes_files_but_skips_publish() {
    let work = tempfile::tempdir().unwrap();
    let provider = MockProvider::scripted(vec![complete_response()]);
    let publisher = MockPublisher::new();
    let pipeline = Pipeline::new(Config::default(), &provider, &publisher, SecretStore::default());

    let outcome = pipeline
        .run(&run_options(work.path(), true))
        .await
        .unwrap();

    assert!(outcome.pull_request.is_none());
    assert_eq!(publisher.publish_count(), 0);
    assert!(outcome.work_dir.join("README.md").exists());
    assert!(outcome.work_dir.join("docs/architecture.md").exists());
}

#[tokio::test]
async fn publish_request_carries_branch_and_target() {
    let work = tempfile::tempdir().unwrap();
    let provider = MockProvider::scripted(vec![complete_response()]);
    let publisher = MockPublisher::new();
    let mut config = Config::default();
    config.pipeline.target_branch = "develop".to_string();
    let pipeline = Pipeline::new(config, &provider, &publisher, SecretStore::default());

    pipeline
        .run(&run_options(work.path(), false))
        .await
        .unwrap();

    let published = publisher.published.lock().unwrap();
    let request = &published[0];
    assert_eq!(request.repo_slug, "owner/repo");
    assert_eq!(request.target_branch, "develop");
    assert!(request.branch_name.starts_with("docs/update-"));
}

#[tokio::test]
async fn invalid_repo_url_fails_before_publish() {
    let work = tempfile::tempdir().unwrap();
    let provider = MockProvider::scripted(vec![complete_response()]);
    let publisher = MockPublisher::new();
    let pipeline = Pipeline::new(Config::default(), &provider, &publisher, SecretStore::default());

    let options = RunOptions {
        repo_url: "https://example.com/not-github".to_string(),
        work_dir: work.path().to_path_buf(),
        dry_run: false,
    };
    let result = pipeline.run(&options).await;

    assert!(matches!(result, Err(PipelineError::InvalidRepoUrl(_))));
    assert_eq!(publisher.publish_count(), 0);
}
