//! Pipeline coordinator.
//!
//! Drives the full run: checkout, analysis, the bounded generate/review
//! loop, writing the documentation into the working copy, and publishing
//! it as a pull request.

use std::path::PathBuf;

use colored::Colorize;
use thiserror::Error;

use crate::agents::{self, AgentError};
use crate::analyzer::{self, AnalyzeError};
use crate::config::Config;
use crate::generator::{self, DocumentationGenerator, GenerateError};
use crate::models::{PublishRequest, PullRequestInfo, ReviewFeedback};
use crate::providers::CompletionProvider;
use crate::publisher::{DocPublisher, PublishError};
use crate::reviewer::DocumentationReviewer;
use crate::security::SecretStore;

/// Errors from a pipeline run.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("invalid repository URL: {0}")]
    InvalidRepoUrl(String),

    #[error(transparent)]
    Analyze(#[from] AnalyzeError),

    #[error(transparent)]
    Agent(#[from] AgentError),

    #[error(transparent)]
    Generate(#[from] GenerateError),

    #[error(transparent)]
    Publish(#[from] PublishError),

    #[error(
        "review budget exhausted after {iterations} iterations with unresolved critical issues"
    )]
    BudgetExhausted { iterations: u32 },
}

/// What a completed run produced.
#[derive(Debug)]
pub struct PipelineOutcome {
    /// The opened pull request, absent on dry runs.
    pub pull_request: Option<PullRequestInfo>,
    /// Number of generator invocations.
    pub iterations: u32,
    /// Feedback from the final review pass.
    pub feedback: ReviewFeedback,
    /// Relative paths written into the working copy.
    pub written_files: Vec<String>,
    /// Non-fatal problems collected along the way.
    pub warnings: Vec<String>,
    /// The working copy the documentation was written into.
    pub work_dir: PathBuf,
}

/// Options for a single run.
pub struct RunOptions {
    pub repo_url: String,
    /// Base directory working copies are cloned under.
    pub work_dir: PathBuf,
    /// Stop after writing documentation; skip branch/commit/push/PR.
    pub dry_run: bool,
}

/// The coordinator wiring all stages together.
pub struct Pipeline<'a> {
    config: Config,
    provider: &'a dyn CompletionProvider,
    publisher: &'a dyn DocPublisher,
    secrets: SecretStore,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        config: Config,
        provider: &'a dyn CompletionProvider,
        publisher: &'a dyn DocPublisher,
        secrets: SecretStore,
    ) -> Self {
        Self {
            config,
            provider,
            publisher,
            secrets,
        }
    }

    /// Run the full pipeline for one repository.
    pub async fn run(&self, options: &RunOptions) -> Result<PipelineOutcome, PipelineError> {
        let mut warnings = Vec::new();

        // Checkout
        stage("Cloning repository");
        let checkout_dir = options.work_dir.join(format!(
            "docsmith-{}",
            chrono::Utc::now().format("%Y%m%d-%H%M%S")
        ));
        self.publisher
            .checkout(&options.repo_url, &checkout_dir)
            .await?;

        // Analysis
        stage("Analyzing repository");
        let snapshot = analyzer::analyze(&checkout_dir, &self.config.analyzer)?;
        warnings.extend(snapshot.warnings.iter().cloned());
        eprintln!(
            "  {} files captured, {} manifests",
            snapshot.file_count(),
            snapshot.manifests.len()
        );

        // Generate/review loop
        let generator_agent = agents::resolve_profile("generator").await?;
        let reviewer_agent = agents::resolve_profile("reviewer").await?;
        let generator = DocumentationGenerator::new(self.provider, generator_agent);
        let reviewer = DocumentationReviewer::with_provider(
            self.provider,
            reviewer_agent,
            self.secrets.clone(),
        );

        let required = &self.config.pipeline.required_doc_files;
        let overview = snapshot.overview();
        let max_iterations = self.config.pipeline.max_review_iterations.max(1);

        let mut iterations = 0u32;
        let mut feedback: Option<ReviewFeedback> = None;
        let docs = loop {
            iterations += 1;
            stage(&format!(
                "Generating documentation (iteration {iterations}/{max_iterations})"
            ));
            let docs = generator
                .generate(&snapshot, required, feedback.as_ref())
                .await?;

            stage("Reviewing documentation");
            let review = reviewer.review(&docs, &overview, required).await;
            if review.is_approved() {
                eprintln!("  {}", "approved".green());
                feedback = Some(review);
                break docs;
            }
            eprintln!(
                "  {} ({} critical issues)",
                "needs revision".yellow(),
                review.critical_issues.len()
            );

            if iterations >= max_iterations {
                if self.config.pipeline.publish_on_exhaustion {
                    warnings.push(format!(
                        "review budget exhausted after {iterations} iterations; \
                         publishing with {} unresolved critical issues",
                        review.critical_issues.len()
                    ));
                    feedback = Some(review);
                    break docs;
                }
                return Err(PipelineError::BudgetExhausted { iterations });
            }
            feedback = Some(review);
        };

        // The loop always sets feedback before breaking.
        let feedback = feedback.take().unwrap_or_else(|| {
            ReviewFeedback::from_parts(Vec::new(), Vec::new(), indexmap::IndexMap::new())
        });

        // Write into the working copy
        stage("Writing documentation");
        let written = generator::write_documentation_set(
            &docs,
            &checkout_dir,
            &self.config.pipeline.output_dir,
        )?;
        for path in &written {
            eprintln!("  {path}");
        }

        if options.dry_run {
            stage("Dry run: skipping publish");
            return Ok(PipelineOutcome {
                pull_request: None,
                iterations,
                feedback,
                written_files: written,
                warnings,
                work_dir: checkout_dir,
            });
        }

        // Publish
        stage("Publishing pull request");
        let repo_slug = PublishRequest::slug_from_url(&options.repo_url)
            .ok_or_else(|| PipelineError::InvalidRepoUrl(options.repo_url.clone()))?;
        let request = PublishRequest {
            repo_url: options.repo_url.clone(),
            repo_slug,
            work_dir: checkout_dir.clone(),
            branch_name: PublishRequest::timestamped_branch(chrono::Utc::now()),
            commit_message: "Add generated documentation".to_string(),
            pr_title: "Add generated documentation".to_string(),
            pr_description: build_pr_description(&written, &feedback),
            target_branch: self.config.pipeline.target_branch.clone(),
        };
        let pull_request = self.publisher.publish(&request).await?;
        eprintln!("  {}", pull_request.url.cyan());

        Ok(PipelineOutcome {
            pull_request: Some(pull_request),
            iterations,
            feedback,
            written_files: written,
            warnings,
            work_dir: checkout_dir,
        })
    }
}

fn stage(message: &str) {
    eprintln!("{} {message}", "==>".bold().blue());
}

/// Markdown body for the pull request.
fn build_pr_description(written: &[String], feedback: &ReviewFeedback) -> String {
    let mut body = String::from("Automatically generated documentation.\n\n## Files\n\n");
    for path in written {
        body.push_str(&format!("- `{path}`\n"));
    }

    if !feedback.critical_issues.is_empty() {
        body.push_str("\n## Unresolved review issues\n\n");
        for issue in &feedback.critical_issues {
            body.push_str(&format!("- {}\n", issue.description));
        }
    }

    if !feedback.metrics.is_empty() {
        body.push_str("\n## Review metrics\n\n");
        for (key, value) in &feedback.metrics {
            body.push_str(&format!("- {key}: {value}\n"));
        }
    }

    body
}
