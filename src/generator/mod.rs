//! Documentation generator: turns a repository snapshot into a
//! [`DocumentationSet`] via the configured LLM provider.
//!
//! The LLM responds with a JSON object mapping relative file paths to
//! markdown contents. Responses wrapped in markdown code fences or
//! surrounded by prose are tolerated.

use std::path::{Component, Path, PathBuf};

use thiserror::Error;

use crate::models::{AgentDefinition, DocumentationSet, RepositorySnapshot, ReviewFeedback};
use crate::providers::{
    complete_with_retry, extract_json_candidates, CompletionProvider, ProviderError,
};

/// Errors from documentation generation.
#[derive(Error, Debug)]
pub enum GenerateError {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("could not parse LLM response as a documentation JSON object: {0}")]
    Parse(String),

    #[error("LLM returned an empty documentation set")]
    Empty,

    #[error("refusing to write outside the repository: {0}")]
    UnsafePath(String),

    #[error("failed to write {path}: {source}")]
    WriteError {
        path: String,
        source: std::io::Error,
    },
}

/// Maximum number of response characters to include in parse error messages.
const PARSE_ERROR_PREVIEW_CHARS: usize = 2000;

/// LLM-backed documentation generator.
pub struct DocumentationGenerator<'a> {
    provider: &'a dyn CompletionProvider,
    agent: AgentDefinition,
}

impl<'a> DocumentationGenerator<'a> {
    pub fn new(provider: &'a dyn CompletionProvider, agent: AgentDefinition) -> Self {
        Self { provider, agent }
    }

    /// Generate documentation for a snapshot.
    ///
    /// `feedback` carries reviewer output from the previous iteration so
    /// revisions address the issues that were raised.
    pub async fn generate(
        &self,
        snapshot: &RepositorySnapshot,
        required_files: &[String],
        feedback: Option<&ReviewFeedback>,
    ) -> Result<DocumentationSet, GenerateError> {
        let prompt = build_prompt(snapshot, required_files, feedback);
        let response = complete_with_retry(self.provider, &self.agent, &prompt).await?;
        let docs = parse_documentation_response(&response)?;
        if docs.is_empty() {
            return Err(GenerateError::Empty);
        }
        Ok(docs)
    }
}

/// Build the user prompt from the snapshot, required files, and any
/// reviewer feedback from the previous iteration.
fn build_prompt(
    snapshot: &RepositorySnapshot,
    required_files: &[String],
    feedback: Option<&ReviewFeedback>,
) -> String {
    let mut prompt = String::new();
    prompt.push_str("# Repository\n\n");
    prompt.push_str(&snapshot.overview());

    if !required_files.is_empty() {
        prompt.push_str("\n# Required documents\n\n");
        for file in required_files {
            prompt.push_str(&format!("- `{file}`\n"));
        }
    }

    if let Some(feedback) = feedback {
        prompt.push_str("\n# Reviewer feedback on the previous draft\n\n");
        prompt.push_str(&feedback.to_prompt_section());
        prompt.push_str("\nRevise the documentation to resolve every critical issue above.\n");
    }

    prompt
}

/// Parse the LLM response text into a documentation set.
///
/// Expects a JSON object mapping paths to contents, optionally inside a
/// `{"files": {...}}` wrapper. Tries the raw text, then a brace-delimited
/// slice, then markdown-fenced blocks.
fn parse_documentation_response(response: &str) -> Result<DocumentationSet, GenerateError> {
    let trimmed = response.trim();

    for candidate in extract_json_candidates(trimmed) {
        if let Ok(map) = serde_json::from_str::<indexmap::IndexMap<String, String>>(&candidate) {
            return Ok(DocumentationSet(map));
        }

        if let Ok(wrapper) = serde_json::from_str::<serde_json::Value>(&candidate) {
            if let Some(files) = wrapper.get("files") {
                if let Ok(map) = serde_json::from_value::<indexmap::IndexMap<String, String>>(
                    files.clone(),
                ) {
                    return Ok(DocumentationSet(map));
                }
            }
        }
    }

    // Truncate on char boundaries; responses routinely contain non-ASCII.
    Err(GenerateError::Parse(
        response.chars().take(PARSE_ERROR_PREVIEW_CHARS).collect(),
    ))
}

/// Resolve a document path to its on-disk location relative to the repo root.
///
/// `README.md` always lands at the repository root. Bare filenames
/// (`index.md`, `CONTRIBUTING.md`, ...) belong in the output directory;
/// paths that already carry a directory are taken as given.
pub fn route_document(doc_path: &str, output_dir: &str) -> PathBuf {
    if doc_path == crate::constants::README_ALIAS {
        return PathBuf::from(doc_path);
    }
    if doc_path.contains('/') {
        PathBuf::from(doc_path)
    } else {
        Path::new(output_dir).join(doc_path)
    }
}

/// Write a documentation set into the repository working copy.
///
/// Returns the relative paths that were written, in document order.
pub fn write_documentation_set(
    docs: &DocumentationSet,
    repo_root: &Path,
    output_dir: &str,
) -> Result<Vec<String>, GenerateError> {
    let mut written = Vec::new();

    for (doc_path, content) in docs.iter() {
        let relative = route_document(doc_path, output_dir);
        if !is_safe_relative(&relative) {
            return Err(GenerateError::UnsafePath(doc_path.to_string()));
        }

        let target = repo_root.join(&relative);
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent).map_err(|e| GenerateError::WriteError {
                path: relative.display().to_string(),
                source: e,
            })?;
        }
        std::fs::write(&target, content).map_err(|e| GenerateError::WriteError {
            path: relative.display().to_string(),
            source: e,
        })?;

        written.push(relative.display().to_string());
    }

    Ok(written)
}

/// A path is safe when it is relative and never steps above its base.
fn is_safe_relative(path: &Path) -> bool {
    !path.as_os_str().is_empty()
        && path
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
}
