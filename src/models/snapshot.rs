//! Repository snapshot types produced by the analyzer.

use std::path::PathBuf;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A single file captured during analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileRecord {
    /// Path relative to the snapshot root, `/`-separated.
    pub relative_path: String,
    /// File content, with invalid byte sequences replaced.
    pub content: String,
    /// Content length in bytes after lossy decoding.
    pub size: usize,
}

/// Structured view of a repository, created once per pipeline run.
///
/// Immutable after the analyzer returns it. Paths are unique, relative
/// to `root`, and never include entries under ignored directories.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RepositorySnapshot {
    /// Files in deterministic traversal order (depth-first, names sorted).
    pub files: Vec<FileRecord>,
    /// Absolute path the snapshot was taken from.
    pub root: PathBuf,
    /// File count per extension (extension without the dot; `(none)` for bare names).
    pub extension_histogram: IndexMap<String, usize>,
    /// First-N-character sample of one representative file per extension.
    pub samples: IndexMap<String, String>,
    /// Recognized manifest files (Cargo.toml, package.json, ...) and their contents.
    pub manifests: IndexMap<String, String>,
    /// Non-fatal problems encountered during traversal (unreadable files).
    pub warnings: Vec<String>,
}

impl RepositorySnapshot {
    /// Total number of captured files.
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Returns `true` if a file with the given relative path was captured.
    pub fn contains(&self, relative_path: &str) -> bool {
        self.files.iter().any(|f| f.relative_path == relative_path)
    }

    /// A compact plain-text overview for LLM prompts: the file listing,
    /// extension histogram, and manifest contents, without full bodies.
    pub fn overview(&self) -> String {
        let mut out = String::new();

        out.push_str("## File inventory\n\n");
        for file in &self.files {
            out.push_str(&format!("- {} ({} bytes)\n", file.relative_path, file.size));
        }

        if !self.extension_histogram.is_empty() {
            out.push_str("\n## Extension histogram\n\n");
            for (ext, count) in &self.extension_histogram {
                out.push_str(&format!("- .{ext}: {count}\n"));
            }
        }

        if !self.manifests.is_empty() {
            out.push_str("\n## Manifest files\n\n");
            for (path, content) in &self.manifests {
                out.push_str(&format!("### {path}\n\n```\n{content}\n```\n\n"));
            }
        }

        if !self.samples.is_empty() {
            out.push_str("\n## Representative samples\n\n");
            for (ext, sample) in &self.samples {
                out.push_str(&format!("### .{ext}\n\n```\n{sample}\n```\n\n"));
            }
        }

        out
    }
}
