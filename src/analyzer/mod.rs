//! Repository analyzer: walks a source tree into a [`RepositorySnapshot`].
//!
//! Traversal is deterministic (depth-first, directory entries sorted by
//! name) so repeated runs over an unmodified tree produce identical
//! snapshots. Ignored directories are pruned with their whole subtree;
//! unreadable files are recorded as warnings and never abort the run.

use std::collections::BTreeSet;
use std::path::Path;

use indexmap::IndexMap;
use thiserror::Error;
use walkdir::WalkDir;

use crate::config::AnalyzerConfig;
use crate::models::{FileRecord, RepositorySnapshot};

/// Errors from repository analysis.
#[derive(Error, Debug)]
pub enum AnalyzeError {
    #[error("repository path does not exist: {0}")]
    NotFound(String),

    #[error("repository path is not a directory: {0}")]
    NotADirectory(String),
}

/// File extensions treated as compiled artifacts and never captured.
const ARTIFACT_EXTENSIONS: &[&str] = &[
    "pyc", "pyo", "pyd", "so", "dll", "class", "o", "a", "rlib", "exe", "bin", "wasm",
];

/// Manifest files whose full contents are lifted into the snapshot summary.
const MANIFEST_FILES: &[&str] = &[
    "Cargo.toml",
    "package.json",
    "requirements.txt",
    "Gemfile",
    "pom.xml",
    "build.gradle",
    "go.mod",
];

/// Walk `root` and build a snapshot of every capturable file.
pub fn analyze(root: &Path, config: &AnalyzerConfig) -> Result<RepositorySnapshot, AnalyzeError> {
    if !root.exists() {
        return Err(AnalyzeError::NotFound(root.display().to_string()));
    }
    if !root.is_dir() {
        return Err(AnalyzeError::NotADirectory(root.display().to_string()));
    }

    let ignore_set: BTreeSet<&str> = config.ignore_dirs.iter().map(String::as_str).collect();

    let mut files = Vec::new();
    let mut warnings = Vec::new();
    let mut extension_histogram: IndexMap<String, usize> = IndexMap::new();
    let mut samples: IndexMap<String, String> = IndexMap::new();
    let mut manifests: IndexMap<String, String> = IndexMap::new();

    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            // The root itself is always entered; subdirectories are pruned
            // together with their subtree when ignored.
            if entry.depth() == 0 || !entry.file_type().is_dir() {
                return true;
            }
            let name = entry.file_name().to_string_lossy();
            !name.starts_with('.') && !ignore_set.contains(name.as_ref())
        });

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warnings.push(format!("skipping unreadable entry: {e}"));
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let name = entry.file_name().to_string_lossy();
        if name.starts_with('.') {
            continue;
        }

        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_else(|| "(none)".to_string());
        if ARTIFACT_EXTENSIONS.contains(&extension.as_str()) {
            continue;
        }

        let relative_path = match path.strip_prefix(root) {
            Ok(rel) => rel
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/"),
            Err(_) => continue,
        };

        // Invalid byte sequences are replaced rather than raising.
        let content = match std::fs::read(path) {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(e) => {
                warnings.push(format!("could not read {relative_path}: {e}"));
                continue;
            }
        };

        *extension_histogram.entry(extension.clone()).or_insert(0) += 1;
        samples
            .entry(extension)
            .or_insert_with(|| truncate_chars(&content, config.sample_chars));
        if MANIFEST_FILES.contains(&name.as_ref()) {
            manifests.insert(relative_path.clone(), content.clone());
        }

        let size = content.len();
        files.push(FileRecord {
            relative_path,
            content,
            size,
        });
    }

    Ok(RepositorySnapshot {
        files,
        root: root.to_path_buf(),
        extension_histogram,
        samples,
        manifests,
        warnings,
    })
}

/// First `max` characters of `text`, respecting char boundaries.
fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}
