//! Config struct and loading logic.
//!
//! Priority (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables
//! 3. `.docsmith.toml` in the current directory
//! 4. `~/.config/docsmith/config.toml` (global defaults)
//! 5. Built-in defaults

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::env::Env;
use crate::models::ProviderName;

/// Errors during config loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    ParseFile {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub pipeline: PipelineConfig,
    pub analyzer: AnalyzerConfig,
    pub provider: ProviderConfig,
    pub github: GithubConfig,
}

/// Pipeline-related configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Maximum number of generate→review iterations.
    pub max_review_iterations: u32,
    /// When the budget runs out with unresolved critical issues, publish
    /// anyway (warning) instead of failing.
    pub publish_on_exhaustion: bool,
    /// Documents the reviewer requires for approval.
    pub required_doc_files: Vec<String>,
    /// Directory (relative to the repo root) generated docs are written to.
    pub output_dir: String,
    /// Integration branch pull requests target.
    pub target_branch: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_review_iterations: 3,
            publish_on_exhaustion: true,
            required_doc_files: vec![
                "README.md".to_string(),
                "CONTRIBUTING.md".to_string(),
                "docs/architecture.md".to_string(),
            ],
            output_dir: crate::constants::DEFAULT_OUTPUT_DIR.to_string(),
            target_branch: crate::constants::DEFAULT_TARGET_BRANCH.to_string(),
        }
    }
}

/// Repository analysis configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Directory names skipped together with their whole subtree.
    pub ignore_dirs: Vec<String>,
    /// Length of the per-extension content sample, in characters.
    pub sample_chars: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            ignore_dirs: vec![
                ".git".to_string(),
                "node_modules".to_string(),
                "target".to_string(),
                "venv".to_string(),
                ".venv".to_string(),
                "build".to_string(),
                "dist".to_string(),
                "__pycache__".to_string(),
            ],
            sample_chars: 400,
        }
    }
}

/// LLM provider configuration.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub name: ProviderName,
    pub model: String,
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    /// Sampling temperature for documentation generation.
    pub temperature: f64,
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("name", &self.name)
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("temperature", &self.temperature)
            .finish()
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            name: ProviderName::Anthropic,
            model: "claude-sonnet-4-20250514".to_string(),
            base_url: None,
            api_key: None,
            temperature: 0.3,
        }
    }
}

/// GitHub publishing configuration.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GithubConfig {
    /// Access token used for the authenticated remote and the PR API.
    pub token: Option<String>,
    /// API base URL (override for GitHub Enterprise).
    pub api_base: String,
}

impl std::fmt::Debug for GithubConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GithubConfig")
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("api_base", &self.api_base)
            .finish()
    }
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            token: None,
            api_base: crate::constants::GITHUB_API_BASE.to_string(),
        }
    }
}

impl Config {
    /// Load configuration with proper layering.
    ///
    /// Reads from global config, then local config, then applies
    /// environment variable overrides.
    pub fn load(local_dir: Option<&Path>, env: &Env) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        // Layer 4: global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                let global = Self::load_file(&global_path)?;
                config.merge(global);
            }
        }

        // Layer 3: local config
        if let Some(dir) = local_dir {
            let local_path = dir.join(crate::constants::CONFIG_FILENAME);
            if local_path.exists() {
                let local = Self::load_file(&local_path)?;
                config.merge(local);
            }
        }

        // Layer 2: environment variables
        config.apply_env_vars(env);

        Ok(config)
    }

    /// Load a config from a specific file.
    fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseFile {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the global config file path.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(crate::constants::CONFIG_DIR).join("config.toml"))
    }

    /// Merge another config into this one (other takes precedence for non-default values).
    fn merge(&mut self, other: Config) {
        let default_pipeline = PipelineConfig::default();
        if other.pipeline.max_review_iterations != default_pipeline.max_review_iterations {
            self.pipeline.max_review_iterations = other.pipeline.max_review_iterations;
        }
        if other.pipeline.publish_on_exhaustion != default_pipeline.publish_on_exhaustion {
            self.pipeline.publish_on_exhaustion = other.pipeline.publish_on_exhaustion;
        }
        if other.pipeline.required_doc_files != default_pipeline.required_doc_files {
            self.pipeline.required_doc_files = other.pipeline.required_doc_files;
        }
        if other.pipeline.output_dir != default_pipeline.output_dir {
            self.pipeline.output_dir = other.pipeline.output_dir;
        }
        if other.pipeline.target_branch != default_pipeline.target_branch {
            self.pipeline.target_branch = other.pipeline.target_branch;
        }

        let default_analyzer = AnalyzerConfig::default();
        if other.analyzer.ignore_dirs != default_analyzer.ignore_dirs {
            self.analyzer.ignore_dirs = other.analyzer.ignore_dirs;
        }
        if other.analyzer.sample_chars != default_analyzer.sample_chars {
            self.analyzer.sample_chars = other.analyzer.sample_chars;
        }

        let default_provider = ProviderConfig::default();
        if other.provider.name != default_provider.name {
            self.provider.name = other.provider.name;
        }
        if other.provider.model != default_provider.model {
            self.provider.model = other.provider.model;
        }
        if other.provider.base_url.is_some() {
            self.provider.base_url = other.provider.base_url;
        }
        if other.provider.api_key.is_some() {
            self.provider.api_key = other.provider.api_key;
        }
        if other.provider.temperature != default_provider.temperature {
            self.provider.temperature = other.provider.temperature;
        }

        if other.github.token.is_some() {
            self.github.token = other.github.token;
        }
        if other.github.api_base != GithubConfig::default().api_base {
            self.github.api_base = other.github.api_base;
        }
    }

    /// Apply environment variable overrides.
    fn apply_env_vars(&mut self, env: &Env) {
        if let Ok(val) = env.var(crate::constants::ENV_PROVIDER) {
            if let Ok(name) = val.parse::<ProviderName>() {
                self.provider.name = name;
            } else {
                eprintln!(
                    "Warning: ignoring invalid {} value: {val}",
                    crate::constants::ENV_PROVIDER
                );
            }
        }
        if let Ok(val) = env.var(crate::constants::ENV_MODEL) {
            self.provider.model = val;
        }
        if let Ok(val) = env.var(crate::constants::ENV_BASE_URL) {
            self.provider.base_url = Some(val);
        }
        if let Ok(val) = env.var(crate::constants::ENV_MAX_ITERATIONS) {
            match val.parse::<u32>() {
                Ok(n) if n > 0 => self.pipeline.max_review_iterations = n,
                _ => eprintln!(
                    "Warning: ignoring invalid {} value: {val}",
                    crate::constants::ENV_MAX_ITERATIONS
                ),
            }
        }

        // Provider-specific API key resolution
        let api_key = env
            .var(crate::constants::ENV_API_KEY)
            .or_else(|_| env.var(self.provider.name.api_key_env_var()))
            .ok();
        if api_key.is_some() {
            self.provider.api_key = api_key;
        }

        if let Some(token) = env.var_non_empty(crate::constants::ENV_GITHUB_TOKEN) {
            self.github.token = Some(token);
        }
    }
}
