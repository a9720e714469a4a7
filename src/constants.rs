//! App-wide constants.
//!
//! Centralises the tool name, config paths, environment variable names,
//! and defaults so a rename only requires changing this file.

/// Display name of the tool (lowercase).
pub const APP_NAME: &str = "docsmith";

/// Crate version, injected by cargo.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Local config filename (e.g. `.docsmith.toml` in repo root).
pub const CONFIG_FILENAME: &str = ".docsmith.toml";

/// Directory name under `~/.config/` for global config.
pub const CONFIG_DIR: &str = "docsmith";

/// Mask token substituted for secret values in any outbound text.
pub const REDACTION_MASK: &str = "***";

/// Default base URL of the GitHub REST API.
pub const GITHUB_API_BASE: &str = "https://api.github.com";

/// Default integration branch pull requests are opened against.
pub const DEFAULT_TARGET_BRANCH: &str = "main";

/// Default directory (relative to the repo root) for generated docs.
pub const DEFAULT_OUTPUT_DIR: &str = "docs";

/// The one document that always routes to the repository root.
pub const README_ALIAS: &str = "README.md";

// ── Environment variable names ──────────────────────────────────────

pub const ENV_PROVIDER: &str = "DOCSMITH_PROVIDER";
pub const ENV_MODEL: &str = "DOCSMITH_MODEL";
pub const ENV_API_KEY: &str = "DOCSMITH_API_KEY";
pub const ENV_BASE_URL: &str = "DOCSMITH_BASE_URL";
pub const ENV_MAX_ITERATIONS: &str = "DOCSMITH_MAX_ITERATIONS";
pub const ENV_GITHUB_TOKEN: &str = "GITHUB_TOKEN";

/// Placeholder credential values that must be rejected at startup.
pub const PLACEHOLDER_CREDENTIALS: &[&str] = &["your-github-token", "your-api-key"];
