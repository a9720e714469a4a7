//! Agent loading, profile resolution, and markdown+YAML parsing.

pub mod builtin;
pub mod parser;

use std::path::Path;
use thiserror::Error;

use crate::models::AgentDefinition;

/// Errors from agent loading.
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("agent profile not found: {0}")]
    NotFound(String),

    #[error("failed to read agent file {path}: {source}")]
    ReadError {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse agent definition: {0}")]
    ParseError(String),
}

/// Resolve a profile name or path into an agent definition.
///
/// Resolution order:
/// 1. If it matches a built-in name → use embedded profile
/// 2. If it's a file path (contains `/` or `.md`) → load it directly
/// 3. Otherwise → error with suggestions
pub async fn resolve_profile(profile: &str) -> Result<AgentDefinition, AgentError> {
    // 1. Check built-in profiles
    if let Some(agent) = builtin::get_builtin(profile) {
        return Ok(agent);
    }

    // 2. Check if it's a direct file path
    if profile.contains('/') || profile.ends_with(".md") {
        let path = Path::new(profile);
        if path.exists() {
            let content =
                tokio::fs::read_to_string(path)
                    .await
                    .map_err(|e| AgentError::ReadError {
                        path: profile.to_string(),
                        source: e,
                    })?;
            return parser::parse_agent_definition(&content).map_err(AgentError::ParseError);
        }
        return Err(AgentError::NotFound(format!("file not found: {profile}")));
    }

    // 3. Error with suggestions
    let builtins = builtin::list_builtin_names();
    Err(AgentError::NotFound(format!(
        "unknown profile '{profile}'. Available built-in profiles: {}",
        builtins.join(", ")
    )))
}
