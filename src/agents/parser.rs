//! Markdown + YAML frontmatter parser for agent definitions.

use crate::models::agent::{AgentDefinition, AgentProfile};

/// Parse a markdown file with YAML frontmatter into an AgentDefinition.
///
/// Expected format:
/// ```markdown
/// ---
/// name: generator
/// description: Writes project documentation
/// temperature: 0.3
/// ---
///
/// System prompt content here...
/// ```
pub fn parse_agent_definition(content: &str) -> Result<AgentDefinition, String> {
    let (frontmatter, body) = split_frontmatter(content)?;
    let profile: AgentProfile =
        serde_yaml_ng::from_str(&frontmatter).map_err(|e| format!("invalid frontmatter: {e}"))?;

    Ok(AgentDefinition {
        profile,
        system_prompt: body.trim().to_string(),
    })
}

/// Split content into YAML frontmatter and markdown body.
fn split_frontmatter(content: &str) -> Result<(String, String), String> {
    let content = content.trim();

    if !content.starts_with("---") {
        return Err("agent definition must start with YAML frontmatter (---)".to_string());
    }

    let after_first = &content[3..];
    let end = after_first
        .find("\n---")
        .ok_or_else(|| "unterminated YAML frontmatter (missing closing ---)".to_string())?;

    let frontmatter = after_first[..end].trim().to_string();
    let body = after_first[end + 4..].to_string();

    Ok((frontmatter, body))
}
