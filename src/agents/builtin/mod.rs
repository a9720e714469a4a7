//! Built-in agent profile registry.
//!
//! Profiles are embedded via `include_str!` so they ship with the binary.

use crate::agents::parser;
use crate::models::AgentDefinition;

const GENERATOR_MD: &str = include_str!("generator.md");
const REVIEWER_MD: &str = include_str!("reviewer.md");

/// List of all built-in profile names.
const BUILTIN_NAMES: &[&str] = &["generator", "reviewer"];

/// Get a built-in agent definition by name.
pub fn get_builtin(name: &str) -> Option<AgentDefinition> {
    let md = match name {
        "generator" => GENERATOR_MD,
        "reviewer" => REVIEWER_MD,
        _ => return None,
    };

    parser::parse_agent_definition(md).ok()
}

/// List all available built-in profile names.
pub fn list_builtin_names() -> Vec<&'static str> {
    BUILTIN_NAMES.to_vec()
}
