//! docsmith — AI-powered documentation generation CLI (library crate).
//!
//! Re-exports public modules for integration tests and external use.

pub mod agents;
pub mod analyzer;
pub mod config;
pub mod constants;
pub mod env;
pub mod generator;
pub mod models;
pub mod pipeline;
pub mod providers;
pub mod publisher;
pub mod reviewer;
pub mod security;
