//! Configuration loading and layering.
//!
//! Handles `.docsmith.toml` loading, environment variable resolution,
//! and CLI flag merging with proper priority ordering.

pub mod loader;

pub use loader::{AnalyzerConfig, Config, GithubConfig, PipelineConfig, ProviderConfig};
