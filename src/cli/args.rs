//! Clap argument types and validation.

use clap::Parser;
use std::path::PathBuf;

/// AI-powered documentation generation CLI.
#[derive(Parser, Debug)]
#[command(
    name = "docsmith",
    version = docsmith::constants::VERSION,
    about = "Generate, review, and publish repository documentation"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Generate documentation for a repository and open a pull request.
    Generate(Box<GenerateArgs>),

    /// Print version information.
    Version,
}

/// Arguments for the `generate` subcommand.
#[derive(Parser, Debug)]
pub struct GenerateArgs {
    /// HTTPS URL of the GitHub repository to document.
    pub repo_url: String,

    /// GitHub access token (overrides config and GITHUB_TOKEN).
    #[arg(long)]
    pub github_token: Option<String>,

    /// LLM provider: anthropic, openai, gemini, deepseek, groq, openai-compatible.
    #[arg(long)]
    pub provider: Option<String>,

    /// Model identifier (overrides the provider default).
    #[arg(long)]
    pub model: Option<String>,

    /// Maximum generate/review iterations.
    #[arg(long)]
    pub max_iterations: Option<u32>,

    /// Directory (relative to the repo root) generated docs are written to.
    #[arg(long)]
    pub output_dir: Option<String>,

    /// Base directory for temporary working copies (default: system temp dir).
    #[arg(long)]
    pub work_dir: Option<PathBuf>,

    /// Branch the pull request targets.
    #[arg(long)]
    pub target_branch: Option<String>,

    /// Generate and review but skip branch/commit/push/PR.
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_generate_minimal() {
        let cli = Cli::parse_from(["docsmith", "generate", "https://github.com/o/r"]);
        match cli.command {
            Command::Generate(args) => {
                assert_eq!(args.repo_url, "https://github.com/o/r");
                assert!(!args.dry_run);
                assert!(args.github_token.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parse_generate_with_flags() {
        let cli = Cli::parse_from([
            "docsmith",
            "generate",
            "https://github.com/o/r",
            "--github-token",
            "ghp_x",
            "--provider",
            "openai",
            "--model",
            "gpt-4o",
            "--max-iterations",
            "5",
            "--dry-run",
        ]);
        match cli.command {
            Command::Generate(args) => {
                assert_eq!(args.github_token.as_deref(), Some("ghp_x"));
                assert_eq!(args.provider.as_deref(), Some("openai"));
                assert_eq!(args.model.as_deref(), Some("gpt-4o"));
                assert_eq!(args.max_iterations, Some(5));
                assert!(args.dry_run);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parse_version() {
        let cli = Cli::parse_from(["docsmith", "version"]);
        assert!(matches!(cli.command, Command::Version));
    }

    #[test]
    fn missing_repo_url_is_an_error() {
        let result = Cli::try_parse_from(["docsmith", "generate"]);
        assert!(result.is_err());
    }
}
