//! docsmith — AI-powered documentation generation CLI.
//!
//! Entry point and error handling boundary. Uses `anyhow` for
//! ergonomic error propagation and user-facing messages.

mod cli;

use docsmith::config;
use docsmith::constants;
use docsmith::env;
use docsmith::pipeline;
use docsmith::providers;
use docsmith::publisher;
use docsmith::security;

use std::path::Path;
use std::process;

use anyhow::{bail, Context, Result};
use clap::Parser;
use colored::Colorize;

use cli::args::{Cli, Command, GenerateArgs};
use config::Config;
use env::Env;
use pipeline::{Pipeline, RunOptions};
use providers::rig::RigProvider;
use publisher::GitPublisher;
use security::SecretStore;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {err:#}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Generate(args) => run_generate(*args).await,
        Command::Version => run_version(),
    }
}

/// Print version information.
fn run_version() -> Result<()> {
    println!("{} {}", constants::APP_NAME.bold(), constants::VERSION.green().bold());
    Ok(())
}

/// Run the full documentation pipeline for one repository.
async fn run_generate(args: GenerateArgs) -> Result<()> {
    let env = Env::real();
    let mut config =
        Config::load(Some(Path::new(".")), &env).context("failed to load configuration")?;

    // CLI flags are the highest-priority layer.
    if let Some(token) = args.github_token {
        config.github.token = Some(token);
    }
    if let Some(provider) = args.provider {
        config.provider.name = provider
            .parse()
            .map_err(|e: String| anyhow::anyhow!(e))
            .context("invalid --provider")?;
    }
    if let Some(model) = args.model {
        config.provider.model = model;
    }
    if let Some(n) = args.max_iterations {
        if n == 0 {
            bail!("--max-iterations must be at least 1");
        }
        config.pipeline.max_review_iterations = n;
    }
    if let Some(output_dir) = args.output_dir {
        config.pipeline.output_dir = output_dir;
    }
    if let Some(target_branch) = args.target_branch {
        config.pipeline.target_branch = target_branch;
    }

    reject_placeholders(&config)?;

    if config.github.token.is_none() && !args.dry_run {
        bail!(
            "no GitHub token configured. Set {}, add it to {}, or pass --github-token \
             (or use --dry-run to skip publishing)",
            constants::ENV_GITHUB_TOKEN,
            constants::CONFIG_FILENAME
        );
    }

    let secrets = SecretStore::new([
        config.provider.api_key.clone(),
        config.github.token.clone(),
    ]);

    let provider =
        RigProvider::new(config.provider.clone()).context("failed to initialize LLM provider")?;
    let git_publisher = GitPublisher::new(
        config.github.token.clone().unwrap_or_default(),
        config.github.api_base.clone(),
        secrets.clone(),
    );

    let options = RunOptions {
        repo_url: args.repo_url,
        work_dir: args.work_dir.unwrap_or_else(std::env::temp_dir),
        dry_run: args.dry_run,
    };

    let pipeline = Pipeline::new(config, &provider, &git_publisher, secrets.clone());
    let outcome = pipeline
        .run(&options)
        .await
        .map_err(|e| anyhow::anyhow!(secrets.redact(&e.to_string())))?;

    for warning in &outcome.warnings {
        eprintln!("{} {warning}", "Warning:".yellow().bold());
    }

    println!(
        "\n{} {} document(s) after {} iteration(s)",
        "Generated".green().bold(),
        outcome.written_files.len(),
        outcome.iterations
    );
    match &outcome.pull_request {
        Some(pr) => println!("Pull request #{} ({}): {}", pr.number, pr.state, pr.url),
        None => println!(
            "Dry run: documentation written to {}",
            outcome.work_dir.display()
        ),
    }

    Ok(())
}

/// Refuse to run with template placeholder credentials left in place.
fn reject_placeholders(config: &Config) -> Result<()> {
    for value in [config.github.token.as_deref(), config.provider.api_key.as_deref()]
        .into_iter()
        .flatten()
    {
        if constants::PLACEHOLDER_CREDENTIALS.contains(&value) {
            bail!(
                "placeholder credential '{value}' detected; replace it with a real \
                 token before running"
            );
        }
    }
    Ok(())
}
