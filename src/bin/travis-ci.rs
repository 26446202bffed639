//! Travis CI command-line binary.
//!
//! Enables, disables, and inspects Travis CI for GitHub repositories.

use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use serde::Serialize;
use tabled::Table;
use tracing_subscriber::EnvFilter;
use travis_ci_provider::cli::{Cli, Command};
use travis_ci_provider::output::{page_summary, PrettyPrint, RepoStatus, RepositoryRow};
use travis_ci_provider::{
    CiProvider, List, ProviderConfig, ProviderKind, RepoOutcome, Repository, RepositoryListQuery,
    SyncOptions, SyncProgress, TravisError, TravisProvider, User,
};

/// Exit status when the repository is not known to Travis.
const EXIT_NOT_FOUND: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let provider = match build_provider(&cli).await {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: {e}");
            if e.is_config_error() {
                eprintln!("Hint: Set TRAVIS_TOKEN (or GITHUB_TOKEN) environment variable");
            }
            return ExitCode::FAILURE;
        }
    };

    match run(&provider, cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn build_provider(cli: &Cli) -> travis_ci_provider::Result<TravisProvider> {
    let mut config = ProviderConfig::from_env()?;
    if cli.pro {
        config.provider = Some(ProviderKind::TravisPro.to_string());
    }
    if let Some(ref org) = cli.org {
        config.github_organization = Some(org.clone());
    }
    TravisProvider::from_config(&config).await
}

async fn run(provider: &TravisProvider, cli: Cli) -> travis_ci_provider::Result<ExitCode> {
    match cli.command {
        Command::Enable { repo } => {
            let outcome = provider.enable_ci(&repo).await?;
            report_repo(outcome, cli.json)
        }
        Command::Disable { repo } => {
            let outcome = provider.disable_ci(&repo).await?;
            report_repo(outcome, cli.json)
        }
        Command::Status { repo } => match provider.ci_enabled(&repo).await? {
            RepoOutcome::Found(active) => {
                let status = RepoStatus {
                    repo: provider.resolver().full_name(&repo)?,
                    active,
                };
                output_single(&status, cli.json)?;
                Ok(ExitCode::SUCCESS)
            }
            RepoOutcome::NotFound(name) => Ok(not_found(&name)),
        },
        Command::Repos {
            owner,
            active,
            offset,
            limit,
        } => {
            let owner = owner
                .or_else(|| provider.resolver().default_org().map(str::to_string))
                .ok_or_else(|| {
                    TravisError::ConfigMissing("--owner or --org is required".to_string())
                })?;
            let query = RepositoryListQuery {
                active: active.then_some(true),
                ..RepositoryListQuery::for_owner(&owner)
            };
            let page = Repository::list_page(
                provider.client(),
                &query,
                offset.unwrap_or(0),
                limit.unwrap_or(25),
            )
            .await?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&page.items)?);
            } else {
                let rows: Vec<RepositoryRow> = page.iter().map(RepositoryRow::from).collect();
                println!("{}", Table::new(rows));
                if let Some(summary) = page_summary(&page) {
                    println!("\n{summary}");
                }
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Sync {
            wait,
            timeout,
            interval,
        } => {
            if !wait {
                provider.sync(None, None).await?;
                println!("Sync requested");
                return Ok(ExitCode::SUCCESS);
            }

            let options = SyncOptions::default()
                .with_timeout(Duration::from_secs(timeout))
                .with_poll_interval(Duration::from_secs(interval.max(1)));

            let cancel = options.cancel.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    cancel.cancel();
                }
            });

            let mut progress = |user: &User| {
                eprintln!("Waiting for {} to finish syncing...", user.login);
            };
            provider
                .sync(Some(&options), Some(&mut progress as SyncProgress<'_>))
                .await?;
            println!("Sync finished");
            Ok(ExitCode::SUCCESS)
        }
        Command::Whoami => {
            let user = provider.current_user().await?;
            output_single(&user, cli.json)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn report_repo(
    outcome: RepoOutcome<Repository>,
    json: bool,
) -> travis_ci_provider::Result<ExitCode> {
    match outcome {
        RepoOutcome::Found(repo) => {
            output_single(&repo, json)?;
            Ok(ExitCode::SUCCESS)
        }
        RepoOutcome::NotFound(name) => Ok(not_found(&name)),
    }
}

fn not_found(name: &str) -> ExitCode {
    eprintln!("Repository '{name}' is not known to Travis");
    eprintln!("Hint: Run 'travis-ci sync --wait' if it was created recently");
    ExitCode::from(EXIT_NOT_FOUND)
}

fn output_single<T: Serialize + PrettyPrint>(item: &T, json: bool) -> travis_ci_provider::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(item)?);
    } else {
        println!("{}", item.pretty_print());
    }
    Ok(())
}
