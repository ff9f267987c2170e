//! Non-interactive subcommands

use crate::batch::{self, BatchSummary};
use crate::cli::{Cli, Commands};
use crate::discovery::discover;
use crate::domain_models::{group_prs, ExecutionMode, Pr, TitleParser};
use crate::enrichment::enrich;
use crate::error::Error;
use crate::executor::Executor;
use crate::output;
use anyhow::{Context, Result};
use gh_client::GitHubClient;
use gh_dep_config::{AppConfig, GroupCache};
use std::process::ExitCode;
use std::sync::Arc;

pub async fn run(command: &Commands, cli: &Cli, config: &AppConfig) -> Result<ExitCode> {
    match command {
        Commands::List { group, json } => list(cli, config, *group, *json).await,
        Commands::Groups { json } => groups(*json),
        Commands::Approve { group, dry_run } => {
            execute_group(cli, config, group, ExecutionMode::Approve, *dry_run).await
        }
        Commands::Merge { group, dry_run, .. } => {
            execute_group(cli, config, group, ExecutionMode::Merge, *dry_run).await
        }
    }
}

pub async fn connect() -> Result<Arc<dyn GitHubClient>> {
    let client = gh_client::connect()
        .await
        .context("Failed to connect to GitHub")?;
    Ok(Arc::new(client))
}

/// Discover and enrich the PRs in scope
pub async fn load_prs(
    client: &Arc<dyn GitHubClient>,
    cli: &Cli,
    config: &AppConfig,
) -> Result<Vec<Pr>> {
    let scope = cli.scope(config)?;
    let mut prs = discover(client.as_ref(), &scope)
        .await
        .context("Failed to search pull requests")?;
    let options = cli.options(config)?;
    enrich(
        Arc::clone(client),
        &mut prs,
        cli.workers(config),
        options.request_timeout,
    )
    .await;
    Ok(prs)
}

async fn list(cli: &Cli, config: &AppConfig, group: bool, json: bool) -> Result<ExitCode> {
    // Invalid patterns are reported before anything is fetched
    let parser = TitleParser::new(&config.patterns)?;
    let client = connect().await?;
    let prs = load_prs(&client, cli, config).await?;

    if !group {
        if json {
            println!("{}", output::to_json(&prs)?);
        } else {
            print!("{}", output::render_table(&prs));
        }
        return Ok(ExitCode::SUCCESS);
    }

    let groups = group_prs(&prs, &parser);
    GroupCache::new(groups.clone())
        .save()
        .map_err(Error::Cache)?;

    if json {
        println!("{}", output::to_json(&output::group_summaries(&groups))?);
    } else {
        print!("{}", output::render_groups(&groups));
    }
    Ok(ExitCode::SUCCESS)
}

fn groups(json: bool) -> Result<ExitCode> {
    let cache = GroupCache::<Pr>::load()
        .map_err(Error::Cache)?
        .ok_or(Error::NoCachedGroups)?;

    if json {
        println!("{}", output::to_json(&output::group_summaries(&cache.groups))?);
    } else {
        print!("{}", output::render_group_summary(&cache.groups));
    }
    Ok(ExitCode::SUCCESS)
}

async fn execute_group(
    cli: &Cli,
    config: &AppConfig,
    key: &str,
    mode: ExecutionMode,
    dry_run: bool,
) -> Result<ExitCode> {
    let options = cli.options(config)?;
    let prs = batch::load_group(key)?;

    if dry_run {
        println!("Dry run: {} PRs in {}", prs.len(), key);
        for line in batch::describe(&prs, mode, &options) {
            println!("  {}", line);
        }
        return Ok(ExitCode::SUCCESS);
    }

    let client = connect().await?;
    let executor = Executor::new(client, options);
    let summary: BatchSummary =
        batch::run_batch(&executor, prs, mode, cli.workers(config), |result| {
            println!("{}", result)
        })
        .await;

    println!("\n{}", summary);
    if summary.failed > 0 {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
