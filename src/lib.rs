pub mod api;
pub mod balance;
pub mod cache;
pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod http;
pub mod lookup;
pub mod rate_limiter;
pub mod report;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use log::info;
use std::path::Path;

use crate::cache::Cache;
use crate::cli::{BalanceOptions, Cli, Command};
use crate::config::AppConfig;
use crate::domain::{MatchResult, PlayerPool, PlayerRecord};
use crate::lookup::{MmrLookup, RatingLookup, RatingResolver, StaticRatings};

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub fn handle_balance(file: &Path, options: &BalanceOptions, json: bool) -> Result<()> {
    let config = build_config(options);
    config.balance.validate()?;

    let records = domain::load_records(file, config.balance.max_affinity)?;
    info!("Loaded {} player records from {}", records.len(), file.display());

    let pool = resolve_pool(&records, options, &config)?;
    let result = run_search(&pool, &config)?;

    let rendered = if json {
        report::render_json(&result)?
    } else {
        report::render_table(&result)
    };
    println!("{}", rendered);
    Ok(())
}

pub fn handle_rating(name: &str, options: &BalanceOptions) -> Result<()> {
    let config = build_config(options);
    let rating = with_lookup(options, &config, |lookup| {
        Ok(RatingResolver::new(lookup, config.lookup.fallback_rating).resolve(name))
    })?;

    println!("{}: {:.0} ({:?})", name, rating.value, rating.source);
    Ok(())
}

pub fn handle_completions(shell: Shell) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
    Ok(())
}

/// Start from the selected profile and apply individual overrides
pub fn build_config(options: &BalanceOptions) -> AppConfig {
    let mut config = AppConfig::from_profile(options.profile);

    if let Some(fill_weight) = options.fill_weight {
        config.balance.fill_weight = fill_weight;
    }
    if let Some(max_affinity) = options.max_affinity {
        config.balance.max_affinity = max_affinity;
    }
    if let Some(aggregate) = options.bot_lane {
        config.balance.bot_lane_aggregate = aggregate;
    }
    if let Some(role_search) = options.role_search {
        config.balance.role_search = role_search;
    }
    if let Some(fallback) = options.fallback_rating {
        config.lookup.fallback_rating = fallback;
    }
    config.parallel = options.parallel;

    config
}

pub fn run_search(pool: &PlayerPool, config: &AppConfig) -> Result<MatchResult> {
    let result = if config.parallel {
        balance::optimize_parallel(pool, &config.balance)?
    } else {
        balance::optimize(pool, &config.balance)?
    };
    Ok(result)
}

fn resolve_pool(records: &[PlayerRecord], options: &BalanceOptions, config: &AppConfig) -> Result<PlayerPool> {
    with_lookup(options, config, |lookup| {
        let mut resolver = RatingResolver::new(lookup, config.lookup.fallback_rating);
        Ok(resolver.resolve_pool(records)?)
    })
}

/// Run `f` with the static ratings file when one was given, the network otherwise
fn with_lookup<T>(
    options: &BalanceOptions,
    config: &AppConfig,
    f: impl FnOnce(Box<dyn RatingLookup>) -> Result<T>,
) -> Result<T> {
    let lookup: Box<dyn RatingLookup> = match &options.ratings {
        Some(path) => Box::new(StaticRatings::from_file(path)?),
        None => Box::new(network_lookup(options, config)?),
    };
    f(lookup)
}

fn network_lookup(options: &BalanceOptions, config: &AppConfig) -> Result<MmrLookup> {
    let cache = Cache::new(&config.lookup.cache_dir).context("Failed to open lookup cache")?;
    if options.refresh_cache {
        cache.clear()?;
        info!("Cleared lookup cache in {}", config.lookup.cache_dir);
    }
    MmrLookup::new(&config.lookup, Some(cache))
}
