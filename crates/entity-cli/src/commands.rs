use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use entity_cli::output::{companies_table, render_resolution, stats_tables};
use entity_core::{AppConfig, CompanyRecord, EntityIdentity, ListQuery};

use crate::cli::{Cli, ListArgs, MatchArgs, NormalizeArgs, ResolveArgs, StatsArgs};

/// Configuration from `--config`, with `--data` replacing the data paths.
pub fn load_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::load(path)
            .with_context(|| format!("load config {}", path.display()))?,
        None => AppConfig::default(),
    };
    if !cli.data.is_empty() {
        config.data.paths.clone_from(&cli.data);
    }
    Ok(config)
}

fn open_service(config: &AppConfig) -> Result<EntityIdentity> {
    let service = EntityIdentity::load(config).context("load reference data")?;
    info!(
        records = service.snapshot().len(),
        "reference database ready"
    );
    Ok(service)
}

pub fn run_normalize(config: &AppConfig, args: &NormalizeArgs) -> Result<()> {
    let resolver = config.build_resolver().context("build normalizer")?;
    for name in &args.names {
        println!("{name} -> {}", resolver.normalizer().normalize(name));
    }
    Ok(())
}

pub fn run_list(config: &AppConfig, args: &ListArgs) -> Result<()> {
    let service = open_service(config)?;
    let query = ListQuery {
        country: args.country.clone(),
        search: args.search.clone(),
        limit: args.limit,
    };
    let records = service.list_companies(&query);
    if args.json {
        let view: Vec<&CompanyRecord> = records.iter().map(Arc::as_ref).collect();
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        println!("{}", companies_table(&records));
        println!("{} companies", records.len());
    }
    Ok(())
}

pub fn run_match(config: &AppConfig, args: &MatchArgs) -> Result<()> {
    let service = open_service(config)?;
    let found = service.match_company(&args.name, args.country.as_deref());
    if args.json {
        println!("{}", serde_json::to_string_pretty(&found.as_deref())?);
        return Ok(());
    }
    match found {
        Some(record) => match record.lei() {
            Some(lei) => println!("{} ({}, LEI {lei})", record.name(), record.country()),
            None => println!("{} ({})", record.name(), record.country()),
        },
        None => println!("no match"),
    }
    Ok(())
}

pub fn run_resolve(config: &AppConfig, args: &ResolveArgs) -> Result<()> {
    let service = open_service(config)?;
    let result = service.resolve_company(&args.name, args.country.as_deref());
    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", render_resolution(&result, args.top));
    }
    Ok(())
}

pub fn run_stats(config: &AppConfig, args: &StatsArgs) -> Result<()> {
    let service = open_service(config)?;
    let stats = service.stats();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        let (summary, countries) = stats_tables(&stats);
        println!("{summary}");
        println!("{countries}");
    }
    Ok(())
}
