// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of Liquicomun.
//
// Licensed under the Creative Commons Attribution-NonCommercial-NoDerivatives 4.0 International
// (CC BY-NC-ND 4.0). You may use and share this file for non-commercial purposes only and you may not
// create derivatives. See <https://creativecommons.org/licenses/by-nc-nd/4.0/>.
//
// This software is provided "AS IS", without warranty of any kind.
//
// For commercial licensing, please contact: info@solare.cz

//! Liquicomun - command line entry point

mod args;

use anyhow::{Context, Result};
use args::{AuditArgs, ClearCacheArgs, Cli, Commands, LossesArgs};
use chrono::NaiveDate;
use clap::Parser;
use liquicomun_core::{
    EsiosClient, ImportType, Liquicomun, LiquicomunConfig, LoadedFile, LossRequest, RevisionTag,
    Subsystem,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("liquicomun=info,liquicomun_core=info"))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = LiquicomunConfig::load(cli.config.as_deref())?;
    info!("Using cache directory {}", config.cache_dir.display());

    let source = EsiosClient::from_config(&config)?;
    let liquicomun = Liquicomun::new(config, source);

    match cli.command {
        Commands::Load(args) => {
            let loaded = liquicomun.load(&args.file)?;
            print_summary(&loaded);
        }
        Commands::Audit(args) => audit(&liquicomun, &args)?,
        Commands::Losses(args) => {
            let loaded = liquicomun.load_losses(&loss_request(&args)?)?;
            print_summary(&loaded);
        }
        Commands::ClearCache(ClearCacheArgs { revision }) => {
            let revision = revision
                .map(|r| r.parse::<RevisionTag>())
                .transpose()?;
            let removed = liquicomun.clear_cache(revision)?;
            println!("Removed {removed} cached files");
        }
    }
    Ok(())
}

fn loss_request(args: &LossesArgs) -> Result<LossRequest> {
    let start = NaiveDate::parse_from_str(&args.start, "%Y-%m-%d")
        .with_context(|| format!("Invalid start date '{}'", args.start))?;
    let end = NaiveDate::parse_from_str(&args.end, "%Y-%m-%d")
        .with_context(|| format!("Invalid end date '{}'", args.end))?;
    let import = if args.coefficients {
        ImportType::Coefficients
    } else {
        ImportType::LossFiles
    };

    Ok(LossRequest::new(args.tariff.clone(), start, end, import)
        .with_subsystem(args.subsystem.parse::<Subsystem>()?)
        .with_version(args.version.parse::<RevisionTag>()?))
}

fn audit(liquicomun: &Liquicomun<EsiosClient>, args: &AuditArgs) -> Result<()> {
    let loaded = liquicomun.load(&args.file)?;
    let mut writer = csv::Writer::from_writer(std::io::stdout().lock());
    for record in loaded.grid.audit_data(args.start_day, args.end_day) {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

fn print_summary(loaded: &LoadedFile) {
    let grid = &loaded.grid;
    println!("file:     {}", loaded.file_name);
    if let Some(periods) = &loaded.periods_file {
        println!("periods:  {periods}");
    }
    println!("origin:   {}", loaded.origin);
    println!(
        "revision: {}",
        grid.file_version.as_deref().unwrap_or_default()
    );
    println!("version:  {}", grid.version);
    println!(
        "month:    {}-{:02} ({} days)",
        grid.year(),
        grid.month(),
        grid.num_days()
    );
    println!("total:    {:.3}", grid.total_sum());
}
