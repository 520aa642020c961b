// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of Liquicomun.

//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "liquicomun")]
#[command(author, version, about = "REE liquicomun settlement files")]
#[command(
    long_about = "Loads loss and price files of the monthly ESIOS liquicomun bundles.\n\
    \nFiles are looked up on disk first, then in the cache, and downloaded from ESIOS\n\
    (ESIOS_TOKEN required) when no usable copy exists.\n\
    \nExamples:\n  \
    liquicomun load A1_prmdiari_20160301_20160331\n  \
    liquicomun audit ./C3_perd20A_20160301_20160331 --start-day 5\n  \
    liquicomun losses --tariff 2.0TD --start 2021-06-01 --end 2021-06-30 --coefficients\n  \
    liquicomun clear-cache --revision A1"
)]
pub struct Cli {
    /// Configuration file (TOML, or JSON with a .json extension)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Load a file and print a summary of its grid
    Load(LoadArgs),

    /// Print the hourly values of a file as CSV
    Audit(AuditArgs),

    /// Load the losses of a tariff for a month
    #[command(
        long_about = "Build the loss file name from a tariff label and a date range and load it.\n\
        \nWith --coefficients the hourly Kreal values (Kestimado when no real ones are\n\
        published) are weighted by the standard loss coefficients of the tariff instead.\n\
        \nExamples:\n  \
        liquicomun losses --tariff 2.0A --start 2016-03-01 --end 2016-03-31\n  \
        liquicomun losses --tariff 3.0A --start 2016-03-01 --end 2016-03-31 --subsystem baleares"
    )]
    Losses(LossesArgs),

    /// Remove cached files of one revision, or of all of them
    ClearCache(ClearCacheArgs),
}

#[derive(Debug, Parser)]
pub struct LoadArgs {
    /// File path or template name, e.g. A1_prmdiari_20160301_20160331
    pub file: PathBuf,
}

#[derive(Debug, Parser)]
pub struct AuditArgs {
    pub file: PathBuf,

    /// First day to export (default: 1)
    #[arg(long)]
    pub start_day: Option<u32>,

    /// Last day to export (default: end of month)
    #[arg(long)]
    pub end_day: Option<u32>,
}

#[derive(Debug, Parser)]
pub struct LossesArgs {
    /// Tariff label, e.g. 2.0A, 3.0TD, 6.1B
    #[arg(long)]
    pub tariff: String,

    /// First day of the month (YYYY-MM-DD)
    #[arg(long)]
    pub start: String,

    /// Last day of the month (YYYY-MM-DD)
    #[arg(long)]
    pub end: String,

    #[arg(long, default_value = "peninsula")]
    pub subsystem: String,

    /// Weigh Kreal/Kestimado values by the loss coefficients
    #[arg(long)]
    pub coefficients: bool,

    /// Revision used in the requested name
    #[arg(long, default_value = "A1")]
    pub version: String,
}

#[derive(Debug, Parser)]
pub struct ClearCacheArgs {
    /// Revision tag (C7..A1), all when omitted
    #[arg(long)]
    pub revision: Option<String>,
}
