// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Command-line driver: enumerate conference matrices up to a column count
//! and report the number of isomorphism classes at each level.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use conference_search::candidates::DEFAULT_MEMORY_BUDGET;
use conference_search::extend::DEFAULT_PROGRESS_INTERVAL;
use conference_search::search::BranchConfig;
use conference_search::{
    ConferenceType, DesignParameters, ExtendOptions, ExtensionDriver, IsomorphismType,
};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Kind {
    Normal,
    Diagonal,
    Double,
}

impl From<Kind> for ConferenceType {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Normal => ConferenceType::Normal,
            Kind::Diagonal => ConferenceType::Diagonal,
            Kind::Double => ConferenceType::Double,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Isomorphism {
    Full,
    Restricted,
}

impl From<Isomorphism> for IsomorphismType {
    fn from(itype: Isomorphism) -> Self {
        match itype {
            Isomorphism::Full => IsomorphismType::Full,
            Isomorphism::Restricted => IsomorphismType::Restricted,
        }
    }
}

/// Enumerate conference matrices column by column
#[derive(Parser, Debug)]
#[command(name = "conference")]
#[command(version)]
#[command(about = "Enumerate conference matrices up to isomorphism")]
struct Cli {
    /// Number of rows N (even, at least 4)
    rows: usize,

    /// Number of columns to reach (defaults to N)
    columns: Option<usize>,

    /// Kind of matrix to enumerate
    #[arg(short, long, value_enum, default_value_t = Kind::Normal)]
    kind: Kind,

    /// Isomorphism used for deduplication
    #[arg(short, long, value_enum, default_value_t = Isomorphism::Full)]
    isomorphism: Isomorphism,

    /// Require balanced +1/-1 counts (double conference designs)
    #[arg(long)]
    j1zero: bool,

    /// Require vanishing J3 characteristics (double conference designs)
    #[arg(long)]
    j3zero: bool,

    /// Worker threads (defaults to one per core)
    #[arg(short, long)]
    threads: Option<usize>,

    /// Row at which branch and bound applies the partial J3 bound
    #[arg(long)]
    inline_row: Option<usize>,

    /// Memory budget for precomputed candidates, in bytes
    #[arg(long, default_value_t = DEFAULT_MEMORY_BUDGET)]
    memory_budget: usize,

    /// Parents between progress messages (0 disables them)
    #[arg(long, default_value_t = DEFAULT_PROGRESS_INTERVAL)]
    progress_interval: usize,

    /// Print the representatives of the final level
    #[arg(short, long)]
    print: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let columns = cli.columns.unwrap_or(cli.rows);
    let params = DesignParameters::with_options(
        cli.rows,
        columns,
        cli.kind.into(),
        cli.isomorphism.into(),
        cli.j1zero,
        cli.j3zero,
    )
    .context("invalid design parameters")?;
    let options = ExtendOptions {
        progress_interval: cli.progress_interval,
        threads: cli.threads,
        memory_budget: cli.memory_budget,
        branch: BranchConfig {
            inline_row: cli.inline_row,
            ..BranchConfig::default()
        },
    };
    let driver = ExtensionDriver::new(params, options)
        .with_context(|| format!("cannot enumerate {} designs", params.ctype()))?;
    tracing::info!(?params, strategy = driver.strategy_name(), "starting enumeration");

    let levels = driver.run(None).context("enumeration failed")?;
    println!(
        "N={} type={} isomorphism={}",
        params.rows(),
        params.ctype(),
        params.itype()
    );
    for level in &levels {
        println!(
            "columns={:>3} extensions={:>10} classes={:>8}",
            level.columns,
            level.extensions,
            level.representatives.len()
        );
    }
    if cli.print {
        if let Some(last) = levels.last() {
            for (i, m) in last.representatives.iter().enumerate() {
                println!("# class {}", i);
                print!("{}", m);
            }
        }
    }
    Ok(())
}
