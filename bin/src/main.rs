//! finstat CLI binary.
//!
//! Fetches financial statements from Financial Modeling Prep and prints them
//! as tables or JSON.

mod cmd;
mod output;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use finstat_fmp::FmpCollector;
use finstat_traits::{
    DEFAULT_LIMIT, DEFAULT_PERIOD, FinstatError, FixedIntervalThrottle, StatementKind,
};
use output::OutputFormat;
use std::{io, process, time::Duration};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "finstat")]
#[command(about = "Fetch financial statements for publicly traded companies", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch income statements
    Income(FetchArgs),

    /// Fetch balance sheets
    Balance(FetchArgs),

    /// Fetch cash flow statements
    Cashflow(FetchArgs),

    /// Fetch financial ratios
    Ratios(FetchArgs),

    /// Fetch all four statement types
    All(FetchArgs),
}

#[derive(Args)]
struct FetchArgs {
    /// Ticker symbols
    #[arg(required = true, value_delimiter = ',')]
    tickers: Vec<String>,

    /// Reporting period (annual or quarter)
    #[arg(short, long, default_value = DEFAULT_PERIOD)]
    period: String,

    /// Number of periods to fetch (1-100)
    #[arg(short, long, default_value_t = DEFAULT_LIMIT, allow_negative_numbers = true)]
    limit: i64,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Space requests to stay under this many per minute
    #[arg(long)]
    rate_per_minute: Option<u32>,

    /// FMP API key (defaults to the FMP_API_KEY environment variable)
    #[arg(long)]
    api_key: Option<String>,
}

#[tokio::main]
async fn main() {
    init_tracing();

    if let Err(e) = run().await {
        match e.downcast_ref::<FinstatError>() {
            Some(FinstatError::InvalidInput(message)) => eprintln!("Validation error: {message}"),
            Some(FinstatError::Provider(message)) => {
                eprintln!("Error retrieving data: {message}");
            }
            _ => eprintln!("Error: {e:#}"),
        }
        process::exit(1);
    }
}

/// Log to stderr so JSON on stdout stays parseable. `RUST_LOG` overrides the
/// default `info` level.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    let (selection, args) = match cli.command {
        Commands::Income(args) => (Some(StatementKind::IncomeStatement), args),
        Commands::Balance(args) => (Some(StatementKind::BalanceSheet), args),
        Commands::Cashflow(args) => (Some(StatementKind::CashFlow), args),
        Commands::Ratios(args) => (Some(StatementKind::Ratios), args),
        Commands::All(args) => (None, args),
    };

    let collector = build_collector(args.api_key)?;

    // Each ticker costs one request per statement type.
    let requests_per_ticker = if selection.is_some() { 1 } else { 4 };
    let throttle = args.rate_per_minute.map(|rate| {
        FixedIntervalThrottle::new(rate, Duration::from_secs(60) * requests_per_ticker)
    });

    let job = cmd::fetch::FetchJob {
        selection,
        tickers: &args.tickers,
        period: &args.period,
        limit: args.limit,
        format: args.format,
    };
    cmd::fetch::run(&collector, &job, throttle.as_ref()).await
}

fn build_collector(api_key: Option<String>) -> Result<FmpCollector> {
    // Try to load .env file (ignore errors if not found)
    let _ = dotenvy::dotenv();

    let builder = FmpCollector::builder();
    let builder = match api_key {
        Some(key) => builder.api_key(key),
        None => builder,
    };
    builder.build().context("could not set up the FMP collector")
}
