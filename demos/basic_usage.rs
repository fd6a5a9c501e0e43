//! Basic finstat usage against the live FMP API.
//!
//! This example demonstrates:
//! - Building a collector from `FMP_API_KEY` (or a `.env` file)
//! - Fetching each statement type for one ticker
//! - Fetching all four statements at once
//! - Converting a table to a Polars DataFrame
//!
//! Run with `cargo run -p finstat-demos --example basic_usage`.

use finstat::prelude::*;

/// Ticker for the per-statement fetches.
const TICKER: &str = "AAPL";

/// Ticker for the aggregate fetch.
const BUNDLE_TICKER: &str = "MSFT";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
    let _ = dotenvy::dotenv();

    match run().await {
        Ok(()) => println!("\n=== Example completed successfully! ==="),
        Err(FinstatError::InvalidInput(message)) => {
            eprintln!("Validation error: {message}");
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("\nMake sure you have:");
            eprintln!("1. Created a .env file");
            eprintln!("2. Set FMP_API_KEY in your .env file");
            std::process::exit(1);
        }
    }
}

async fn run() -> Result<()> {
    // Initialize collector (reads FMP_API_KEY)
    let collector = FmpCollector::from_env()?;
    let request = StatementRequest::new(TICKER).period("annual").limit(5);

    println!("\n=== Fetching Income Statement for {TICKER} ===");
    let income = collector.income_statement(&request).await?;
    println!("Retrieved {} records", income.len());
    if !income.is_empty() {
        let columns = income.columns();
        println!("\nColumns: {:?}", &columns[..columns.len().min(10)]);
        let first_date = income
            .dates()
            .first()
            .copied()
            .flatten()
            .map_or_else(|| "N/A".to_string(), |date| date.to_string());
        println!("\nFirst record date: {first_date}");
    }

    println!("\n=== Fetching Balance Sheet for {TICKER} ===");
    let balance = collector.balance_sheet(&request).await?;
    println!("Retrieved {} records", balance.len());

    println!("\n=== Fetching Cash Flow Statement for {TICKER} ===");
    let cashflow = collector.cash_flow_statement(&request).await?;
    println!("Retrieved {} records", cashflow.len());

    println!("\n=== Fetching Financial Ratios for {TICKER} ===");
    let ratios = collector.financial_ratios(&request).await?;
    println!("Retrieved {} records", ratios.len());

    println!("\n=== Fetching All Financial Data for {BUNDLE_TICKER} ===");
    let bundle = collector
        .all_financials(&StatementRequest::new(BUNDLE_TICKER).limit(3))
        .await?;
    for (kind, table) in bundle.iter() {
        println!("{kind}: {} records", table.len());
    }

    let ratios_df = bundle.get(StatementKind::Ratios).to_dataframe()?;
    println!("\n{ratios_df}");

    Ok(())
}
