//! Fetch command implementation.

use crate::output::{self, OutputFormat};
use anyhow::Result;
use finstat_traits::{
    FinancialBundle, FixedIntervalThrottle, StatementCollector, StatementKind, StatementRequest,
    StatementTable,
};
use serde_json::{Map, Value};
use std::collections::HashSet;
use tracing::debug;

/// What to fetch and how to print it.
#[derive(Debug)]
pub(crate) struct FetchJob<'a> {
    /// One statement type, or `None` for all four.
    pub(crate) selection: Option<StatementKind>,
    pub(crate) tickers: &'a [String],
    pub(crate) period: &'a str,
    pub(crate) limit: i64,
    pub(crate) format: OutputFormat,
}

/// Result for one ticker.
#[derive(Debug)]
pub(crate) enum Fetched {
    Table(StatementTable),
    Bundle(FinancialBundle),
}

/// Fetch every ticker in order and print the results.
///
/// Tickers that normalize to one already seen are skipped. Stops at the
/// first failure. Text output is printed per ticker as it
/// arrives; JSON output is printed once all tickers succeeded.
pub(crate) async fn run(
    collector: &dyn StatementCollector,
    job: &FetchJob<'_>,
    throttle: Option<&FixedIntervalThrottle>,
) -> Result<()> {
    debug!(
        tickers = job.tickers.len(),
        throttled = throttle.is_some(),
        "Starting fetch"
    );
    let mut json = Map::new();
    let mut seen = HashSet::new();

    for ticker in job.tickers {
        let request = StatementRequest::new(ticker.as_str())
            .period(job.period)
            .limit(job.limit);
        // Normalized ticker for display; validation errors surface from the fetch.
        let label = request
            .validate()
            .map_or_else(|_| ticker.clone(), |valid| valid.ticker.to_string());
        if !seen.insert(label.clone()) {
            debug!(ticker = %label, "Skipping duplicate ticker");
            continue;
        }

        let fetched = match throttle {
            Some(throttle) => {
                throttle
                    .call(|| fetch_one(collector, job.selection, &request))
                    .await?
            }
            None => fetch_one(collector, job.selection, &request).await?,
        };

        match job.format {
            OutputFormat::Text => {
                println!("{}", output::render_text(&label, &request, &fetched)?);
            }
            OutputFormat::Json => {
                json.insert(label, output::to_json(&fetched)?);
            }
        }
    }

    if job.format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&Value::Object(json))?);
    }
    Ok(())
}

async fn fetch_one(
    collector: &dyn StatementCollector,
    selection: Option<StatementKind>,
    request: &StatementRequest,
) -> finstat_traits::Result<Fetched> {
    match selection {
        Some(kind) => collector.statement(kind, request).await.map(Fetched::Table),
        None => collector.all_financials(request).await.map(Fetched::Bundle),
    }
}
