//! Rendering fetched statements for the terminal.

use crate::cmd::fetch::Fetched;
use anyhow::Result;
use clap::ValueEnum;
use finstat_traits::{StatementRequest, StatementTable};
use serde_json::Value;
use std::fmt::Write;

/// Columns listed before the preview is cut short.
const COLUMN_PREVIEW: usize = 10;

/// How results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Summary plus a DataFrame per statement.
    Text,
    /// One JSON object keyed by ticker.
    Json,
}

/// Human-readable report for one ticker.
pub(crate) fn render_text(
    ticker: &str,
    request: &StatementRequest,
    fetched: &Fetched,
) -> Result<String> {
    let mut out = String::new();
    match fetched {
        Fetched::Table(table) => render_table(&mut out, ticker, request, table)?,
        Fetched::Bundle(bundle) => {
            for (_, table) in bundle.iter() {
                render_table(&mut out, ticker, request, table)?;
            }
        }
    }
    Ok(out)
}

fn render_table(
    out: &mut String,
    ticker: &str,
    request: &StatementRequest,
    table: &StatementTable,
) -> Result<()> {
    writeln!(
        out,
        "=== {ticker}: {} ({}, limit {}) ===",
        table.kind().label(),
        request.raw_period(),
        request.raw_limit()
    )?;

    if table.is_empty() {
        writeln!(out, "No {} data found for {ticker}", table.kind().label())?;
        return Ok(());
    }

    writeln!(out, "Retrieved {} records", table.len())?;
    writeln!(out, "Columns: {}", column_preview(&table.columns()))?;
    writeln!(out, "{}", table.to_dataframe()?)?;
    Ok(())
}

fn column_preview(columns: &[&str]) -> String {
    let shown = columns
        .iter()
        .take(COLUMN_PREVIEW)
        .copied()
        .collect::<Vec<_>>()
        .join(", ");
    match columns.len().checked_sub(COLUMN_PREVIEW) {
        Some(hidden) if hidden > 0 => format!("{shown} (+{hidden} more)"),
        _ => shown,
    }
}

/// JSON value for one ticker: a record array, or an object keyed by statement.
pub(crate) fn to_json(fetched: &Fetched) -> Result<Value> {
    let value = match fetched {
        Fetched::Table(table) => serde_json::to_value(table)?,
        Fetched::Bundle(bundle) => serde_json::to_value(bundle)?,
    };
    Ok(value)
}
