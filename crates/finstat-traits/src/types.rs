//! Statement result types.
//!
//! Upstream records are kept exactly as the provider returned them: each
//! [`Record`] is a JSON object whose field order matches the response. A
//! [`StatementTable`] can be turned into a Polars [`DataFrame`] for analysis.

use crate::Result;
use chrono::NaiveDate;
use polars::prelude::*;
use serde::{Serialize, Serializer};
use std::fmt;

/// One reporting period as returned by the provider: field name to value.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// The kinds of financial statement a collector can fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum StatementKind {
    /// Income statement.
    #[serde(rename = "income_statement")]
    IncomeStatement,
    /// Balance sheet.
    #[serde(rename = "balance_sheet")]
    BalanceSheet,
    /// Cash flow statement.
    #[serde(rename = "cashflow")]
    CashFlow,
    /// Financial ratios.
    #[serde(rename = "ratios")]
    Ratios,
}

impl StatementKind {
    /// All statement kinds, in bundle order.
    pub const ALL: [Self; 4] = [
        Self::IncomeStatement,
        Self::BalanceSheet,
        Self::CashFlow,
        Self::Ratios,
    ];

    /// Identifier used as the key in a [`FinancialBundle`].
    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::IncomeStatement => "income_statement",
            Self::BalanceSheet => "balance_sheet",
            Self::CashFlow => "cashflow",
            Self::Ratios => "ratios",
        }
    }

    /// Human readable name for logs and output.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::IncomeStatement => "income statement",
            Self::BalanceSheet => "balance sheet",
            Self::CashFlow => "cash flow statement",
            Self::Ratios => "financial ratios",
        }
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Tabular statement data: one record per reporting period, most recent first
/// as delivered by the provider.
///
/// An empty table is a valid result meaning the provider has no data for the
/// requested ticker and period.
#[derive(Debug, Clone, PartialEq)]
pub struct StatementTable {
    kind: StatementKind,
    records: Vec<Record>,
}

impl StatementTable {
    /// Create a table from provider records.
    #[must_use]
    pub const fn new(kind: StatementKind, records: Vec<Record>) -> Self {
        Self { kind, records }
    }

    /// Create an empty table.
    #[must_use]
    pub const fn empty(kind: StatementKind) -> Self {
        Self::new(kind, Vec::new())
    }

    /// The statement kind this table holds.
    #[must_use]
    pub const fn kind(&self) -> StatementKind {
        self.kind
    }

    /// Number of records (reporting periods).
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the provider returned no data.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The records in provider order.
    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Consume the table, returning its records.
    #[must_use]
    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    /// Field names across all records, in first-seen order.
    #[must_use]
    pub fn columns(&self) -> Vec<&str> {
        let mut columns: Vec<&str> = Vec::new();
        for name in self.records.iter().flat_map(|record| record.keys()) {
            if !columns.contains(&name.as_str()) {
                columns.push(name.as_str());
            }
        }
        columns
    }

    /// Parsed `date` field of each record, `None` where absent or not `YYYY-MM-DD`.
    #[must_use]
    pub fn dates(&self) -> Vec<Option<NaiveDate>> {
        self.records
            .iter()
            .map(|record| {
                record
                    .get("date")
                    .and_then(serde_json::Value::as_str)
                    .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
            })
            .collect()
    }

    /// Convert the records into a Polars DataFrame.
    ///
    /// Columns appear in first-seen order. A column is boolean, `i64` or `f64`
    /// when every present value has that type, and a string column otherwise
    /// (nested values are rendered as JSON). Missing fields become nulls.
    ///
    /// # Errors
    ///
    /// Returns an error if Polars rejects the assembled columns.
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        if self.records.is_empty() {
            return Ok(DataFrame::empty());
        }

        let columns = self
            .columns()
            .into_iter()
            .map(|name| self.build_column(name))
            .collect::<Vec<_>>();

        Ok(DataFrame::new(columns)?)
    }

    fn build_column(&self, name: &str) -> Column {
        let values = || self.records.iter().map(move |record| record.get(name));

        match ColumnType::infer(values().flatten()) {
            ColumnType::Boolean => {
                let data: Vec<Option<bool>> =
                    values().map(|v| v.and_then(serde_json::Value::as_bool)).collect();
                Column::new(name.into(), data)
            }
            ColumnType::Integer => {
                let data: Vec<Option<i64>> =
                    values().map(|v| v.and_then(serde_json::Value::as_i64)).collect();
                Column::new(name.into(), data)
            }
            ColumnType::Float => {
                let data: Vec<Option<f64>> =
                    values().map(|v| v.and_then(serde_json::Value::as_f64)).collect();
                Column::new(name.into(), data)
            }
            ColumnType::Text => {
                let data: Vec<Option<String>> = values()
                    .map(|v| match v {
                        None | Some(serde_json::Value::Null) => None,
                        Some(serde_json::Value::String(s)) => Some(s.clone()),
                        Some(other) => Some(other.to_string()),
                    })
                    .collect();
                Column::new(name.into(), data)
            }
        }
    }
}

impl Serialize for StatementTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.records.serialize(serializer)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnType {
    Boolean,
    Integer,
    Float,
    Text,
}

impl ColumnType {
    fn infer<'a>(values: impl Iterator<Item = &'a serde_json::Value>) -> Self {
        let mut inferred: Option<Self> = None;
        for value in values {
            let current = match value {
                serde_json::Value::Null => continue,
                serde_json::Value::Bool(_) => Self::Boolean,
                serde_json::Value::Number(n) if n.is_i64() => Self::Integer,
                serde_json::Value::Number(_) => Self::Float,
                _ => return Self::Text,
            };
            inferred = Some(match (inferred, current) {
                (None, current) => current,
                (Some(prev), current) if prev == current => prev,
                (Some(Self::Integer), Self::Float) | (Some(Self::Float), Self::Integer) => {
                    Self::Float
                }
                _ => return Self::Text,
            });
        }
        inferred.unwrap_or(Self::Text)
    }
}

/// All four statement tables fetched with the same request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinancialBundle {
    /// Income statements.
    pub income_statement: StatementTable,
    /// Balance sheets.
    pub balance_sheet: StatementTable,
    /// Cash flow statements.
    pub cashflow: StatementTable,
    /// Financial ratios.
    pub ratios: StatementTable,
}

impl FinancialBundle {
    /// The table for `kind`.
    #[must_use]
    pub const fn get(&self, kind: StatementKind) -> &StatementTable {
        match kind {
            StatementKind::IncomeStatement => &self.income_statement,
            StatementKind::BalanceSheet => &self.balance_sheet,
            StatementKind::CashFlow => &self.cashflow,
            StatementKind::Ratios => &self.ratios,
        }
    }

    /// Bundle keys, in order.
    #[must_use]
    pub fn keys(&self) -> [&'static str; 4] {
        StatementKind::ALL.map(|kind| kind.key())
    }

    /// Iterate over `(kind, table)` pairs in bundle order.
    pub fn iter(&self) -> impl Iterator<Item = (StatementKind, &StatementTable)> {
        StatementKind::ALL.into_iter().map(|kind| (kind, self.get(kind)))
    }
}
