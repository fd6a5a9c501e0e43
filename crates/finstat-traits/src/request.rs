//! Statement request parameters.
//!
//! A [`StatementRequest`] carries the caller's raw input. Collectors call
//! [`StatementRequest::validate`] before touching the network; the resulting
//! [`ValidatedRequest`] only holds normalized values.

use crate::{
    Result,
    validation::{validate_limit, validate_period, validate_ticker},
};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Period used when the caller does not pick one.
pub const DEFAULT_PERIOD: &str = "annual";

/// Number of periods fetched when the caller does not pick a limit.
pub const DEFAULT_LIMIT: i64 = 5;

/// A validated, uppercase ticker symbol such as `AAPL` or `BRK.B`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Ticker(pub(crate) String);

impl Ticker {
    /// Validate and normalize a raw ticker.
    ///
    /// # Errors
    ///
    /// See [`validate_ticker`].
    pub fn parse(raw: &str) -> Result<Self> {
        validate_ticker(raw)
    }

    /// The normalized symbol.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Ticker {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for Ticker {
    type Err = crate::FinstatError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Reporting period for financial statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    /// Annual reports (10-K filings).
    #[default]
    Annual,
    /// Quarterly reports (10-Q filings).
    Quarter,
}

impl Period {
    /// Get the API parameter value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Annual => "annual",
            Self::Quarter => "quarter",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = crate::FinstatError;

    fn from_str(s: &str) -> Result<Self> {
        validate_period(s)
    }
}

/// Number of reporting periods to retrieve, always within `1..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Limit(pub(crate) u8);

impl Limit {
    /// The limit as an integer.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0 as u32
    }
}

impl Default for Limit {
    fn default() -> Self {
        Self(DEFAULT_LIMIT as u8)
    }
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i64> for Limit {
    type Error = crate::FinstatError;

    fn try_from(value: i64) -> Result<Self> {
        validate_limit(value)
    }
}

/// Raw caller input for a statement fetch.
///
/// Defaults to `period = "annual"` and `limit = 5`.
///
/// # Example
///
/// ```
/// use finstat_traits::StatementRequest;
///
/// let request = StatementRequest::new("aapl").period("quarter").limit(8);
/// let validated = request.validate().unwrap();
/// assert_eq!(validated.ticker.as_str(), "AAPL");
/// assert_eq!(validated.limit.get(), 8);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementRequest {
    ticker: String,
    period: String,
    limit: i64,
}

impl StatementRequest {
    /// Create a request for `ticker` with the default period and limit.
    pub fn new(ticker: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            period: DEFAULT_PERIOD.to_string(),
            limit: DEFAULT_LIMIT,
        }
    }

    /// Set the reporting period (`"annual"` or `"quarter"`).
    #[must_use]
    pub fn period(mut self, period: impl Into<String>) -> Self {
        self.period = period.into();
        self
    }

    /// Set the number of periods to retrieve.
    #[must_use]
    pub const fn limit(mut self, limit: i64) -> Self {
        self.limit = limit;
        self
    }

    /// The raw ticker as supplied.
    #[must_use]
    pub fn raw_ticker(&self) -> &str {
        &self.ticker
    }

    /// The raw period as supplied.
    #[must_use]
    pub fn raw_period(&self) -> &str {
        &self.period
    }

    /// The raw limit as supplied.
    #[must_use]
    pub const fn raw_limit(&self) -> i64 {
        self.limit
    }

    /// Validate ticker, period and limit, in that order.
    ///
    /// # Errors
    ///
    /// Returns [`crate::FinstatError::InvalidInput`] for the first parameter
    /// that fails validation.
    pub fn validate(&self) -> Result<ValidatedRequest> {
        Ok(ValidatedRequest {
            ticker: validate_ticker(&self.ticker)?,
            period: validate_period(&self.period)?,
            limit: validate_limit(self.limit)?,
        })
    }
}

impl From<&str> for StatementRequest {
    fn from(ticker: &str) -> Self {
        Self::new(ticker)
    }
}

/// Normalized request parameters, safe to put on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ValidatedRequest {
    /// Uppercase ticker.
    pub ticker: Ticker,
    /// Reporting period.
    pub period: Period,
    /// Number of periods.
    pub limit: Limit,
}
