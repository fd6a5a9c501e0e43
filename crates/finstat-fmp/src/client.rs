//! FMP collector implementation.

use crate::{credential::ApiKey, request::RequestExecutor, retry::RetryPolicy};
use async_trait::async_trait;
use finstat_traits::{
    FinstatError, Result, StatementCollector, StatementKind, StatementRequest, StatementTable,
};
use reqwest::{Client, Url};
use serde_json::Value;
use std::time::Duration;
use tracing::{error, info, warn};

/// Base URL for the FMP v3 API.
pub const FMP_BASE_URL: &str = "https://financialmodelingprep.com/api/v3/";

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "FMP_API_KEY";

/// Per-request timeout.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub(crate) const API_KEY_PARAM: &str = "apikey";

const USER_AGENT: &str = concat!("finstat/", env!("CARGO_PKG_VERSION"));

/// Field FMP uses for error payloads delivered with a 2xx status.
const ERROR_MESSAGE_FIELD: &str = "Error Message";

/// Path segment for each statement kind.
#[must_use]
pub const fn endpoint_segment(kind: StatementKind) -> &'static str {
    match kind {
        StatementKind::IncomeStatement => "income-statement",
        StatementKind::BalanceSheet => "balance-sheet-statement",
        StatementKind::CashFlow => "cash-flow-statement",
        StatementKind::Ratios => "ratios",
    }
}

/// Financial Modeling Prep statement collector.
///
/// Cheap to clone; clones share the HTTP connection pool.
#[derive(Debug, Clone)]
pub struct FmpCollector {
    executor: RequestExecutor,
}

impl FmpCollector {
    /// Create a collector with the given API key and default settings.
    ///
    /// # Errors
    ///
    /// Returns [`FinstatError::Configuration`] if the key is blank or the HTTP
    /// client cannot be built.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::builder().api_key(api_key).build()
    }

    /// Create a collector from the `FMP_API_KEY` environment variable.
    ///
    /// This will also load from a `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns [`FinstatError::Configuration`] if the variable is unset or empty.
    pub fn from_env() -> Result<Self> {
        // Try to load .env file (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::builder().build()
    }

    /// Start configuring a collector.
    #[must_use]
    pub fn builder() -> FmpCollectorBuilder {
        FmpCollectorBuilder::default()
    }

    /// The base URL requests are resolved against.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        self.executor.base_url()
    }

    /// The configured API key, masked.
    #[must_use]
    pub fn masked_api_key(&self) -> String {
        self.executor.api_key().masked()
    }

    /// The retry policy applied to every request.
    #[must_use]
    pub const fn retry_policy(&self) -> &RetryPolicy {
        self.executor.retry_policy()
    }

    async fn fetch(&self, kind: StatementKind, request: &StatementRequest) -> Result<StatementTable> {
        let query = request.validate()?;
        info!(
            kind = kind.key(),
            ticker = %query.ticker,
            period = %query.period,
            limit = query.limit.get(),
            "Fetching {}",
            kind.label()
        );

        let path = format!("{}/{}", endpoint_segment(kind), query.ticker);
        let params = [
            ("period", query.period.as_str().to_string()),
            ("limit", query.limit.to_string()),
        ];

        let payload = self.executor.get_json(&path, &params).await?;
        let table = interpret_payload(kind, payload).inspect_err(|err| {
            error!(kind = kind.key(), ticker = %query.ticker, error = %err, "Unusable response");
        })?;

        if table.is_empty() {
            warn!(ticker = %query.ticker, "No {} data found", kind.label());
        } else {
            info!(
                ticker = %query.ticker,
                records = table.len(),
                "Retrieved {}",
                kind.label()
            );
        }
        Ok(table)
    }
}

/// Turn a decoded FMP body into a table.
///
/// FMP answers with an array of objects on success, an object carrying
/// `"Error Message"` on failure, and `[]` for unknown tickers.
pub(crate) fn interpret_payload(kind: StatementKind, payload: Value) -> Result<StatementTable> {
    match payload {
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::Object(record) => Ok(record),
                _ => Err(malformed("expected an array of objects")),
            })
            .collect::<Result<Vec<_>>>()
            .map(|records| StatementTable::new(kind, records)),
        Value::Object(object) => match object.get(ERROR_MESSAGE_FIELD) {
            Some(Value::String(message)) => {
                Err(FinstatError::provider(format!("API returned error: {message}")))
            }
            Some(other) => Err(FinstatError::provider(format!("API returned error: {other}"))),
            None => Err(malformed("expected an array, got an object")),
        },
        _ => Err(malformed("expected an array")),
    }
}

fn malformed(detail: &str) -> FinstatError {
    FinstatError::provider(format!("Malformed response payload: {detail}"))
}

#[async_trait]
impl StatementCollector for FmpCollector {
    fn name(&self) -> &str {
        "fmp"
    }

    async fn income_statement(&self, request: &StatementRequest) -> Result<StatementTable> {
        self.fetch(StatementKind::IncomeStatement, request).await
    }

    async fn balance_sheet(&self, request: &StatementRequest) -> Result<StatementTable> {
        self.fetch(StatementKind::BalanceSheet, request).await
    }

    async fn cash_flow_statement(&self, request: &StatementRequest) -> Result<StatementTable> {
        self.fetch(StatementKind::CashFlow, request).await
    }

    async fn financial_ratios(&self, request: &StatementRequest) -> Result<StatementTable> {
        self.fetch(StatementKind::Ratios, request).await
    }
}

/// Builder for [`FmpCollector`].
///
/// ```
/// use finstat_fmp::{Backoff, FmpCollector, RetryPolicy};
/// use std::time::Duration;
///
/// let collector = FmpCollector::builder()
///     .api_key("demo0123456789key")
///     .timeout(Duration::from_secs(10))
///     .retry_policy(RetryPolicy::new(2, Backoff::Fixed(Duration::from_secs(1))))
///     .build()
///     .unwrap();
/// assert_eq!(collector.masked_api_key(), "demo...9key");
/// ```
#[derive(Debug, Default)]
pub struct FmpCollectorBuilder {
    api_key: Option<ApiKey>,
    api_key_env: Option<String>,
    base_url: Option<Url>,
    timeout: Option<Duration>,
    retry: Option<RetryPolicy>,
}

impl FmpCollectorBuilder {
    /// Use this API key instead of reading the environment.
    #[must_use]
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(ApiKey::new(api_key));
        self
    }

    /// Read the key from `var` instead of `FMP_API_KEY`.
    #[must_use]
    pub fn api_key_env(mut self, var: impl Into<String>) -> Self {
        self.api_key_env = Some(var.into());
        self
    }

    /// Send requests somewhere other than [`FMP_BASE_URL`].
    ///
    /// Plain `http` is accepted here; the default endpoint is HTTPS only.
    #[must_use]
    pub fn base_url(mut self, base_url: Url) -> Self {
        self.base_url = Some(base_url);
        self
    }

    /// Per-request timeout. Defaults to [`REQUEST_TIMEOUT`].
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Retry policy. Defaults to [`RetryPolicy::default`].
    #[must_use]
    pub fn retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = Some(retry);
        self
    }

    /// Build the collector.
    ///
    /// # Errors
    ///
    /// Returns [`FinstatError::Configuration`] if no usable API key is found or
    /// the HTTP client cannot be built.
    pub fn build(self) -> Result<FmpCollector> {
        let env_var = self.api_key_env.as_deref().unwrap_or(API_KEY_ENV);
        let api_key = self
            .api_key
            .or_else(|| ApiKey::from_env(env_var))
            .filter(|key| !key.is_blank())
            .ok_or_else(|| {
                FinstatError::Configuration(format!(
                    "FMP API key is required. Set the {env_var} environment variable or pass a key to the builder."
                ))
            })?;

        let base_url = match self.base_url {
            Some(url) => url,
            None => Url::parse(FMP_BASE_URL)
                .map_err(|e| FinstatError::Configuration(format!("Invalid base URL: {e}")))?,
        };
        let base_url = with_trailing_slash(base_url);

        let http = Client::builder()
            .use_rustls_tls()
            .https_only(base_url.scheme() == "https")
            .user_agent(USER_AGENT)
            .timeout(self.timeout.unwrap_or(REQUEST_TIMEOUT))
            .build()
            .map_err(|e| {
                FinstatError::Configuration(format!("Failed to build HTTP client: {}", e.without_url()))
            })?;

        info!(api_key = %api_key, base_url = %base_url, "FMP collector initialized");

        Ok(FmpCollector {
            executor: RequestExecutor::new(http, base_url, api_key, self.retry.unwrap_or_default()),
        })
    }
}

/// `Url::join` drops the last segment unless the base ends with `/`.
fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
