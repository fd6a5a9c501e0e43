//! The contract every financial statement provider implements.
//!
//! Calling code should depend on [`StatementCollector`] rather than on a
//! concrete provider, so new providers can be added without touching it.

use crate::{
    FinancialBundle, Result, StatementKind, StatementRequest, StatementTable,
    validation::{validate_period, validate_ticker},
};
use async_trait::async_trait;
use tracing::info;

/// A source of financial statement data.
///
/// Each fetch validates its [`StatementRequest`] first and returns
/// [`crate::FinstatError::InvalidInput`] without touching the network when
/// the ticker, period or limit is malformed. Any upstream failure is reported
/// as [`crate::FinstatError::Provider`].
///
/// # Example
///
/// ```no_run
/// use finstat_traits::{StatementCollector, StatementRequest, Result};
///
/// async fn revenue_rows(collector: &dyn StatementCollector) -> Result<usize> {
///     let table = collector
///         .income_statement(&StatementRequest::new("AAPL").limit(3))
///         .await?;
///     Ok(table.len())
/// }
/// ```
#[async_trait]
pub trait StatementCollector: Send + Sync {
    /// Short provider identifier, used in logs.
    fn name(&self) -> &str;

    /// Fetch income statements.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for malformed parameters, `Provider` for upstream failures.
    async fn income_statement(&self, request: &StatementRequest) -> Result<StatementTable>;

    /// Fetch balance sheets.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for malformed parameters, `Provider` for upstream failures.
    async fn balance_sheet(&self, request: &StatementRequest) -> Result<StatementTable>;

    /// Fetch cash flow statements.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for malformed parameters, `Provider` for upstream failures.
    async fn cash_flow_statement(&self, request: &StatementRequest) -> Result<StatementTable>;

    /// Fetch financial ratios.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for malformed parameters, `Provider` for upstream failures.
    async fn financial_ratios(&self, request: &StatementRequest) -> Result<StatementTable>;

    /// Fetch the statement of the given kind.
    ///
    /// # Errors
    ///
    /// Same as the per-statement methods.
    async fn statement(
        &self,
        kind: StatementKind,
        request: &StatementRequest,
    ) -> Result<StatementTable> {
        match kind {
            StatementKind::IncomeStatement => self.income_statement(request).await,
            StatementKind::BalanceSheet => self.balance_sheet(request).await,
            StatementKind::CashFlow => self.cash_flow_statement(request).await,
            StatementKind::Ratios => self.financial_ratios(request).await,
        }
    }

    /// Fetch all four statements with the same parameters.
    ///
    /// The fetches run one after another; the first failure is returned and
    /// no partial bundle is produced.
    ///
    /// # Errors
    ///
    /// The first error raised by any of the four fetches.
    async fn all_financials(&self, request: &StatementRequest) -> Result<FinancialBundle> {
        info!(
            provider = self.name(),
            ticker = request.raw_ticker(),
            "Fetching all financial data"
        );

        Ok(FinancialBundle {
            income_statement: self.income_statement(request).await?,
            balance_sheet: self.balance_sheet(request).await?,
            cashflow: self.cash_flow_statement(request).await?,
            ratios: self.financial_ratios(request).await?,
        })
    }

    /// Whether `ticker` is a well-formed symbol.
    fn is_valid_ticker(&self, ticker: &str) -> bool {
        validate_ticker(ticker).is_ok()
    }

    /// Whether `period` is `annual` or `quarter` (any case).
    fn is_valid_period(&self, period: &str) -> bool {
        validate_period(period).is_ok()
    }
}
