#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/finstat/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! # finstat
//!
//! finstat is an umbrella crate that re-exports the finstat sub-crates for
//! convenience.
//!
//! ## Quick Start
//!
//! ```no_run
//! use finstat::prelude::*;
//!
//! # async fn example() -> Result<()> {
//! let collector = FmpCollector::from_env()?;
//! let request = StatementRequest::new("AAPL").period("annual").limit(5);
//!
//! let bundle = collector.all_financials(&request).await?;
//! for (kind, table) in bundle.iter() {
//!     println!("{kind}: {} periods", table.len());
//! }
//!
//! let income = bundle.get(StatementKind::IncomeStatement).to_dataframe()?;
//! println!("{income}");
//! # Ok(())
//! # }
//! ```
//!
//! ## Crate Organization
//!
//! - [`traits`] - The [`StatementCollector`] contract, validation, result tables
//! - [`fmp`] - The Financial Modeling Prep collector
//!
//! ## Logging
//!
//! Collectors emit [`tracing`](https://docs.rs/tracing) events. Install a
//! subscriber in the application to see them; the library never installs one.

/// Version information for the finstat crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Core Traits
// ============================================================================

/// Core contracts for finstat.
///
/// - [`StatementCollector`] - The capability set every provider implements
/// - [`StatementRequest`] - Ticker, period and limit for one fetch
/// - [`StatementTable`] / [`FinancialBundle`] - Tabular results
pub mod traits {
    pub use finstat_traits::*;
}

pub use finstat_traits::{
    FinancialBundle, FinstatError, Result, StatementCollector, StatementKind, StatementRequest,
    StatementTable,
};

// ============================================================================
// Data Providers
// ============================================================================

/// Financial Modeling Prep (FMP) collector.
///
/// ## Setup
///
/// 1. Get a free API key at <https://financialmodelingprep.com/>
/// 2. Set the `FMP_API_KEY` environment variable or add to `.env` file
///
/// The free tier allows 250 requests per day. Pair the collector with a
/// [`FixedIntervalThrottle`](crate::traits::FixedIntervalThrottle) when
/// fetching many tickers.
pub mod fmp {
    pub use finstat_fmp::*;
}

pub use finstat_fmp::FmpCollector;

// ============================================================================
// Prelude
// ============================================================================

/// Prelude module for convenient imports.
///
/// ```
/// use finstat::prelude::*;
/// ```
pub mod prelude {
    pub use crate::fmp::{FmpCollector, RetryPolicy};
    pub use crate::traits::{
        FinancialBundle, FinstatError, FixedIntervalThrottle, Result, StatementCollector,
        StatementKind, StatementRequest, StatementTable,
    };
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
        // Version should be in semver format (x.y.z)
        let parts: Vec<&str> = VERSION.split('.').collect();
        assert!(parts.len() >= 2, "Version should have at least major.minor");
    }

    #[test]
    fn test_re_exports() {
        fn _accept_collector(_collector: &dyn StatementCollector) {}

        let collector = FmpCollector::new("umbrella0123456789").unwrap();
        _accept_collector(&collector);
        assert!(collector.is_valid_ticker("BRK.B"));
        assert!(!collector.is_valid_period("monthly"));
    }

    #[test]
    fn test_error_types() {
        let _result: Result<()> = Ok(());
        let error = FinstatError::invalid_input("test");
        assert!(error.is_invalid_input());
    }

    #[tokio::test]
    async fn test_invalid_request_needs_no_network() {
        let collector = FmpCollector::new("umbrella0123456789").unwrap();
        let err = collector
            .all_financials(&StatementRequest::new("NOT A TICKER"))
            .await
            .unwrap_err();
        assert!(err.is_invalid_input());
    }
}
