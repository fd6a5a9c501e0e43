#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/finstat/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core contracts for finstat financial statement collectors.
//!
//! This crate provides the provider-independent pieces: the
//! [`StatementCollector`] trait, request validation, secret masking and error
//! sanitization, the tabular result types, and an opt-in call throttle.

/// The version of the finstat-traits crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Module declarations
pub mod collector;
pub mod error;
pub mod request;
pub mod throttle;
pub mod types;
pub mod validation;

// Re-exports
pub use collector::StatementCollector;
pub use error::{FinstatError, Result};
pub use request::{
    DEFAULT_LIMIT, DEFAULT_PERIOD, Limit, Period, StatementRequest, Ticker, ValidatedRequest,
};
pub use throttle::FixedIntervalThrottle;
pub use types::{FinancialBundle, Record, StatementKind, StatementTable};
pub use validation::{
    mask_secret, sanitize_error_text, validate_limit, validate_period, validate_ticker,
};
