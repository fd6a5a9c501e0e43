#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/finstat/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Financial Modeling Prep (FMP) collector for finstat.
//!
//! [`FmpCollector`] implements [`finstat_traits::StatementCollector`] against
//! the FMP v3 REST API. Requests carry the API key as a query parameter, which
//! never reaches logs or error messages.

mod client;
mod credential;
mod error;
mod request;
mod retry;

pub use client::{
    API_KEY_ENV, FMP_BASE_URL, FmpCollector, FmpCollectorBuilder, REQUEST_TIMEOUT,
    endpoint_segment,
};
pub use credential::ApiKey;
pub use retry::{Backoff, RetryPolicy};
