//! Error types for finstat collectors.
//!
//! Collectors distinguish three failure classes: setup problems that make a
//! collector unusable, caller input rejected before any network I/O, and
//! failures originating from the upstream data provider.

use crate::validation::sanitize_error_text;
use std::fmt;
use thiserror::Error;

/// The main error type for finstat operations.
#[derive(Debug, Error)]
pub enum FinstatError {
    /// The collector could not be configured (missing credential, bad client setup).
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Caller-supplied ticker, period or limit failed validation.
    ///
    /// Raised before any network call. The message only echoes the caller's
    /// own input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The upstream provider rejected or failed the request.
    ///
    /// The message has already been sanitized.
    #[error("Provider error: {0}")]
    Provider(String),

    /// Error from Polars while building a DataFrame.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),
}

impl FinstatError {
    /// Build a [`FinstatError::Provider`] from any displayable failure,
    /// passing its text through [`sanitize_error_text`].
    pub fn provider(message: impl fmt::Display) -> Self {
        Self::Provider(sanitize_error_text(&message))
    }

    /// Build a [`FinstatError::InvalidInput`].
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Returns `true` for errors raised by the upstream provider.
    #[must_use]
    pub const fn is_provider(&self) -> bool {
        matches!(self, Self::Provider(_))
    }

    /// Returns `true` for caller input validation errors.
    #[must_use]
    pub const fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }
}

/// A specialized Result type for finstat operations.
pub type Result<T> = std::result::Result<T, FinstatError>;
