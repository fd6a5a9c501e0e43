//! Input validation and secret-safe diagnostics.
//!
//! Every collector runs caller input through these functions before building
//! a request, and runs every upstream failure through [`sanitize_error_text`]
//! before it reaches an error value or a log line.

use crate::{
    FinstatError, Result,
    request::{Limit, Period, Ticker},
};
use regex::Regex;
use std::{fmt, sync::LazyLock};

/// 1 to 5 alphanumerics, optionally followed by `.` and a class letter (`BRK.B`).
static TICKER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z0-9]{1,5}(\.[A-Z])?$").expect("ticker pattern is a valid regex")
});

/// Long opaque alphanumeric runs, which usually are keys or tokens.
static TOKEN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Za-z0-9]{20,}\b").expect("token pattern is a valid regex")
});

/// Windows drive paths and Unix absolute paths.
static PATH_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Z]:\\\S+|/\S+").expect("path pattern is a valid regex")
});

/// Shell metacharacters that must never appear in a ticker.
const DENIED_TICKER_CHARS: [char; 9] = [';', '&', '|', '`', '$', '(', ')', '<', '>'];

/// Keywords that cause a message to be replaced entirely.
const SENSITIVE_KEYWORDS: [&str; 5] = ["api_key", "password", "secret", "token", "credential"];

/// Replacement for long alphanumeric runs.
pub const REDACTED_MARKER: &str = "[REDACTED]";

/// Replacement for filesystem paths.
pub const PATH_REDACTED_MARKER: &str = "[PATH_REDACTED]";

/// Message substituted when the original text mentions a sensitive keyword.
pub const GENERIC_ERROR_MESSAGE: &str =
    "An error occurred while processing the request. Please check logs for details.";

/// Smallest accepted `limit`.
pub const MIN_LIMIT: i64 = 1;

/// Largest accepted `limit`.
pub const MAX_LIMIT: i64 = 100;

/// Validate and normalize a ticker symbol.
///
/// The input is trimmed and uppercased, then checked against
/// `^[A-Z0-9]{1,5}(\.[A-Z])?$`.
///
/// # Errors
///
/// Returns [`FinstatError::InvalidInput`] if the ticker is empty, malformed,
/// or contains shell metacharacters.
///
/// # Example
///
/// ```
/// use finstat_traits::validation::validate_ticker;
///
/// assert_eq!(validate_ticker(" brk.b ").unwrap().as_str(), "BRK.B");
/// assert!(validate_ticker("AAPL;rm").is_err());
/// ```
pub fn validate_ticker(raw: &str) -> Result<Ticker> {
    if raw.is_empty() {
        return Err(FinstatError::invalid_input("Ticker symbol cannot be empty"));
    }

    let ticker = raw.trim().to_uppercase();

    if !TICKER_PATTERN.is_match(&ticker) {
        return Err(FinstatError::InvalidInput(format!(
            "Invalid ticker format: {ticker}. \
             Ticker must be 1-5 uppercase letters/numbers, optionally with .[A-Z]"
        )));
    }

    if ticker.contains(&DENIED_TICKER_CHARS[..]) {
        return Err(FinstatError::InvalidInput(format!(
            "Ticker contains invalid characters: {ticker}"
        )));
    }

    Ok(Ticker(ticker))
}

/// Validate a reporting period selector.
///
/// # Errors
///
/// Returns [`FinstatError::InvalidInput`] unless the trimmed, lowercased
/// value is `annual` or `quarter`.
pub fn validate_period(raw: &str) -> Result<Period> {
    match raw.trim().to_lowercase().as_str() {
        "annual" => Ok(Period::Annual),
        "quarter" => Ok(Period::Quarter),
        "" => Err(FinstatError::invalid_input("Period cannot be empty")),
        _ => Err(FinstatError::InvalidInput(format!(
            "Invalid period: {raw}. Must be 'annual' or 'quarter'"
        ))),
    }
}

/// Validate the number of periods to retrieve.
///
/// # Errors
///
/// Returns [`FinstatError::InvalidInput`] unless `raw` is within
/// [`MIN_LIMIT`]..=[`MAX_LIMIT`].
pub fn validate_limit(raw: i64) -> Result<Limit> {
    if raw < MIN_LIMIT {
        return Err(FinstatError::InvalidInput(format!(
            "Limit must be at least {MIN_LIMIT}, got {raw}"
        )));
    }
    if raw > MAX_LIMIT {
        return Err(FinstatError::InvalidInput(format!(
            "Limit cannot exceed {MAX_LIMIT}, got {raw}"
        )));
    }
    // Range checked above, always fits.
    Ok(Limit(raw as u8))
}

/// Mask a secret for diagnostics, keeping the first and last four characters.
///
/// ```
/// use finstat_traits::validation::mask_secret;
///
/// assert_eq!(mask_secret(None), "None");
/// assert_eq!(mask_secret(Some("short")), "****");
/// assert_eq!(mask_secret(Some("ABCD1234WXYZ")), "ABCD...WXYZ");
/// ```
#[must_use]
pub fn mask_secret(secret: Option<&str>) -> String {
    let Some(secret) = secret.filter(|s| !s.is_empty()) else {
        return "None".to_string();
    };

    let len = secret.chars().count();
    if len <= 8 {
        return "****".to_string();
    }

    let head: String = secret.chars().take(4).collect();
    let tail: String = secret.chars().skip(len - 4).collect();
    format!("{head}...{tail}")
}

/// Derive a display-safe string from an error message.
///
/// Long alphanumeric runs and path-like substrings are redacted. If what is
/// left still mentions a sensitive keyword, the whole text is replaced by
/// [`GENERIC_ERROR_MESSAGE`].
#[must_use]
pub fn sanitize_error_text<E: fmt::Display + ?Sized>(error: &E) -> String {
    let message = error.to_string();
    let message = TOKEN_PATTERN.replace_all(&message, REDACTED_MARKER);
    let message = PATH_PATTERN.replace_all(&message, PATH_REDACTED_MARKER);

    let lowered = message.to_lowercase();
    if SENSITIVE_KEYWORDS.iter().any(|keyword| lowered.contains(keyword)) {
        return GENERIC_ERROR_MESSAGE.to_string();
    }

    message.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_tickers_normalize() {
        for (raw, expected) in [
            ("AAPL", "AAPL"),
            ("aapl", "AAPL"),
            ("  msft ", "MSFT"),
            ("brk.b", "BRK.B"),
            ("A", "A"),
            ("12345", "12345"),
            ("GOOGL", "GOOGL"),
        ] {
            assert_eq!(validate_ticker(raw).unwrap().as_str(), expected, "{raw}");
        }
    }

    #[test]
    fn test_invalid_tickers_rejected() {
        for raw in [
            "", "   ", "TOOLONG", "AAPL;", "A&B", "A|B", "A`B", "$AAPL", "A(B)", "<A>", "BRK.BB",
            "BRK.1", ".B", "AA PL", "BRK-B",
        ] {
            let err = validate_ticker(raw).unwrap_err();
            assert!(err.is_invalid_input(), "{raw:?} should be rejected");
        }
    }

    #[test]
    fn test_period_variants() {
        assert_eq!(validate_period("annual").unwrap(), Period::Annual);
        assert_eq!(validate_period("Annual").unwrap(), Period::Annual);
        assert_eq!(validate_period("ANNUAL ").unwrap(), Period::Annual);
        assert_eq!(validate_period(" Quarter").unwrap(), Period::Quarter);

        for raw in ["", "yearly", "quarterly", "q", "annual quarter"] {
            assert!(validate_period(raw).is_err(), "{raw:?} should be rejected");
        }
    }

    #[test]
    fn test_limit_bounds() {
        for raw in [1, 5, 50, 100] {
            assert_eq!(i64::from(validate_limit(raw).unwrap().get()), raw);
        }
        for raw in [0, -1, 101, i64::MIN, i64::MAX] {
            assert!(validate_limit(raw).is_err(), "{raw} should be rejected");
        }
    }

    #[test]
    fn test_mask_secret() {
        assert_eq!(mask_secret(Some("")), "None");
        assert_eq!(mask_secret(None), "None");
        assert_eq!(mask_secret(Some("short")), "****");
        assert_eq!(mask_secret(Some("12345678")), "****");
        assert_eq!(mask_secret(Some("ABCD1234WXYZ")), "ABCD...WXYZ");
    }

    #[test]
    fn test_sanitize_redacts_long_tokens() {
        let token = "Zx9Qw8Er7Ty6Ui5Op4As3Df2Gh1Jk0Lm";
        assert_eq!(token.len(), 32);
        let out = sanitize_error_text(&format!("request rejected for {token} today"));
        assert!(!out.contains(token));
        assert_eq!(out, "request rejected for [REDACTED] today");
    }

    #[test]
    fn test_sanitize_redacts_paths() {
        let out = sanitize_error_text("failed to open /etc/finstat/config.toml now");
        assert_eq!(out, "failed to open [PATH_REDACTED] now");

        let out = sanitize_error_text(r"failed to open C:\Users\me\key.txt now");
        assert_eq!(out, "failed to open [PATH_REDACTED] now");
    }

    #[test]
    fn test_sanitize_keywords_fall_back_to_generic() {
        assert_eq!(sanitize_error_text("bad api_key=xyz"), GENERIC_ERROR_MESSAGE);
        assert_eq!(sanitize_error_text("Password mismatch"), GENERIC_ERROR_MESSAGE);
        assert_eq!(sanitize_error_text("expired TOKEN"), GENERIC_ERROR_MESSAGE);
    }

    #[test]
    fn test_sanitize_leaves_plain_text() {
        assert_eq!(sanitize_error_text("connection reset"), "connection reset");
        assert_eq!(sanitize_error_text(""), "");
    }

    #[test]
    fn test_sanitize_accepts_errors() {
        let err = std::io::Error::other("disk at /var/lib/data is full");
        assert_eq!(sanitize_error_text(&err), "disk at [PATH_REDACTED] is full");
    }
}
