//! Failures of a single FMP request attempt.

use finstat_traits::FinstatError;
use reqwest::StatusCode;
use thiserror::Error;

/// What went wrong with one attempt, before it is folded into [`FinstatError`].
#[derive(Debug, Error)]
pub(crate) enum FmpError {
    /// Transport failure: timeout, connection error, broken body stream.
    #[error("HTTP request failed: {0}")]
    Request(#[source] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("HTTP {0}")]
    Status(StatusCode),

    /// The body was not JSON.
    #[error("Failed to decode response body: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<reqwest::Error> for FmpError {
    fn from(err: reqwest::Error) -> Self {
        // The request URL carries the credential.
        Self::Request(err.without_url())
    }
}

impl FmpError {
    /// Only timeouts and connection failures are worth another attempt.
    pub(crate) fn is_transient(&self) -> bool {
        matches!(self, Self::Request(err) if err.is_timeout() || err.is_connect())
    }
}

impl From<FmpError> for FinstatError {
    fn from(err: FmpError) -> Self {
        match err {
            FmpError::Status(status) => status_error(status),
            FmpError::Request(err) => {
                Self::provider(format!("Failed to retrieve data from FMP API: {err}"))
            }
            FmpError::Json(err) => Self::provider(format!("Malformed response payload: {err}")),
        }
    }
}

/// Map a non-2xx status to a user-facing error.
pub(crate) fn status_error(status: StatusCode) -> FinstatError {
    let message = match status {
        StatusCode::UNAUTHORIZED => {
            "Invalid API credential (HTTP 401). Check the configured FMP API key.".to_string()
        }
        StatusCode::FORBIDDEN => {
            "Access forbidden (HTTP 403). The API plan may not cover this endpoint.".to_string()
        }
        StatusCode::TOO_MANY_REQUESTS => {
            "Rate limit exceeded (HTTP 429). Wait before making more requests.".to_string()
        }
        StatusCode::NOT_FOUND => "Endpoint not found (HTTP 404).".to_string(),
        other => format!("Unexpected HTTP status {}", other.as_u16()),
    };
    FinstatError::Provider(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (401, "Invalid API credential"),
            (403, "Access forbidden"),
            (429, "Rate limit exceeded"),
            (404, "Endpoint not found"),
            (500, "Unexpected HTTP status 500"),
            (502, "Unexpected HTTP status 502"),
        ];
        for (code, expected) in cases {
            let status = StatusCode::from_u16(code).unwrap();
            let err = FinstatError::from(FmpError::Status(status));
            assert!(err.is_provider());
            assert!(err.to_string().contains(expected), "{code}: {err}");
        }
    }

    #[test]
    fn test_status_is_not_transient() {
        assert!(!FmpError::Status(StatusCode::TOO_MANY_REQUESTS).is_transient());
        assert!(!FmpError::Status(StatusCode::INTERNAL_SERVER_ERROR).is_transient());
    }

    #[test]
    fn test_json_error_is_provider() {
        let decode = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
        let err = FinstatError::from(FmpError::from(decode));
        assert!(err.is_provider());
        assert!(err.to_string().contains("Malformed response payload"));
    }
}
