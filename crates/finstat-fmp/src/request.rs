//! Authenticated GET requests against the FMP API.

use crate::{client::API_KEY_PARAM, credential::ApiKey, error::FmpError, retry::RetryPolicy};
use finstat_traits::{FinstatError, Result};
use reqwest::{Client, Url, header::ACCEPT};
use serde_json::Value;
use tracing::{debug, error};

/// Sends requests with the credential attached and applies the retry policy.
#[derive(Debug, Clone)]
pub(crate) struct RequestExecutor {
    http: Client,
    base_url: Url,
    api_key: ApiKey,
    retry: RetryPolicy,
}

impl RequestExecutor {
    pub(crate) const fn new(
        http: Client,
        base_url: Url,
        api_key: ApiKey,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            http,
            base_url,
            api_key,
            retry,
        }
    }

    pub(crate) const fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub(crate) const fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    pub(crate) const fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// GET `path` (relative to the base URL) and decode the JSON body.
    ///
    /// Timeouts and connection failures are retried; every other failure is
    /// returned after one attempt.
    pub(crate) async fn get_json(&self, path: &str, params: &[(&str, String)]) -> Result<Value> {
        check_endpoint_path(path)?;
        let url = self
            .base_url
            .join(path)
            .map_err(|e| FinstatError::invalid_input(format!("Invalid endpoint format: {e}")))?;

        debug!(endpoint = path, "Making request to FMP API");

        self.retry
            .run(
                |attempt| self.attempt(&url, params, attempt),
                FmpError::is_transient,
            )
            .await
            .map_err(|err| {
                let err = FinstatError::from(err);
                error!(endpoint = path, error = %err, "Error making request to FMP API");
                err
            })
    }

    async fn attempt(
        &self,
        url: &Url,
        params: &[(&str, String)],
        attempt: u32,
    ) -> std::result::Result<Value, FmpError> {
        debug!(attempt, "Sending request");
        let response = self
            .http
            .get(url.clone())
            .query(params)
            .query(&[(API_KEY_PARAM, self.api_key.expose())])
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FmpError::Status(status));
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

/// Reject endpoint paths that are empty, absolute, or climb out of the base URL.
pub(crate) fn check_endpoint_path(path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(FinstatError::invalid_input("Endpoint must be a non-empty string"));
    }
    if path.contains("..") || path.starts_with('/') || path.starts_with('\\') {
        return Err(FinstatError::invalid_input("Invalid endpoint format"));
    }
    Ok(())
}
