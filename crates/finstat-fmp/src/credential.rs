//! API credential handling.

use finstat_traits::mask_secret;
use std::{env, fmt};

/// An FMP API key.
///
/// `Debug` and `Display` only ever show the masked form, so the key can sit
/// inside structs that are logged or printed.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wrap a raw key.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Read the key from the environment variable `var`, if set.
    #[must_use]
    pub fn from_env(var: &str) -> Option<Self> {
        env::var(var).ok().map(Self)
    }

    /// Whether the key is empty or whitespace.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// First and last four characters, for diagnostics.
    #[must_use]
    pub fn masked(&self) -> String {
        mask_secret(Some(&self.0))
    }

    /// The raw key. Only the request executor puts this on the wire.
    pub(crate) fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ApiKey").field(&self.masked()).finish()
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.masked())
    }
}
