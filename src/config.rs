//! Provider configuration.
//!
//! Drivers are configured through a flat, string-keyed [`ProviderSettings`]
//! bundle so that one registry signature fits every provider. Well-known keys
//! live in [`keys`]; drivers may document extras of their own.
//!
//! Construction never validates: a bundle missing `api_key` still builds a
//! driver, and the driver reports the problem as a configuration error on
//! the first send. This keeps bootstrap code total and pushes all failure
//! through the one outcome channel callers already handle.

use crate::outcome::SendError;
use std::collections::HashMap;
use std::fmt::{self, Debug, Formatter};

/// Well-known setting keys understood by the bundled drivers.
pub mod keys {
    /// Provider API key or token.
    pub const API_KEY: &str = "api_key";
    /// Provider-side template identifier for the verification message.
    pub const TEMPLATE_ID: &str = "template_id";
    /// Originating line number, where the provider supports one.
    pub const SENDER_NUMBER: &str = "sender_number";
    /// Override for the provider API base URL (useful for tests and proxies).
    pub const BASE_URL: &str = "base_url";
    /// Request timeout in whole seconds.
    pub const TIMEOUT_SECS: &str = "timeout_secs";
}

/// Flat string-keyed configuration for one provider driver.
///
/// # Example
///
/// ```rust
/// use sms_dispatch::ProviderSettings;
/// use sms_dispatch::config::keys;
///
/// let settings: ProviderSettings = [
///     (keys::API_KEY, "k-123"),
///     (keys::TEMPLATE_ID, "verify"),
/// ]
/// .into_iter()
/// .collect();
///
/// assert_eq!(settings.get(keys::TEMPLATE_ID), Some("verify"));
/// assert_eq!(settings.get(keys::SENDER_NUMBER), None);
/// ```
#[derive(Clone, Default)]
pub struct ProviderSettings {
    values: HashMap<String, String>,
}

impl ProviderSettings {
    /// Create an empty settings bundle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a setting, returning the previous value if any.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.values.insert(key.into(), value.into())
    }

    /// Chainable insert for literal-style construction.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Look up a setting. Blank values count as absent.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
    }

    /// Look up a mandatory setting.
    ///
    /// The error names the key but never any value, so it is safe to log.
    pub fn require(&self, key: &str) -> Result<&str, SendError> {
        self.get(key)
            .ok_or_else(|| SendError::Config(format!("missing required setting `{key}`")))
    }

    /// Number of stored settings, blank or not.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the bundle holds no settings at all.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ProviderSettings {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut settings = Self::new();
        for (key, value) in iter {
            settings.insert(key, value);
        }
        settings
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for ProviderSettings {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

/// Values under secret-looking keys never reach Debug output.
impl Debug for ProviderSettings {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        let mut entries: Vec<_> = self.values.iter().collect();
        entries.sort_by_key(|(key, _)| key.as_str());
        for (key, value) in entries {
            if is_sensitive_key(key) {
                map.entry(key, &"[REDACTED]");
            } else {
                map.entry(key, value);
            }
        }
        map.finish()
    }
}

fn is_sensitive_key(key: &str) -> bool {
    let key = key.to_ascii_lowercase();
    ["key", "secret", "token", "password"]
        .iter()
        .any(|marker| key.contains(marker))
}
