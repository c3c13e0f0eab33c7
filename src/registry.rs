//! Driver registry.
//!
//! Maps provider names to driver factories so deployments pick a provider
//! by configuration string instead of a compile-time match. Registration is
//! open: embedders add their own drivers next to the bundled ones without
//! touching this crate.

use crate::config::ProviderSettings;
use crate::drivers::{KavenegarDriver, MockDriver, SmsDriver, SmsIrDriver, kavenegar, mock, smsir};
use crate::outcome::SendError;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Builds a driver from a settings bundle.
///
/// Factories for the bundled drivers never fail on missing credentials
/// (those surface on send); a custom factory may fail fast with
/// [`SendError::Config`] if it prefers.
pub type DriverFactory =
    Box<dyn Fn(&ProviderSettings) -> Result<Arc<dyn SmsDriver>, SendError> + Send + Sync>;

/// Name-keyed collection of driver factories.
///
/// Names are matched case-insensitively and ignore surrounding whitespace,
/// so the config values `"Kavenegar"` and `"kavenegar "` select the same
/// driver.
///
/// # Example
///
/// ```rust
/// use sms_dispatch::{DriverRegistry, ProviderSettings, SmsDriver};
///
/// let registry = DriverRegistry::builtin();
/// let driver = registry.create("mock", &ProviderSettings::new()).unwrap();
/// assert_eq!(driver.name(), "mock");
/// ```
#[derive(Default)]
pub struct DriverRegistry {
    factories: HashMap<String, DriverFactory>,
}

impl DriverRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-loaded with the bundled drivers:
    /// `"kavenegar"`, `"smsir"` and `"mock"`.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(kavenegar::DRIVER_NAME, |settings| {
            let driver = KavenegarDriver::from_settings(settings)?;
            Ok(Arc::new(driver) as Arc<dyn SmsDriver>)
        });
        registry.register(smsir::DRIVER_NAME, |settings| {
            let driver = SmsIrDriver::from_settings(settings)?;
            Ok(Arc::new(driver) as Arc<dyn SmsDriver>)
        });
        registry.register(mock::DRIVER_NAME, |settings| {
            Ok(Arc::new(MockDriver::from_settings(settings)) as Arc<dyn SmsDriver>)
        });
        registry
    }

    /// Register a factory under `name`, replacing any previous registration.
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn(&ProviderSettings) -> Result<Arc<dyn SmsDriver>, SendError> + Send + Sync + 'static,
    {
        let name = canonical_name(&name.into());
        debug!(driver = %name, "registering SMS driver factory");
        self.factories.insert(name, Box::new(factory));
    }

    /// Build a driver by provider name.
    ///
    /// Unknown names come back as [`SendError::Config`] listing the
    /// registered providers, so a config typo is diagnosable from the error
    /// alone.
    pub fn create(
        &self,
        name: &str,
        settings: &ProviderSettings,
    ) -> Result<Arc<dyn SmsDriver>, SendError> {
        match self.factories.get(&canonical_name(name)) {
            Some(factory) => factory(settings),
            None => Err(SendError::Config(format!(
                "unknown SMS provider `{}`; registered providers: {}",
                name.trim(),
                self.names().join(", ")
            ))),
        }
    }

    /// Whether a factory is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(&canonical_name(name))
    }

    /// Registered provider names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl std::fmt::Debug for DriverRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DriverRegistry")
            .field("providers", &self.names())
            .finish()
    }
}

fn canonical_name(name: &str) -> String {
    name.trim().to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::keys;
    use crate::outcome::ErrorKind;

    #[test]
    fn test_builtin_registers_bundled_drivers() {
        let registry = DriverRegistry::builtin();
        assert_eq!(registry.names(), vec!["kavenegar", "mock", "smsir"]);
        assert!(registry.contains("kavenegar"));
        assert!(registry.contains("smsir"));
        assert!(registry.contains("mock"));
    }

    #[test]
    fn test_create_builds_named_driver() {
        let registry = DriverRegistry::builtin();
        let settings = ProviderSettings::new()
            .with(keys::API_KEY, "k")
            .with(keys::TEMPLATE_ID, "verify");

        let driver = registry.create("kavenegar", &settings).unwrap();
        assert_eq!(driver.name(), "kavenegar");

        let driver = registry.create("mock", &ProviderSettings::new()).unwrap();
        assert_eq!(driver.name(), "mock");
    }

    #[test]
    fn test_create_with_incomplete_settings_still_builds() {
        // Credential problems surface on send, not at build time.
        let registry = DriverRegistry::builtin();
        assert!(registry.create("kavenegar", &ProviderSettings::new()).is_ok());
        assert!(registry.create("smsir", &ProviderSettings::new()).is_ok());
    }

    #[test]
    fn test_lookup_is_case_and_whitespace_insensitive() {
        let registry = DriverRegistry::builtin();
        assert!(registry.create("Kavenegar", &ProviderSettings::new()).is_ok());
        assert!(registry.create(" SMSIR ", &ProviderSettings::new()).is_ok());
    }

    #[test]
    fn test_unknown_name_lists_registered_providers() {
        let registry = DriverRegistry::builtin();
        let err = registry
            .create("twilio", &ProviderSettings::new())
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::ConfigError);
        let text = err.to_string();
        assert!(text.contains("twilio"));
        assert!(text.contains("kavenegar"));
        assert!(text.contains("mock"));
        assert!(text.contains("smsir"));
    }

    #[test]
    fn test_empty_registry_knows_nothing() {
        let registry = DriverRegistry::new();
        assert!(registry.names().is_empty());
        let err = registry.create("mock", &ProviderSettings::new()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigError);
    }

    #[test]
    fn test_custom_registration_and_replacement() {
        let mut registry = DriverRegistry::builtin();
        registry.register("acme", |settings| {
            Ok(Arc::new(MockDriver::from_settings(settings)) as Arc<dyn SmsDriver>)
        });
        assert!(registry.contains("acme"));

        // Re-registering a name replaces the previous factory.
        registry.register("ACME", |_| {
            Ok(Arc::new(MockDriver::failing()) as Arc<dyn SmsDriver>)
        });
        assert_eq!(registry.names().iter().filter(|n| **n == "acme").count(), 1);
    }
}
