//! Mock driver for development and tests.

use crate::config::ProviderSettings;
use crate::drivers::traits::SmsDriver;
use crate::outcome::{Delivery, Outcome, SendError};
use crate::types::{PhoneNumber, VerifyCode};
use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{info, warn};

/// Registry name of the mock driver.
pub const DRIVER_NAME: &str = "mock";

/// Optional setting: any of `"true"`/`"1"`/`"yes"` makes every send fail.
pub const SETTING_FAIL: &str = "fail";

/// Driver that performs no network I/O.
///
/// Succeeding sends are counted and assigned sequential `mock-N` message
/// ids, so tests and local environments can observe traffic without a
/// provider account. The [`SETTING_FAIL`] switch turns it into an
/// always-rejecting provider for failure-path testing.
#[derive(Debug, Default)]
pub struct MockDriver {
    delivered: AtomicU64,
    fail: bool,
}

impl MockDriver {
    /// Mock driver whose sends always succeed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mock driver whose sends always come back `ProviderRejected`.
    pub fn failing() -> Self {
        Self {
            delivered: AtomicU64::new(0),
            fail: true,
        }
    }

    /// Build from settings, honoring [`SETTING_FAIL`].
    pub fn from_settings(settings: &ProviderSettings) -> Self {
        let fail = settings
            .get(SETTING_FAIL)
            .is_some_and(|v| matches!(v.trim(), "true" | "1" | "yes"));
        Self {
            delivered: AtomicU64::new(0),
            fail,
        }
    }

    /// How many sends this driver has accepted.
    pub fn delivered(&self) -> u64 {
        self.delivered.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SmsDriver for MockDriver {
    fn name(&self) -> &'static str {
        DRIVER_NAME
    }

    async fn send_verify_code(&self, to: &PhoneNumber, _code: &VerifyCode) -> Outcome {
        if self.fail {
            warn!(provider = DRIVER_NAME, to = %to.masked(), "mock send rejected");
            return Err(SendError::ProviderRejected(
                "mock driver is configured to fail".to_string(),
            ));
        }

        let sequence = self.delivered.fetch_add(1, Ordering::SeqCst) + 1;
        info!(
            provider = DRIVER_NAME,
            to = %to.masked(),
            message_id = %format!("mock-{sequence}"),
            "mock send accepted"
        );
        Ok(Delivery {
            message: "verification code sent (mock)".to_string(),
            provider_message_id: Some(format!("mock-{sequence}")),
        })
    }
}
