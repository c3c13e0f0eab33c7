//! Capability contract every provider driver fulfils.

use crate::outcome::Outcome;
use crate::types::{PhoneNumber, VerifyCode};
use async_trait::async_trait;

/// A provider driver: one vendor's way of delivering a verification code.
///
/// Drivers are installed into the dispatcher as `Arc<dyn SmsDriver>`, so the
/// trait stays object-safe and implementations must be `Send + Sync`.
///
/// # Contract
///
/// - `to` is already in canonical `+<digits>` form; drivers never see raw
///   caller input and perform no normalization of their own.
/// - Every completion maps onto [`Outcome`]: rejections become
///   `ProviderRejected`, transport trouble becomes `Connection`,
///   uninterpretable bodies become `ResponseFormat`. Provider weirdness is
///   never a panic and never a provider-specific error type.
/// - Required configuration is checked before any network I/O; a driver
///   built from an incomplete settings bundle reports `Config` here rather
///   than failing construction.
/// - Each attempt emits one structured log record with secrets redacted:
///   no API keys, no verification codes, phone numbers only in masked form.
#[async_trait]
pub trait SmsDriver: Send + Sync + std::fmt::Debug {
    /// Registry name of this driver (e.g., `"kavenegar"`).
    fn name(&self) -> &'static str;

    /// Deliver `code` to `to` through the provider.
    async fn send_verify_code(&self, to: &PhoneNumber, code: &VerifyCode) -> Outcome;
}
