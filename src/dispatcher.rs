//! The dispatcher: the one entry point for sending verification codes.
//!
//! A dispatcher owns a phone normalizer and at most one active driver.
//! Callers hand it a [`VerifyRequest`]; it normalizes the number, delegates
//! to whichever driver is installed, and returns the driver's [`Outcome`]
//! untouched. Swapping providers is a config change plus
//! [`Dispatcher::install_driver`], never a caller-side code change.

use crate::drivers::SmsDriver;
use crate::normalize::PhoneNormalizer;
use crate::outcome::{Outcome, SendError};
use crate::types::{DialCodeError, VerifyRequest};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, info, warn};

/// Provider-agnostic sender of verification codes.
///
/// Cheap to share behind an `Arc`; all methods take `&self`, so one
/// dispatcher serves an entire application.
///
/// # Concurrency
///
/// The active driver sits in an `RwLock`ed slot. A send clones the `Arc`
/// out of the slot and releases the lock before any I/O, so installs never
/// wait on in-flight sends and an in-flight send finishes on the driver it
/// started with.
pub struct Dispatcher {
    normalizer: PhoneNormalizer,
    active: RwLock<Option<Arc<dyn SmsDriver>>>,
}

impl Dispatcher {
    /// Create a dispatcher with no driver installed.
    ///
    /// Sends return `NoDriverConfigured` until a driver is installed.
    pub fn new(normalizer: PhoneNormalizer) -> Self {
        Self {
            normalizer,
            active: RwLock::new(None),
        }
    }

    /// Convenience constructor from a home country dial code.
    pub fn with_home_dial_code(home_dial_code: impl AsRef<str>) -> Result<Self, DialCodeError> {
        Ok(Self::new(PhoneNormalizer::new(home_dial_code)?))
    }

    /// The normalizer this dispatcher applies to every raw number.
    pub fn normalizer(&self) -> &PhoneNormalizer {
        &self.normalizer
    }

    /// Install `driver` as the active driver, replacing any previous one.
    ///
    /// Takes effect atomically for sends that start after this call;
    /// in-flight sends keep the driver they started with.
    pub fn install_driver(&self, driver: Arc<dyn SmsDriver>) {
        info!(driver = driver.name(), "installing SMS driver");
        let mut slot = self.active.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = slot.replace(driver) {
            debug!(driver = previous.name(), "previous SMS driver replaced");
        }
    }

    /// The currently installed driver, if any.
    pub fn active_driver(&self) -> Option<Arc<dyn SmsDriver>> {
        let slot = self.active.read().unwrap_or_else(PoisonError::into_inner);
        (*slot).clone()
    }

    /// Normalize the request's number and deliver its code.
    ///
    /// With no driver installed this fails immediately, before
    /// normalization and without any network access.
    pub async fn send_verify_code(&self, request: &VerifyRequest) -> Outcome {
        let Some(driver) = self.active_driver() else {
            warn!("verification send attempted with no driver installed");
            return Err(SendError::NoDriverConfigured);
        };

        let to = self.normalizer.normalize(request.raw_number());
        debug!(driver = driver.name(), to = %to.masked(), "dispatching verification code");
        driver.send_verify_code(&to, request.code()).await
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("home_dial_code", self.normalizer.home_dial_code())
            .field("active_driver", &self.active_driver().map(|d| d.name()))
            .finish()
    }
}
