//! # SMS Dispatch
//!
//! A pluggable-provider dispatch layer for sending one-time SMS verification codes.
//!
//! This library gives an application a single, provider-agnostic entry point
//! for delivering one-time codes: raw phone input is normalized against a
//! configured home country, handed to whichever provider driver is installed,
//! and every attempt resolves into one closed [`Outcome`] callers can match
//! exhaustively. Swapping providers is a configuration change, not a code
//! change.
//!
//! ## Bundled Drivers
//!
//! | Provider | Registry name | Website |
//! |----------|---------------|---------|
//! | Kavenegar | `kavenegar` | <https://kavenegar.com> |
//! | SMS.ir | `smsir` | <https://sms.ir> |
//! | Mock (no I/O) | `mock` | — |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use sms_dispatch::{
//!     Dispatcher, DriverRegistry, ProviderSettings, SendReport, VerifyRequest,
//!     config::keys,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Build the configured driver by name
//!     let settings = ProviderSettings::new()
//!         .with(keys::API_KEY, "your_api_key")
//!         .with(keys::TEMPLATE_ID, "verify-login");
//!     let driver = DriverRegistry::builtin().create("kavenegar", &settings)?;
//!
//!     // One dispatcher serves the whole application
//!     let dispatcher = Dispatcher::with_home_dial_code("98")?;
//!     dispatcher.install_driver(driver);
//!
//!     // Loose local input is normalized to +989123456789 before sending
//!     let outcome = dispatcher
//!         .send_verify_code(&VerifyRequest::new("0912 345-6789", "43017"))
//!         .await;
//!     println!("{}", serde_json::to_string(&SendReport::from(outcome))?);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! DriverRegistry ──create(name, settings)──▶ Arc<dyn SmsDriver>
//!                                                  │ install_driver
//!                                                  ▼
//! caller ──VerifyRequest──▶ Dispatcher ──normalize──▶ active SmsDriver ──▶ Outcome
//!                           (PhoneNormalizer)        (kavenegar, smsir, mock, ...)
//! ```
//!
//! ## Diagnostics
//!
//! All modules log through [`tracing`]. Records never contain API keys or
//! verification codes, and phone numbers appear only in masked form
//! (`+98****6789`).

pub mod config;
pub mod dispatcher;
pub mod drivers;
pub mod normalize;
pub mod outcome;
pub mod registry;
pub mod types;

// Re-export commonly used types at the crate root
pub use config::ProviderSettings;
pub use dispatcher::Dispatcher;
pub use drivers::{KavenegarDriver, MockDriver, SmsDriver, SmsIrDriver};
pub use normalize::PhoneNormalizer;
pub use outcome::{Delivery, ErrorKind, Outcome, SendError, SendReport};
pub use registry::{DriverFactory, DriverRegistry};
pub use types::{DialCode, DialCodeError, PhoneNumber, VerifyCode, VerifyRequest};
