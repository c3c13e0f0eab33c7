//! SMS.ir verification driver.
//!
//! Sends one-time codes through the SMS.ir verify endpoint
//! (<https://app.sms.ir/developer/help/verify>): a JSON POST authenticated
//! with an `x-api-key` header, filling a numeric template with named
//! parameters.

mod driver;
mod wire;

pub use driver::{DEFAULT_BASE_URL, DRIVER_NAME, SETTING_PARAMETER_NAME, SmsIrDriver};
