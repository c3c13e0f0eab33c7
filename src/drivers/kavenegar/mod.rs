//! Kavenegar verification driver.
//!
//! Sends one-time codes through Kavenegar's Verify Lookup API
//! (<https://kavenegar.com/rest.html#sms-Lookup>), where the provider fills
//! a pre-approved template with the code and handles delivery. The API key
//! travels inside the request URL path, so diagnostics from this module
//! never echo request URLs.

mod driver;
mod response;

pub use driver::{DEFAULT_BASE_URL, DRIVER_NAME, KavenegarDriver};
