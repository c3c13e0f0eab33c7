//! Bundled SMS provider drivers.
//!
//! Each vendor lives in its own module with its driver and wire types kept
//! separate. All bundled drivers are registered by name in
//! [`DriverRegistry::builtin`](crate::registry::DriverRegistry::builtin).

pub mod kavenegar;
pub mod mock;
pub mod smsir;
pub(crate) mod traits;

pub use kavenegar::KavenegarDriver;
pub use mock::MockDriver;
pub use smsir::SmsIrDriver;
pub use traits::SmsDriver;

use crate::outcome::SendError;

/// Map a middleware-client failure into the connection arm of the taxonomy.
///
/// URLs are stripped from reqwest errors before display: some providers
/// carry the API key in the URL path, and error text ends up in logs.
pub(crate) fn scrub_transport_error(err: reqwest_middleware::Error) -> SendError {
    match err {
        reqwest_middleware::Error::Reqwest(e) => scrub_body_error(e),
        reqwest_middleware::Error::Middleware(e) => SendError::Connection(e.to_string()),
    }
}

/// Same scrubbing for plain reqwest errors (body reads).
pub(crate) fn scrub_body_error(err: reqwest::Error) -> SendError {
    SendError::Connection(err.without_url().to_string())
}
