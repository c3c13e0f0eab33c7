//! Outcome model for verification sends.
//!
//! Every send resolves to exactly one [`Outcome`]: either a [`Delivery`]
//! acknowledging hand-off to the provider, or a [`SendError`] classifying
//! what went wrong. Drivers never panic on provider weirdness and never
//! leak transport errors outside this taxonomy.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use thiserror::Error;

// =============================================================================
// SendError / ErrorKind
// =============================================================================

/// Why a verification send failed.
///
/// The set is closed: callers can match exhaustively and branch on retry
/// policy (connection errors are usually worth retrying, config errors are
/// not) without ever seeing a provider-specific error type.
#[derive(Debug, Clone, Error)]
pub enum SendError {
    /// No driver is installed in the dispatcher.
    #[error("no SMS driver configured")]
    NoDriverConfigured,

    /// The driver is missing or carrying unusable configuration.
    #[error("driver configuration error: {0}")]
    Config(String),

    /// The provider could not be reached, or timed out.
    #[error("connection error: {0}")]
    Connection(String),

    /// The provider answered with a body this crate cannot interpret.
    #[error("malformed provider response: {0}")]
    ResponseFormat(String),

    /// The provider understood the request and refused it.
    #[error("provider rejected the send: {0}")]
    ProviderRejected(String),
}

impl SendError {
    /// Stable classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NoDriverConfigured => ErrorKind::NoDriverConfigured,
            Self::Config(_) => ErrorKind::ConfigError,
            Self::Connection(_) => ErrorKind::ConnectionError,
            Self::ResponseFormat(_) => ErrorKind::ResponseFormatError,
            Self::ProviderRejected(_) => ErrorKind::ProviderRejected,
        }
    }
}

/// Machine-readable failure classification.
///
/// Serializes as the bare variant name (e.g., `"ConnectionError"`), which is
/// what [`SendReport`] puts on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Send attempted with no driver installed.
    NoDriverConfigured,
    /// Driver configuration is missing or unusable.
    ConfigError,
    /// Provider unreachable or timed out.
    ConnectionError,
    /// Provider response could not be interpreted.
    ResponseFormatError,
    /// Provider refused the request.
    ProviderRejected,
}

impl ErrorKind {
    /// The kind as a static string, matching the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoDriverConfigured => "NoDriverConfigured",
            Self::ConfigError => "ConfigError",
            Self::ConnectionError => "ConnectionError",
            Self::ResponseFormatError => "ResponseFormatError",
            Self::ProviderRejected => "ProviderRejected",
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Delivery / Outcome
// =============================================================================

/// Successful hand-off of a verification code to a provider.
///
/// "Success" means the provider accepted the message, not that the handset
/// received it; delivery receipts are out of scope for this layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    /// Human-readable confirmation.
    pub message: String,
    /// Provider-assigned message id, when the provider returns one.
    pub provider_message_id: Option<String>,
}

/// The single result type every send resolves to.
pub type Outcome = Result<Delivery, SendError>;

// =============================================================================
// SendReport
// =============================================================================

/// Serializable summary of an [`Outcome`] for API responses and audit logs.
///
/// # Example
///
/// ```rust
/// use sms_dispatch::{SendError, SendReport};
///
/// let report = SendReport::from(&Err(SendError::NoDriverConfigured));
/// let json = serde_json::to_value(&report).unwrap();
/// assert_eq!(json["success"], false);
/// assert_eq!(json["errorKind"], "NoDriverConfigured");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendReport {
    /// Whether the provider accepted the message.
    pub success: bool,
    /// Confirmation text on success, error text on failure.
    pub message: String,
    /// Provider-assigned message id, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    /// Failure classification; absent on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
}

impl From<&Outcome> for SendReport {
    fn from(outcome: &Outcome) -> Self {
        match outcome {
            Ok(delivery) => Self {
                success: true,
                message: delivery.message.clone(),
                message_id: delivery.provider_message_id.clone(),
                error_kind: None,
            },
            Err(error) => Self {
                success: false,
                message: error.to_string(),
                message_id: None,
                error_kind: Some(error.kind()),
            },
        }
    }
}

impl From<Outcome> for SendReport {
    fn from(outcome: Outcome) -> Self {
        Self::from(&outcome)
    }
}
