//! Core value types for SMS verification dispatch.

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;
use thiserror::Error;

// =============================================================================
// DialCode
// =============================================================================

/// Error when parsing a dial code.
#[derive(Debug, Clone, Error)]
pub enum DialCodeError {
    /// Dial code contains non-digit characters.
    #[error("dial code must contain only digits")]
    NonDigit,
    /// Dial code is empty.
    #[error("dial code cannot be empty")]
    Empty,
}

/// Country calling code (e.g., "98" for Iran, "1" for USA).
///
/// Dial codes are stored without the leading '+' sign. The normalizer is
/// configured with exactly one of these as its home country.
///
/// # Example
///
/// ```rust
/// use sms_dispatch::DialCode;
///
/// let dc = DialCode::new("+98").unwrap();
/// assert_eq!(dc.to_string(), "98");
///
/// let dc = DialCode::new("1").unwrap();
/// assert_eq!(dc.to_string(), "1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DialCode(String);

impl DialCode {
    /// Create a new DialCode from a string.
    ///
    /// The input can include a leading '+' which will be stripped.
    pub fn new(s: impl AsRef<str>) -> Result<Self, DialCodeError> {
        let n = s.as_ref().trim().trim_start_matches('+');
        if n.is_empty() {
            return Err(DialCodeError::Empty);
        }
        if !n.chars().all(|c| c.is_ascii_digit()) {
            return Err(DialCodeError::NonDigit);
        }
        Ok(Self(n.to_string()))
    }

    /// Get the dial code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for DialCode {
    type Err = DialCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Display for DialCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for DialCode {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(d)?;
        DialCode::new(raw).map_err(de::Error::custom)
    }
}

impl Serialize for DialCode {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&self.0)
    }
}

// =============================================================================
// PhoneNumber
// =============================================================================

/// Phone number in canonical international form (e.g., "+989123456789").
///
/// Values produced by the normalizer start with `+` followed only by digits.
/// The type itself performs no validation; normalization is the single place
/// where the canonical form is established.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Create a new PhoneNumber from an already-canonical string.
    pub fn new(number: impl Into<String>) -> Self {
        Self(number.into())
    }

    /// Get the number as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Masked form for log records (e.g., "+98****6789").
    ///
    /// Keeps the first three and last four characters; anything shorter is
    /// fully masked. Diagnostics must use this instead of the raw number.
    ///
    /// # Example
    ///
    /// ```rust
    /// use sms_dispatch::PhoneNumber;
    ///
    /// assert_eq!(PhoneNumber::new("+989123456789").masked(), "+98****6789");
    /// assert_eq!(PhoneNumber::new("+1234").masked(), "****");
    /// ```
    pub fn masked(&self) -> String {
        let len = self.0.chars().count();
        if len < 7 {
            return "****".to_string();
        }
        let head: String = self.0.chars().take(3).collect();
        let tail: String = self.0.chars().skip(len - 4).collect();
        format!("{head}****{tail}")
    }
}

impl Display for PhoneNumber {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for PhoneNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for PhoneNumber {
    fn from(number: String) -> Self {
        Self(number)
    }
}

impl From<&str> for PhoneNumber {
    fn from(number: &str) -> Self {
        Self(number.to_string())
    }
}

// =============================================================================
// VerifyCode
// =============================================================================

/// One-time verification code carried in an SMS.
///
/// The code is opaque to the dispatch layer: no length or digit checks, and
/// it is never written to log records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyCode(String);

impl VerifyCode {
    /// Create a new VerifyCode.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Get the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for VerifyCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for VerifyCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for VerifyCode {
    fn from(code: String) -> Self {
        Self(code)
    }
}

impl From<&str> for VerifyCode {
    fn from(code: &str) -> Self {
        Self(code.to_string())
    }
}

// =============================================================================
// VerifyRequest
// =============================================================================

/// Caller-supplied input for a single verification send.
///
/// `raw_number` may arrive in any loose local format; the dispatcher
/// normalizes it before any driver sees it. A request is built fresh for
/// every send call and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyRequest {
    raw_number: String,
    code: VerifyCode,
}

impl VerifyRequest {
    /// Create a new request from a loosely formatted number and a code.
    pub fn new(raw_number: impl Into<String>, code: impl Into<VerifyCode>) -> Self {
        Self {
            raw_number: raw_number.into(),
            code: code.into(),
        }
    }

    /// The number exactly as the caller supplied it.
    pub fn raw_number(&self) -> &str {
        &self.raw_number
    }

    /// The verification code to deliver.
    pub fn code(&self) -> &VerifyCode {
        &self.code
    }
}
