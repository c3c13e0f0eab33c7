//! Phone number normalization.
//!
//! Turns loosely formatted local input ("0912 345-6789") into canonical
//! international form ("+989123456789") against a single configured home
//! country. The heuristic is deliberately narrow: it rewrites national-looking
//! input for the home country and leaves anything already `+`-prefixed alone,
//! so numbers for other countries are never rewritten.

use crate::types::{DialCode, DialCodeError, PhoneNumber};

/// Normalizes raw phone input against one home country dial code.
///
/// Normalization is total (never fails), pure, and idempotent: feeding an
/// output back in returns it unchanged. Outputs always start with `+`
/// followed only by digits.
///
/// # Example
///
/// ```rust
/// use sms_dispatch::PhoneNormalizer;
///
/// let normalizer = PhoneNormalizer::new("98").unwrap();
/// assert_eq!(normalizer.normalize("0912 345-6789").as_str(), "+989123456789");
/// assert_eq!(normalizer.normalize("+989123456789").as_str(), "+989123456789");
/// ```
#[derive(Debug, Clone)]
pub struct PhoneNormalizer {
    home: DialCode,
}

impl PhoneNormalizer {
    /// Create a normalizer for the given home country dial code.
    ///
    /// Accepts the code with or without a leading '+' (e.g., "98" or "+98").
    pub fn new(home_dial_code: impl AsRef<str>) -> Result<Self, DialCodeError> {
        Ok(Self {
            home: DialCode::new(home_dial_code)?,
        })
    }

    /// The configured home country dial code.
    pub fn home_dial_code(&self) -> &DialCode {
        &self.home
    }

    /// Normalize raw input into canonical `+<digits>` form.
    ///
    /// Formatting characters (spaces, dashes, parentheses, dots) are dropped
    /// first; a `+` survives only as the leading character. The cleaned
    /// string is then rewritten:
    ///
    /// - starts with `+`: returned as-is, whatever the country
    /// - leading `0` (local format): the `0` becomes `+<home>`
    /// - starts with the home dial code: a `+` is prefixed
    /// - anything else, including empty input: `+<home>` is prepended
    pub fn normalize(&self, raw: &str) -> PhoneNumber {
        let cleaned = strip_formatting(raw);
        let home = self.home.as_str();

        let canonical = if cleaned.starts_with('+') {
            cleaned
        } else if let Some(rest) = cleaned.strip_prefix('0') {
            format!("+{home}{rest}")
        } else if cleaned.starts_with(home) {
            format!("+{cleaned}")
        } else {
            format!("+{home}{cleaned}")
        };

        PhoneNumber::new(canonical)
    }
}

/// Keep ASCII digits, plus a single `+` if it is the first kept character.
fn strip_formatting(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        if c.is_ascii_digit() || (c == '+' && out.is_empty()) {
            out.push(c);
        }
    }
    out
}
