//! Kavenegar response envelope.
//!
//! Every Kavenegar reply wraps a `return` envelope carrying the real status
//! code plus entries describing accepted messages. The envelope, not the
//! HTTP status line, decides whether the send was accepted; error replies
//! often come with `entries: null`.

use serde::Deserialize;

/// Envelope status meaning the provider accepted the message.
pub(crate) const STATUS_ACCEPTED: i64 = 200;

/// Top-level verify-lookup reply.
#[derive(Debug, Deserialize)]
pub(crate) struct LookupResponse {
    #[serde(rename = "return")]
    pub envelope: Envelope,
    #[serde(default)]
    pub entries: Option<Vec<Entry>>,
}

/// The `return` envelope.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope {
    pub status: i64,
    #[serde(default)]
    pub message: String,
}

/// One accepted message.
#[derive(Debug, Deserialize)]
pub(crate) struct Entry {
    #[serde(default)]
    pub messageid: Option<i64>,
}

impl LookupResponse {
    /// Whether the envelope reports acceptance.
    pub fn is_accepted(&self) -> bool {
        self.envelope.status == STATUS_ACCEPTED
    }

    /// Provider message id of the first entry, if present.
    pub fn message_id(&self) -> Option<String> {
        self.entries
            .as_ref()
            .and_then(|entries| entries.first())
            .and_then(|entry| entry.messageid)
            .map(|id| id.to_string())
    }
}
