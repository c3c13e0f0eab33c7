//! SMS.ir wire types.

use serde::{Deserialize, Serialize};

/// Response status meaning the provider accepted the message.
pub(crate) const STATUS_SUCCESS: i64 = 1;

/// Body of a verify send request.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VerifySendRequest<'a> {
    pub mobile: &'a str,
    pub template_id: i64,
    pub parameters: Vec<TemplateParameter<'a>>,
}

/// One named template parameter.
#[derive(Debug, Serialize)]
pub(crate) struct TemplateParameter<'a> {
    pub name: &'a str,
    pub value: &'a str,
}

/// Verify send reply. Error replies often carry `data: null`.
#[derive(Debug, Deserialize)]
pub(crate) struct VerifySendResponse {
    pub status: i64,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: Option<ResponseData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ResponseData {
    #[serde(default)]
    pub message_id: Option<i64>,
}

impl VerifySendResponse {
    /// Whether the reply reports acceptance.
    pub fn is_success(&self) -> bool {
        self.status == STATUS_SUCCESS
    }

    /// Provider message id, if the reply carries one.
    pub fn message_id(&self) -> Option<String> {
        self.data
            .as_ref()
            .and_then(|data| data.message_id)
            .map(|id| id.to_string())
    }
}
