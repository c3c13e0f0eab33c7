//! Kavenegar HTTP driver.

use super::response::LookupResponse;
use crate::config::{ProviderSettings, keys};
use crate::drivers::traits::SmsDriver;
use crate::drivers::{scrub_body_error, scrub_transport_error};
use crate::outcome::{Delivery, Outcome, SendError};
use crate::types::{PhoneNumber, VerifyCode};
use async_trait::async_trait;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use tracing::{info, warn};
use url::Url;

/// Registry name of the Kavenegar driver.
pub const DRIVER_NAME: &str = "kavenegar";

/// Default Kavenegar API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.kavenegar.com";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Driver for Kavenegar's Verify Lookup API.
///
/// Required settings: `api_key` and `template_id` (the name of a template
/// pre-approved in the Kavenegar panel). Optional: `sender_number` to pin
/// the originating line, `base_url` and `timeout_secs`.
///
/// Construction is total; missing required settings surface as `Config`
/// outcomes on the first send attempt.
pub struct KavenegarDriver {
    http_client: ClientWithMiddleware,
    api_key: Option<SecretString>,
    template: Option<String>,
    sender: Option<String>,
    base_url: Url,
}

impl std::fmt::Debug for KavenegarDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KavenegarDriver")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .field("template", &self.template)
            .field("sender", &self.sender)
            .finish()
    }
}

impl KavenegarDriver {
    /// Build a driver from a settings bundle. Never fails on missing keys.
    pub fn from_settings(settings: &ProviderSettings) -> Result<Self, SendError> {
        let base_url = match settings.get(keys::BASE_URL) {
            Some(raw) => Url::parse(raw).map_err(|e| {
                SendError::Config(format!("kavenegar: invalid `{}`: {e}", keys::BASE_URL))
            })?,
            None => Url::parse(DEFAULT_BASE_URL).expect("Invalid default URL"),
        };

        let timeout = match settings.get(keys::TIMEOUT_SECS) {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|_| {
                    SendError::Config(format!(
                        "kavenegar: `{}` must be a whole number of seconds",
                        keys::TIMEOUT_SECS
                    ))
                })?,
            None => DEFAULT_TIMEOUT,
        };

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SendError::Config(format!("kavenegar: cannot build HTTP client: {e}")))?;

        Ok(Self {
            http_client: ClientBuilder::new(client).build(),
            api_key: settings
                .get(keys::API_KEY)
                .map(|key| SecretString::from(key.to_string())),
            template: settings.get(keys::TEMPLATE_ID).map(str::to_string),
            sender: settings.get(keys::SENDER_NUMBER).map(str::to_string),
            base_url,
        })
    }

    /// Replace the HTTP client, e.g. to add retry middleware.
    ///
    /// The replacement client carries its own timeout policy; `timeout_secs`
    /// no longer applies.
    pub fn with_http_client(mut self, http_client: ClientWithMiddleware) -> Self {
        self.http_client = http_client;
        self
    }

    fn required_config(&self) -> Result<(&SecretString, &str), SendError> {
        let api_key = self.api_key.as_ref().ok_or_else(|| {
            SendError::Config(format!(
                "kavenegar: missing required setting `{}`",
                keys::API_KEY
            ))
        })?;
        let template = self.template.as_deref().ok_or_else(|| {
            SendError::Config(format!(
                "kavenegar: missing required setting `{}`",
                keys::TEMPLATE_ID
            ))
        })?;
        Ok((api_key, template))
    }

    /// `{base_url}/v1/{api_key}/verify/lookup.json`
    fn lookup_url(&self, api_key: &str) -> Result<Url, SendError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                SendError::Config(format!(
                    "kavenegar: `{}` must be an http(s) URL",
                    keys::BASE_URL
                ))
            })?;
            segments.pop_if_empty();
            segments.extend(["v1", api_key, "verify", "lookup.json"]);
        }
        Ok(url)
    }
}

#[async_trait]
impl SmsDriver for KavenegarDriver {
    fn name(&self) -> &'static str {
        DRIVER_NAME
    }

    async fn send_verify_code(&self, to: &PhoneNumber, code: &VerifyCode) -> Outcome {
        let (api_key, template) = self.required_config()?;
        let url = self.lookup_url(api_key.expose_secret())?;

        let mut form: Vec<(&str, &str)> = vec![
            ("receptor", to.as_str()),
            ("token", code.as_str()),
            ("template", template),
        ];
        if let Some(sender) = self.sender.as_deref() {
            form.push(("sender", sender));
        }

        let response = self
            .http_client
            .post(url)
            .form(&form)
            .send()
            .await
            .map_err(scrub_transport_error)?;

        let http_status = response.status();
        let body = response.text().await.map_err(scrub_body_error)?;

        // The envelope, not the HTTP status line, is authoritative: Kavenegar
        // pairs rejection envelopes with assorted non-200 statuses.
        let parsed: LookupResponse = match serde_json::from_str(&body) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!(provider = DRIVER_NAME, %http_status, "unparseable provider response");
                return Err(SendError::ResponseFormat(format!(
                    "kavenegar returned an uninterpretable body (HTTP {http_status}): {e}"
                )));
            }
        };

        if !parsed.is_accepted() {
            warn!(
                provider = DRIVER_NAME,
                to = %to.masked(),
                status = parsed.envelope.status,
                "provider rejected verify lookup"
            );
            return Err(SendError::ProviderRejected(format!(
                "kavenegar error {}: {}",
                parsed.envelope.status, parsed.envelope.message
            )));
        }

        let message_id = parsed.message_id();
        info!(
            provider = DRIVER_NAME,
            to = %to.masked(),
            message_id = message_id.as_deref().unwrap_or("-"),
            "verification code dispatched"
        );

        Ok(Delivery {
            message: "verification code sent".to_string(),
            provider_message_id: message_id,
        })
    }
}
