//! SMS.ir HTTP driver.

use super::wire::{TemplateParameter, VerifySendRequest, VerifySendResponse};
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

/// Registry name of the SMS.ir driver.
pub const DRIVER_NAME: &str = "smsir";

/// Default SMS.ir API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.sms.ir";

/// Optional setting: name of the template parameter receiving the code.
///
/// SMS.ir templates reference parameters by name (`#code#`); set this when
/// your template uses something other than `code`.
pub const SETTING_PARAMETER_NAME: &str = "parameter_name";

const DEFAULT_PARAMETER_NAME: &str = "code";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Driver for the SMS.ir verify endpoint.
///
/// Required settings: `api_key` and a numeric `template_id`. Optional:
/// `parameter_name`, `base_url` and `timeout_secs`.
///
/// Construction is total; missing or non-numeric required settings surface
/// as `Config` outcomes on the first send attempt.
pub struct SmsIrDriver {
    http_client: ClientWithMiddleware,
    api_key: Option<SecretString>,
    template_id: Option<String>,
    parameter_name: String,
    base_url: Url,
}

impl std::fmt::Debug for SmsIrDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmsIrDriver")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .field("template_id", &self.template_id)
            .field("parameter_name", &self.parameter_name)
            .finish()
    }
}

impl SmsIrDriver {
    /// Build a driver from a settings bundle. Never fails on missing keys.
    pub fn from_settings(settings: &ProviderSettings) -> Result<Self, SendError> {
        let base_url = match settings.get(keys::BASE_URL) {
            Some(raw) => Url::parse(raw).map_err(|e| {
                SendError::Config(format!("smsir: invalid `{}`: {e}", keys::BASE_URL))
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
                        "smsir: `{}` must be a whole number of seconds",
                        keys::TIMEOUT_SECS
                    ))
                })?,
            None => DEFAULT_TIMEOUT,
        };

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SendError::Config(format!("smsir: cannot build HTTP client: {e}")))?;

        Ok(Self {
            http_client: ClientBuilder::new(client).build(),
            api_key: settings
                .get(keys::API_KEY)
                .map(|key| SecretString::from(key.to_string())),
            template_id: settings.get(keys::TEMPLATE_ID).map(str::to_string),
            parameter_name: settings
                .get(SETTING_PARAMETER_NAME)
                .unwrap_or(DEFAULT_PARAMETER_NAME)
                .to_string(),
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

    fn required_config(&self) -> Result<(&SecretString, i64), SendError> {
        let api_key = self.api_key.as_ref().ok_or_else(|| {
            SendError::Config(format!(
                "smsir: missing required setting `{}`",
                keys::API_KEY
            ))
        })?;
        let raw = self.template_id.as_deref().ok_or_else(|| {
            SendError::Config(format!(
                "smsir: missing required setting `{}`",
                keys::TEMPLATE_ID
            ))
        })?;
        let template_id = raw.trim().parse::<i64>().map_err(|_| {
            SendError::Config(format!(
                "smsir: `{}` must be a numeric template id",
                keys::TEMPLATE_ID
            ))
        })?;
        Ok((api_key, template_id))
    }

    /// `{base_url}/v1/send/verify`
    fn verify_url(&self) -> Result<Url, SendError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                SendError::Config(format!("smsir: `{}` must be an http(s) URL", keys::BASE_URL))
            })?;
            segments.pop_if_empty();
            segments.extend(["v1", "send", "verify"]);
        }
        Ok(url)
    }
}

#[async_trait]
impl SmsDriver for SmsIrDriver {
    fn name(&self) -> &'static str {
        DRIVER_NAME
    }

    async fn send_verify_code(&self, to: &PhoneNumber, code: &VerifyCode) -> Outcome {
        let (api_key, template_id) = self.required_config()?;
        let url = self.verify_url()?;

        // SMS.ir wants the number as bare digits with country code.
        let mobile = to.as_str().trim_start_matches('+');
        let request = VerifySendRequest {
            mobile,
            template_id,
            parameters: vec![TemplateParameter {
                name: &self.parameter_name,
                value: code.as_str(),
            }],
        };

        let response = self
            .http_client
            .post(url)
            .header("x-api-key", api_key.expose_secret())
            .json(&request)
            .send()
            .await
            .map_err(scrub_transport_error)?;

        let http_status = response.status();
        let body = response.text().await.map_err(scrub_body_error)?;

        // Rejections arrive as HTTP 400/401 with the same JSON shape, so the
        // body is parsed regardless of the status line.
        let parsed: VerifySendResponse = match serde_json::from_str(&body) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!(provider = DRIVER_NAME, %http_status, "unparseable provider response");
                return Err(SendError::ResponseFormat(format!(
                    "sms.ir returned an uninterpretable body (HTTP {http_status}): {e}"
                )));
            }
        };

        if !parsed.is_success() {
            warn!(
                provider = DRIVER_NAME,
                to = %to.masked(),
                status = parsed.status,
                "provider rejected verify send"
            );
            return Err(SendError::ProviderRejected(format!(
                "sms.ir error {}: {}",
                parsed.status, parsed.message
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::ErrorKind;
    use serde_json::json;
    use wiremock::matchers::{body_json, body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn settings_for(server: &MockServer) -> ProviderSettings {
        ProviderSettings::new()
            .with(keys::API_KEY, "test_key")
            .with(keys::TEMPLATE_ID, "100000")
            .with(keys::BASE_URL, server.uri())
    }

    fn accepted_body() -> serde_json::Value {
        json!({"status": 1, "message": "موفق", "data": {"messageId": 89545112, "cost": 1.0}})
    }

    #[tokio::test]
    async fn test_send_success_posts_expected_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/send/verify"))
            .and(header("x-api-key", "test_key"))
            .and(body_json(json!({
                "mobile": "989123456789",
                "templateId": 100000,
                "parameters": [{"name": "code", "value": "43017"}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(accepted_body()))
            .mount(&mock_server)
            .await;

        let driver = SmsIrDriver::from_settings(&settings_for(&mock_server)).unwrap();
        let delivery = driver
            .send_verify_code(&PhoneNumber::new("+989123456789"), &VerifyCode::new("43017"))
            .await
            .unwrap();

        assert_eq!(delivery.provider_message_id.as_deref(), Some("89545112"));
    }

    #[tokio::test]
    async fn test_custom_parameter_name() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(body_partial_json(json!({
                "parameters": [{"name": "otp", "value": "43017"}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(accepted_body()))
            .mount(&mock_server)
            .await;

        let settings = settings_for(&mock_server).with(SETTING_PARAMETER_NAME, "otp");
        let driver = SmsIrDriver::from_settings(&settings).unwrap();
        let outcome = driver
            .send_verify_code(&PhoneNumber::new("+989123456789"), &VerifyCode::new("43017"))
            .await;

        assert!(outcome.is_ok());
    }

    #[tokio::test]
    async fn test_rejection_reply_maps_to_provider_rejected() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": 0,
                "message": "Invalid Template",
                "data": null
            })))
            .mount(&mock_server)
            .await;

        let driver = SmsIrDriver::from_settings(&settings_for(&mock_server)).unwrap();
        let err = driver
            .send_verify_code(&PhoneNumber::new("+989123456789"), &VerifyCode::new("43017"))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::ProviderRejected);
        assert!(err.to_string().contains("Invalid Template"));
    }

    #[tokio::test]
    async fn test_rejection_parses_even_on_http_error_status() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "status": 0,
                "message": "Unauthorized"
            })))
            .mount(&mock_server)
            .await;

        let driver = SmsIrDriver::from_settings(&settings_for(&mock_server)).unwrap();
        let err = driver
            .send_verify_code(&PhoneNumber::new("+989123456789"), &VerifyCode::new("43017"))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::ProviderRejected);
        assert!(err.to_string().contains("Unauthorized"));
    }

    #[tokio::test]
    async fn test_non_json_body_is_response_format_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
            .mount(&mock_server)
            .await;

        let driver = SmsIrDriver::from_settings(&settings_for(&mock_server)).unwrap();
        let err = driver
            .send_verify_code(&PhoneNumber::new("+989123456789"), &VerifyCode::new("43017"))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::ResponseFormatError);
        assert!(err.to_string().contains("503"));
    }

    #[tokio::test]
    async fn test_success_without_message_id_degrades_gracefully() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"status": 1, "message": "ok", "data": null})),
            )
            .mount(&mock_server)
            .await;

        let driver = SmsIrDriver::from_settings(&settings_for(&mock_server)).unwrap();
        let delivery = driver
            .send_verify_code(&PhoneNumber::new("+989123456789"), &VerifyCode::new("43017"))
            .await
            .unwrap();

        assert_eq!(delivery.provider_message_id, None);
    }

    #[tokio::test]
    async fn test_missing_api_key_fails_before_any_request() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(accepted_body()))
            .expect(0)
            .mount(&mock_server)
            .await;

        let settings = ProviderSettings::new()
            .with(keys::TEMPLATE_ID, "100000")
            .with(keys::BASE_URL, mock_server.uri());
        let driver = SmsIrDriver::from_settings(&settings).unwrap();
        let err = driver
            .send_verify_code(&PhoneNumber::new("+989123456789"), &VerifyCode::new("43017"))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::ConfigError);
        assert!(err.to_string().contains("api_key"));
        mock_server.verify().await;
    }

    #[tokio::test]
    async fn test_non_numeric_template_fails_before_any_request() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(accepted_body()))
            .expect(0)
            .mount(&mock_server)
            .await;

        let settings = settings_for(&mock_server).with(keys::TEMPLATE_ID, "verify-login");
        let driver = SmsIrDriver::from_settings(&settings).unwrap();
        let err = driver
            .send_verify_code(&PhoneNumber::new("+989123456789"), &VerifyCode::new("43017"))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::ConfigError);
        assert!(err.to_string().contains("template_id"));
        mock_server.verify().await;
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let settings = ProviderSettings::new()
            .with(keys::API_KEY, "super-secret-key")
            .with(keys::TEMPLATE_ID, "100000");
        let driver = SmsIrDriver::from_settings(&settings).unwrap();
        let debug = format!("{driver:?}");
        assert!(!debug.contains("super-secret-key"));
        assert!(debug.contains("[REDACTED]"));
    }
}
