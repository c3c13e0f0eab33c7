//! Live provider tests.
//!
//! These tests make real API calls and send real SMS messages. They are
//! ignored by default and should be run manually.
//!
//! # Setup
//!
//! 1. Copy the example env file:
//!    ```bash
//!    cp tests/.env.example tests/.env
//!    ```
//!
//! 2. Edit `tests/.env` and add credentials for the provider under test
//!
//! 3. Run the tests:
//!    ```bash
//!    cargo test --test live_api -- --ignored
//!    ```
//!
//! Alternatively, pass the credentials directly:
//! ```bash
//! KAVENEGAR_API_KEY=key KAVENEGAR_TEMPLATE_ID=verify-login \
//! KAVENEGAR_RECEPTOR=09123456789 cargo test --test live_api -- --ignored
//! ```
//!
//! **WARNING**: These tests consume provider credit and deliver real SMS
//! to the configured receptor number!

use sms_dispatch::config::keys;
use sms_dispatch::{Dispatcher, DriverRegistry, ProviderSettings, SendReport, VerifyRequest};
use std::env;
use std::time::{SystemTime, UNIX_EPOCH};

/// Read a required variable from the environment or tests/.env.
fn require_env(name: &str) -> String {
    dotenvy::dotenv().ok();

    env::var(name).unwrap_or_else(|_| {
        panic!(
            "{name} environment variable must be set.\n\
             Either:\n\
             1. Copy tests/.env.example to tests/.env and fill in credentials\n\
             2. Run with: {name}=... cargo test --test live_api -- --ignored"
        )
    })
}

/// A code that differs between runs, so delivered messages are tellable apart.
fn fresh_code() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock before epoch")
        .subsec_nanos();
    format!("{:05}", nanos % 100_000)
}

fn dispatcher_for(provider: &str, settings: &ProviderSettings) -> Dispatcher {
    let driver = DriverRegistry::builtin()
        .create(provider, settings)
        .expect("driver should build");
    let dispatcher = Dispatcher::with_home_dial_code("98").expect("valid dial code");
    dispatcher.install_driver(driver);
    dispatcher
}

/// Send one real code through Kavenegar.
#[tokio::test]
#[ignore = "requires API key and consumes credits"]
async fn test_kavenegar_live_send() {
    let settings = ProviderSettings::new()
        .with(keys::API_KEY, require_env("KAVENEGAR_API_KEY"))
        .with(keys::TEMPLATE_ID, require_env("KAVENEGAR_TEMPLATE_ID"));
    let receptor = require_env("KAVENEGAR_RECEPTOR");

    let dispatcher = dispatcher_for("kavenegar", &settings);
    let code = fresh_code();
    println!("Sending code {code} to {receptor} via kavenegar...");

    let outcome = dispatcher
        .send_verify_code(&VerifyRequest::new(receptor, code))
        .await;

    let report = SendReport::from(&outcome);
    println!("{}", serde_json::to_string_pretty(&report).unwrap());
    assert!(report.success, "live send failed: {}", report.message);
    assert!(report.message_id.is_some(), "expected a provider message id");
}

/// Send one real code through SMS.ir.
#[tokio::test]
#[ignore = "requires API key and consumes credits"]
async fn test_smsir_live_send() {
    let settings = ProviderSettings::new()
        .with(keys::API_KEY, require_env("SMSIR_API_KEY"))
        .with(keys::TEMPLATE_ID, require_env("SMSIR_TEMPLATE_ID"));
    let receptor = require_env("SMSIR_RECEPTOR");

    let dispatcher = dispatcher_for("smsir", &settings);
    let code = fresh_code();
    println!("Sending code {code} to {receptor} via sms.ir...");

    let outcome = dispatcher
        .send_verify_code(&VerifyRequest::new(receptor, code))
        .await;

    let report = SendReport::from(&outcome);
    println!("{}", serde_json::to_string_pretty(&report).unwrap());
    assert!(report.success, "live send failed: {}", report.message);
}

/// An obviously bad key must come back as a clean provider rejection,
/// not a panic or a transport error.
#[tokio::test]
#[ignore = "makes a real API call"]
async fn test_kavenegar_invalid_key_is_rejected() {
    let settings = ProviderSettings::new()
        .with(keys::API_KEY, "invalid_key_12345")
        .with(keys::TEMPLATE_ID, "verify-login");

    let dispatcher = dispatcher_for("kavenegar", &settings);
    let outcome = dispatcher
        .send_verify_code(&VerifyRequest::new("09123456789", "00000"))
        .await;

    let err = outcome.expect_err("invalid key should be rejected");
    println!("Rejection: {err}");
}
