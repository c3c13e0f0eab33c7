//! Send a one-time verification code from the command line.
//!
//! Defaults to the mock driver, so it runs without any provider account:
//!
//! ```bash
//! cargo run --example send_verify -- "0912 345-6789" 43017
//! ```
//!
//! Against a real provider:
//!
//! ```bash
//! SMS_PROVIDER=kavenegar SMS_API_KEY=your_key SMS_TEMPLATE_ID=verify-login \
//! cargo run --example send_verify -- "0912 345-6789" 43017
//! ```

use sms_dispatch::config::keys;
use sms_dispatch::{Dispatcher, DriverRegistry, ProviderSettings, SendReport, VerifyRequest};
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = env::args().skip(1);
    let raw_number = args.next().unwrap_or_else(|| "0912 345-6789".to_string());
    let code = args.next().unwrap_or_else(|| "43017".to_string());

    let provider = env::var("SMS_PROVIDER").unwrap_or_else(|_| "mock".to_string());
    let home_dial_code = env::var("SMS_HOME_DIAL_CODE").unwrap_or_else(|_| "98".to_string());

    // Pick up provider settings from the environment
    let mut settings = ProviderSettings::new();
    for (var, key) in [
        ("SMS_API_KEY", keys::API_KEY),
        ("SMS_TEMPLATE_ID", keys::TEMPLATE_ID),
        ("SMS_SENDER_NUMBER", keys::SENDER_NUMBER),
        ("SMS_BASE_URL", keys::BASE_URL),
        ("SMS_TIMEOUT_SECS", keys::TIMEOUT_SECS),
    ] {
        if let Ok(value) = env::var(var) {
            settings.insert(key, value);
        }
    }

    // Build the configured driver and install it
    let driver = DriverRegistry::builtin().create(&provider, &settings)?;
    let dispatcher = Dispatcher::with_home_dial_code(&home_dial_code)?;
    dispatcher.install_driver(driver);

    let normalized = dispatcher.normalizer().normalize(&raw_number);
    println!("Provider:   {provider}");
    println!("Sending to: {}", normalized.masked());

    // Send and print the report both arms produce
    let outcome = dispatcher
        .send_verify_code(&VerifyRequest::new(raw_number, code))
        .await;
    let report = SendReport::from(outcome);
    println!("{}", serde_json::to_string_pretty(&report)?);

    if !report.success {
        std::process::exit(1);
    }
    Ok(())
}
