//! Calls against the real AnyPay API.
//!
//! Skipped unless `RUN_LIVE_TESTS=true` and `ANYPAY_API_ID` / `ANYPAY_API_KEY`
//! are set. Only read-only methods are exercised.

use anypay::{AnyPayBuilder, AnyPayConfig, AnyPayError};
use std::env;
use std::time::Duration;
use tokio::time::timeout;

fn should_run_live_tests() -> bool {
    env::var("RUN_LIVE_TESTS").unwrap_or_default() == "true"
}

fn live_config() -> Option<AnyPayConfig> {
    if !should_run_live_tests() {
        println!("⚠️ live tests disabled, set RUN_LIVE_TESTS=true to enable");
        return None;
    }
    AnyPayConfig::from_env().ok()
}

#[tokio::test]
async fn test_live_balance_and_rates() {
    let Some(config) = live_config() else {
        return;
    };

    let client = timeout(
        Duration::from_secs(30),
        AnyPayBuilder::new(config).build_validated(),
    )
    .await
    .expect("validation timed out")
    .expect("credentials should be valid");

    let balance = client.get_balance().await.unwrap();
    println!("✅ balance: {}", balance.balance);

    let rates = client.get_rates().await.unwrap();
    assert!(!rates.incoming.is_empty() || !rates.out.is_empty());
}

#[tokio::test]
async fn test_live_bad_key_is_configuration_error() {
    let Some(config) = live_config() else {
        return;
    };

    let bad = AnyPayConfig::new(config.api_id().to_string(), "wrong-key".to_string());
    let err = AnyPayBuilder::new(bad)
        .build_validated()
        .await
        .unwrap_err();

    assert!(matches!(err, AnyPayError::Configuration(_)), "{err:?}");
}
