//! Asynchronous client for the AnyPay payment API.
//!
//! ```rust,no_run
//! use anypay::{AnyPayBuilder, AnyPayConfig, CreatePayment};
//! use rust_decimal::Decimal;
//!
//! # async fn example() -> Result<(), anypay::AnyPayError> {
//! let config = AnyPayConfig::new("api_id".to_string(), "api_key".to_string()).project_id(7);
//! let client = AnyPayBuilder::new(config).build_validated().await?;
//!
//! let bill = client
//!     .create_payment(
//!         CreatePayment::new()
//!             .pay_id(1001)
//!             .amount(Decimal::new(150_050, 2))
//!             .desc("Order 1001")
//!             .method("card")
//!             .email("buyer@example.com"),
//!     )
//!     .await?;
//! println!("pay here: {}", bill.payment_url);
//! # Ok(())
//! # }
//! ```
pub mod api;
pub mod core;

pub use api::{
    build_from_env, AnyPayBuilder, AnyPayClient, Balance, Bill, CommissionType, Commissions,
    CreatePayment, CreatePayout, Endpoint, GetCommissions, GetPayments, GetPayouts, IntoParams,
    Payment, Payout, Rates, ServiceIps,
};
pub use core::{
    config::AnyPayConfig,
    errors::AnyPayError,
    kernel::{DigestAlgorithm, DigestSigner, ReqwestRest, RestClient, Signer},
    types::{HttpMethod, Params},
};
