pub mod builder;
pub mod client;
pub mod endpoints;
pub mod requests;
pub mod response;
pub mod serde_util;
pub mod types;

// Re-export main types for easier importing
pub use builder::{build_from_env, AnyPayBuilder};
pub use client::AnyPayClient;
pub use endpoints::Endpoint;
pub use requests::{
    CommissionType, CreatePayment, CreatePayout, GetCommissions, GetPayments, GetPayouts,
    IntoParams, DEFAULT_CURRENCY,
};
pub use types::{Balance, Bill, Commissions, Payment, Payout, Rates, ServiceIps};
